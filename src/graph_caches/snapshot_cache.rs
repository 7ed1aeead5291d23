use super::GraphCache;
use crate::{CsrGraph, GraphFormat};
use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Stores bincode snapshots of parsed graphs in a directory.
///
/// A snapshot is only reused for the same canonical source path, parsed in
/// the same format, while the file keeps its length and modification time.
pub struct SnapshotCache {
    dir: PathBuf,
}

impl GraphCache for SnapshotCache {
    fn read_graph(
        &self,
        source: &Path,
        format: GraphFormat,
    ) -> Result<CsrGraph, Box<dyn std::error::Error>> {
        let path = self.snapshot_path(source, format)?;
        let reader = BufReader::new(File::open(path)?);
        let graph: CsrGraph = bincode::deserialize_from(reader)?;
        Ok(graph)
    }

    fn write_graph(
        &mut self,
        source: &Path,
        format: GraphFormat,
        graph: &CsrGraph,
    ) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.dir)?;
        let path = self.snapshot_path(source, format)?;
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, graph)?;
        Ok(())
    }
}

impl SnapshotCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Cache under the user's cache directory, e.g. `~/.cache/triangle-sweep`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("triangle-sweep"))
    }

    fn snapshot_path(
        &self,
        source: &Path,
        format: GraphFormat,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let metadata = fs::metadata(source)?;
        let modified = metadata.modified()?.duration_since(UNIX_EPOCH)?.as_secs();
        let name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or("Graph path has no file name")?;

        // Same-named files in different directories get different snapshots.
        let mut hasher = DefaultHasher::new();
        fs::canonicalize(source)?.hash(&mut hasher);
        let format = match format {
            GraphFormat::Escape => "escape",
            GraphFormat::EdgeList => "edge_list",
        };

        Ok(self.dir.join(format!(
            "{}-{:016x}-{}-{}-{}.bin",
            name,
            hasher.finish(),
            format,
            metadata.len(),
            modified
        )))
    }
}
