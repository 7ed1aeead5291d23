use console::style;
use itertools::Itertools;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::EstimateSummary;

const HEADER: &str = "graph\talgo_name\tsparsification_prob\twalk_length\tsubsample_size\tseeds\trepeats\tmean\tstd_dev\tground_truth\tmean_relative_error\trelative_error_of_mean\telapsed_secs";

/// Writes trial summaries to the console and to per-graph result files.
pub struct Reporter {
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn print_to_console(&self, summary: &EstimateSummary) {
        let error = match summary.relative_error_of_mean {
            Some(error) => format!("error {:.4}", error),
            None => "no ground truth".to_string(),
        };
        println!(
            "    {} p={} walk={} subsample={} seeds={} mean={:.2} sd={:.2} {} ({:.2} s)",
            style(&summary.algo_name).cyan(),
            summary.sparsification_prob,
            summary.walk_length,
            summary.subsample_size,
            summary.seed_vertices.len(),
            summary.mean,
            summary.std_dev,
            style(error).bold(),
            summary.elapsed.as_secs_f32(),
        );
    }

    /// Appends one row to `<output_dir>/<graph stem>.tsv`, writing the header
    /// first when the file is new. Graphs sharing a stem share the file, and
    /// the first column tells their rows apart.
    pub fn write_to_file(&self, summary: &EstimateSummary) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.result_path(&summary.filename);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        if file.metadata()?.len() == 0 {
            writeln!(file, "{}", HEADER)?;
        }
        writeln!(file, "{}", row(summary))?;
        Ok(path)
    }

    fn result_path(&self, filename: &str) -> PathBuf {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("graph");
        self.output_dir.join(format!("{}.tsv", stem))
    }
}

fn row(summary: &EstimateSummary) -> String {
    let optional = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    [
        summary.filename.clone(),
        summary.algo_name.clone(),
        summary.sparsification_prob.to_string(),
        summary.walk_length.to_string(),
        summary.subsample_size.to_string(),
        summary.seed_vertices.iter().join(","),
        summary.estimates.len().to_string(),
        summary.mean.to_string(),
        summary.std_dev.to_string(),
        summary
            .ground_truth
            .map_or_else(|| "-".to_string(), |t| t.to_string()),
        optional(summary.mean_relative_error),
        optional(summary.relative_error_of_mean),
        summary.elapsed.as_secs_f64().to_string(),
    ]
    .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn summary() -> EstimateSummary {
        EstimateSummary {
            filename: "graphs/flickr.edges".to_string(),
            algo_name: "TETRIS_2".to_string(),
            sparsification_prob: 0.1,
            walk_length: 100,
            subsample_size: 10,
            seed_vertices: vec![4],
            estimates: vec![9.0, 11.0],
            mean: 10.0,
            std_dev: 1.0,
            ground_truth: None,
            mean_relative_error: None,
            relative_error_of_mean: None,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_rows_are_appended_under_one_header() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let reporter = Reporter::new(dir.path().join("results"));

        let path = reporter.write_to_file(&summary())?;
        reporter.write_to_file(&summary())?;
        assert_eq!(path, dir.path().join("results").join("flickr.tsv"));

        let content = fs::read_to_string(path)?;
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "graphs/flickr.edges\tTETRIS_2\t0.1\t100\t10\t4\t2\t10\t1\t-\t-\t-\t1.5");
        Ok(())
    }

    #[test]
    fn test_same_stem_rows_keep_their_graph() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let reporter = Reporter::new(dir.path().to_path_buf());

        let mut first = summary();
        first.filename = "data/a/graph.txt".to_string();
        let mut second = summary();
        second.filename = "data/b/graph.txt".to_string();

        let path = reporter.write_to_file(&first)?;
        assert_eq!(reporter.write_to_file(&second)?, path);

        let content = fs::read_to_string(path)?;
        let graphs: Vec<_> = content
            .lines()
            .skip(1)
            .filter_map(|line| line.split('\t').next())
            .collect();
        assert_eq!(graphs, vec!["data/a/graph.txt", "data/b/graph.txt"]);
        Ok(())
    }
}
