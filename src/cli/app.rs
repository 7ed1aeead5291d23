use clap::{App, Arg};
use indoc::indoc;

pub fn build_cli() -> App<'static, 'static> {
    let script_file = Arg::with_name("script_file")
        .index(1)
        .help("Sets the YAML sweep configuration to run.")
        .required(true);

    let progress = Arg::with_name("progress")
        .help("Show progress.")
        .short("p")
        .long("show-progress");

    let seed = Arg::with_name("seed")
        .help("Seeds the random source, overriding rng_seed of the configuration.")
        .long("seed")
        .takes_value(true)
        .value_name("SEED");

    let verbosity = Arg::with_name("verbosity")
        .short("v")
        .help("Sets the level of verbosity")
        .multiple(true);

    App::new("Triangle sweep")
        .version("0.1.0")
        .args(&[script_file, progress, seed, verbosity])
        .about("Runs triangle-count estimators over a sweep of graphs and conditions.")
        .long_about(indoc! {"
        Runs triangle-count estimators over a sweep of graphs and conditions.

        The configuration lists the input graphs with their ground-truth triangle
        counts, the estimators, the sparsification probabilities and the seed counts.
        Every graph is run under every combination of the three.
        "})
}
