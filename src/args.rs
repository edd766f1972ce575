use clap::Parser;
use std::path::PathBuf;

/// Print the number of test-related github commits per project and committer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Make logging more verbose
    #[clap(short, long)]
    pub verbose: bool,

    /// Export results as json to FILENAME
    #[clap(long, value_name = "FILENAME")]
    pub json_output: Option<PathBuf>,

    /// Show the current configuration and exit
    #[clap(long)]
    pub show_config: bool,
}
