use crate::stats::exec::AnalyzeOptions;
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docstats")]
#[command(about = "Commit, issue and committer statistics for documentation repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(short, long, action = ArgAction::Count, global = true, help = "Raise verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Number of repositories analyzed in parallel")]
    pub jobs: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone or update the configured repositories and analyze them
    #[command(visible_alias = "an")]
    Analyze {
        #[arg(short, long, value_delimiter = ',', help = "Only analyze these configuration sections")]
        sections: Vec<String>,

        #[arg(short, long, help = "Directory for the JSON and CSV result files")]
        output: Option<PathBuf>,

        #[arg(long, help = "Do not fetch repositories that are already cloned")]
        no_update: bool,

        #[arg(long, conflicts_with = "csv", help = "Print the results as JSON")]
        json: bool,

        #[arg(long, help = "Print the results as CSV")]
        csv: bool,

        #[arg(help = "Configuration file")]
        config: PathBuf,
    },
    /// Show a JSON result file as a table
    #[command(visible_alias = "visualize", alias = "vis")]
    Report {
        #[arg(long, help = "Print as CSV")]
        csv: bool,

        #[arg(help = "JSON result file written by analyze")]
        json_file: PathBuf,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.common.verbose, self.common.quiet);

        match self.command {
            Commands::Analyze {
                sections,
                output,
                no_update,
                json,
                csv,
                config,
            } => {
                let opts = AnalyzeOptions {
                    sections,
                    output,
                    no_update,
                    json,
                    csv,
                };
                crate::stats::analyze(&self.common, &config, opts)
            }
            Commands::Report { csv, json_file } => crate::stats::report(&json_file, csv),
        }
    }
}
