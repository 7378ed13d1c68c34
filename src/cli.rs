use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default CA bundle used to verify the queried endpoints
const DEFAULT_CA_BUNDLE: &str = "/etc/ssl/certs/ca-bundle.crt";

/// Aggregate CI tier verdicts and catalog metadata for build NVRs
#[derive(Parser, Debug)]
#[command(name = "nvr-verdict")]
#[command(version)]
#[command(about = "Aggregate CI tier verdicts and catalog metadata for build NVRs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Poll the results store and fold per-job outcomes into a tier verdict
    Results {
        /// CI job names to poll; with none given, results are bucketed by
        /// the job name embedded in each record
        job_names: Vec<String>,

        /// NVR of the tested component
        #[arg(long)]
        nvr: String,

        /// Tier of the tested jobs
        #[arg(long)]
        test_tier: u32,

        /// Results store api url from which job data will be queried
        #[arg(long)]
        resultsdb_api_url: String,

        /// Certificate bundle to verify the results store api url
        #[arg(long, default_value = DEFAULT_CA_BUNDLE)]
        ca_bundle: PathBuf,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve catalog metadata for a component and correlate its releases
    Catalog {
        /// Component in nvr format
        #[arg(long)]
        component_nvr: String,

        /// Catalog api url
        #[arg(long)]
        pdc_api_url: String,

        /// Certificate bundle to verify the catalog api url
        #[arg(long, default_value = DEFAULT_CA_BUNDLE)]
        ca_bundle: PathBuf,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
