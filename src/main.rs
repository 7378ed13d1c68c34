mod cli;

use cli::{Args, Command};
use nvr_verdict::prelude::*;
use nvr_verdict::shared::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => {
            if exit_code != ExitCode::Success {
                process::exit(exit_code.as_i32());
            }
        }
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = Args::parse_args();
    telemetry::init_tracing(Level::INFO);

    match args.command {
        Command::Results {
            job_names,
            nvr,
            test_tier,
            resultsdb_api_url,
            ca_bundle,
            output,
        } => {
            let query_client = HttpQueryClient::new(&ca_bundle)?;
            let progress_reporter = StderrProgressReporter::new();
            let use_case = PollResultsUseCase::new(query_client, progress_reporter);

            let request = PollRequest::new(resultsdb_api_url, nvr, test_tier, job_names);
            let report = use_case.execute(request).await?;
            let all_passed = report.all_passed();

            present(&report, output)?;

            if all_passed {
                Ok(ExitCode::Success)
            } else {
                Ok(ExitCode::TierFailed)
            }
        }
        Command::Catalog {
            component_nvr,
            pdc_api_url,
            ca_bundle,
            output,
        } => {
            let query_client = HttpQueryClient::new(&ca_bundle)?;
            let progress_reporter = StderrProgressReporter::new();
            let use_case = ResolveCatalogUseCase::new(query_client, progress_reporter);

            let request = CatalogRequest::new(pdc_api_url, component_nvr);
            let report = use_case.execute(request).await?;

            present(&report, output)?;
            Ok(ExitCode::Success)
        }
    }
}

/// Serializes the report and hands it to the chosen presenter
fn present<T: Serialize>(report: &T, output: Option<PathBuf>) -> Result<()> {
    let mut content = serde_json::to_string_pretty(report)?;
    content.push('\n');

    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&content)
}
