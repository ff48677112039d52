// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runs grade transfers against a registry snapshot file.
//!
//! The snapshot is loaded into an in-memory registry, the requested
//! operation runs through the same request boundary a service would use,
//! and the response is printed to stdout as JSON. Logs go to stderr.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use grade_transfer::{
    DEFAULT_PAGE_SIZE, DEFAULT_SUBMISSION_CONCURRENCY, InMemoryRegistry, RegistrySnapshot,
    TransferConfig, TransferOrchestrator,
};
use grade_transfer_api::{
    DestinationRequest, GradeDecisionRequest, ListDestinationsRequest, SubmitResultsRequest,
    SubmitResultsResponse, list_destinations, list_gradeable, submit_results,
};
use grade_transfer_domain::{Reporter, SectionRecord};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_log::AsTrace;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    args.run().await
}

/// Grade transfer driver
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to the registry snapshot (JSON)
    #[arg(short, long, global = true, default_value = "registry.json")]
    snapshot: PathBuf,

    /// Registry uid of the reporting examiner
    #[arg(short, long, global = true, default_value = "")]
    reporter: String,

    /// Maximum number of registry writes in flight
    #[arg(long, global = true, default_value_t = DEFAULT_SUBMISSION_CONCURRENCY)]
    concurrency: usize,

    /// Registry search page size
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// List the destinations reachable from a file of LMS sections
    #[command(visible_alias = "d")]
    Destinations {
        /// JSON array of `{sisSectionId, integrationId}` objects
        #[arg(long)]
        sections: PathBuf,
    },

    /// List the gradeable students of a destination
    #[command(visible_alias = "l")]
    List {
        /// Destination as JSON, e.g. `{"activityOccasion": "..."}`
        #[arg(long)]
        destination: String,
    },

    /// Submit grade decisions for a destination
    #[command(visible_alias = "s")]
    Submit {
        /// Destination as JSON, e.g. `{"courseOccasion": "...", "reportingInstance": "..."}`
        #[arg(long)]
        destination: String,

        /// JSON array of `{studentId, draft}` objects
        #[arg(long)]
        decisions: PathBuf,

        /// Write the updated registry back to the snapshot file
        #[arg(long)]
        save: bool,
    },
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn config(&self) -> TransferConfig {
        TransferConfig::new(self.concurrency, self.page_size)
    }

    async fn run(self) -> Result<()> {
        let registry: Arc<InMemoryRegistry> = Arc::new(load_snapshot(&self.snapshot)?);
        let orchestrator: TransferOrchestrator<InMemoryRegistry> = TransferOrchestrator::new(
            Arc::clone(&registry),
            Reporter::new(&self.reporter),
            self.config(),
        );

        match &self.command {
            Command::Destinations { sections } => {
                let request: ListDestinationsRequest = ListDestinationsRequest {
                    sections: read_json::<Vec<SectionRecord>>(sections)?,
                };
                print_json(&list_destinations(&orchestrator, &request).await?)
            }
            Command::List { destination } => {
                require_reporter(&self.reporter)?;
                let request: DestinationRequest = parse_json_arg("destination", destination)?;
                print_json(&list_gradeable(&orchestrator, &request).await?)
            }
            Command::Submit {
                destination,
                decisions,
                save,
            } => {
                require_reporter(&self.reporter)?;
                let request: SubmitResultsRequest = SubmitResultsRequest {
                    destination: parse_json_arg("destination", destination)?,
                    results: read_json::<Vec<GradeDecisionRequest>>(decisions)?,
                };

                let response: SubmitResultsResponse =
                    submit_results(&orchestrator, &request).await?;
                info!(
                    success = response.summary.success,
                    error = response.summary.error,
                    "Submission finished"
                );

                if *save {
                    save_snapshot(&self.snapshot, &registry.snapshot().await)?;
                }
                print_json(&response)
            }
        }
    }
}

fn require_reporter(reporter: &str) -> Result<()> {
    if reporter.trim().is_empty() {
        return Err(eyre!("--reporter is required for this command"));
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<InMemoryRegistry> {
    let json: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read snapshot {}", path.display()))?;
    let registry: InMemoryRegistry = InMemoryRegistry::from_json(&json)
        .wrap_err_with(|| format!("Failed to parse snapshot {}", path.display()))?;
    debug!(path = %path.display(), "Loaded registry snapshot");
    Ok(registry)
}

fn save_snapshot(path: &Path, snapshot: &RegistrySnapshot) -> Result<()> {
    let json: String = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)
        .wrap_err_with(|| format!("Failed to write snapshot {}", path.display()))?;
    info!(path = %path.display(), "Saved registry snapshot");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

fn parse_json_arg<T: serde::de::DeserializeOwned>(name: &str, value: &str) -> Result<T> {
    serde_json::from_str(value).wrap_err_with(|| format!("--{name} is not valid JSON"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
