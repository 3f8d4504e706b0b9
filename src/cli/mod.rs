//
//  github-explorer
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Agent command line using clap derive macros

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::api::common::{ApiError, Paginator};
use crate::api::{GraphQlClient, GraphQlTransport, QueryCatalog};
use crate::config::Config;
use crate::output::{
    format_status, print_field, print_header, OutputFormat, OutputWriter, TableBuilder,
    TableOutput,
};
use crate::reports::{GitHubExplorer, ReportData, ReportName};
use crate::store::{ChunkedStore, DocumentStore, FileStore, ReportStore};
use crate::util::{format_duration, truncate};

/// Longest response body echoed into the log.
const LOGGED_BODY_CHARS: usize = 2000;

/// explorer-agent - Harvest GitHub Enterprise data into the report store
#[derive(Parser, Debug)]
#[command(
    name = "explorer-agent",
    version,
    about = "Harvest GitHub Enterprise organisation data into the report store",
    long_about = "explorer-agent runs one report against every configured organisation \
                  through the GitHub GraphQL API and persists the results.\n\n\
                  Configuration is read from GITHUB_API_BASE_URI, GITHUB_ENTERPRISE_NAME, \
                  GITHUB_ORGANISATIONS and GITHUB_TOKEN.",
    after_help = "Reports: all_members, all_teams, all_repositories, all_owners, \
                  all_two_factor_disabled, all_users_contributions, all_inactive_users, \
                  all_members_teams, teamless_members"
)]
pub struct Cli {
    /// Report to run
    #[arg(value_name = "REPORT")]
    pub report: String,

    /// Print the assembled report data as JSON
    #[arg(long)]
    pub json: bool,

    /// Run the report without persisting it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Validates the report name and configuration, then runs the agent
    /// against the GitHub API and the file document store.
    pub async fn run(&self) -> Result<()> {
        let report: ReportName = self.report.parse()?;
        let config = Config::from_env()?;

        let transport: Arc<dyn GraphQlTransport> = Arc::new(
            GraphQlClient::from_config(&config).context("Failed to create GitHub API client")?,
        );
        let store_dir = config.data_dir()?;
        let store: Arc<dyn DocumentStore> = Arc::new(FileStore::new(&store_dir));

        tracing::debug!(?config, store = %store_dir.display(), "Loaded configuration");

        let agent = Agent::new(config, transport, store);
        let summary = agent.run(report, self.dry_run).await?;

        let output = OutputWriter::new(OutputFormat::from_flag(self.json));
        if output.format() == OutputFormat::Table {
            print_field("Store", &store_dir.display().to_string(), console::colors_enabled());
            println!();
        }
        output.write(&summary)?;

        if summary.dry_run {
            output.write_warning("Dry run: nothing was persisted");
        } else {
            output.write_success(&format!(
                "Persisted {} for {} organisation(s)",
                report,
                summary.runs.len()
            ));
        }
        Ok(())
    }
}

/// Runs one report over every configured organisation.
pub struct Agent {
    config: Config,
    transport: Arc<dyn GraphQlTransport>,
    store: Arc<dyn DocumentStore>,
}

impl Agent {
    pub fn new(
        config: Config,
        transport: Arc<dyn GraphQlTransport>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    /// Assembles the report for every organisation and, unless `dry_run`,
    /// persists the results.
    ///
    /// Nothing is persisted unless every organisation succeeded.
    pub async fn run(&self, report: ReportName, dry_run: bool) -> Result<AgentSummary> {
        let catalog = Arc::new(QueryCatalog::with_page_sizes(
            self.config.light_page_size,
            self.config.heavy_page_size,
        ));

        let mut runs = Vec::with_capacity(self.config.organisations.len());
        for organisation in &self.config.organisations {
            let paginator = Paginator::new(self.transport.clone(), catalog.clone())
                .with_pause(self.config.page_pause);
            let explorer = GitHubExplorer::new(paginator, &self.config.enterprise, organisation);

            let started = Instant::now();
            let data = explorer.run(report).await.map_err(|e| {
                log_api_error(&e, report, organisation);
                anyhow::Error::new(e)
                    .context(format!("Report '{report}' failed for organisation '{organisation}'"))
            })?;

            runs.push(OrganisationRun {
                organisation: organisation.clone(),
                records: data.len(),
                chunks: None,
                elapsed: started.elapsed(),
                persisted: false,
                data,
            });
        }

        if !dry_run {
            for run in &mut runs {
                let reports = ReportStore::new(
                    ChunkedStore::new(self.store.clone()).with_chunk_size(self.config.chunk_size),
                    &run.organisation,
                );
                let outcome = reports.save(report, &run.data).await.with_context(|| {
                    format!(
                        "Failed to persist '{report}' for organisation '{}'",
                        run.organisation
                    )
                })?;
                run.chunks = Some(outcome.chunks);
                run.persisted = true;
            }
        }

        Ok(AgentSummary {
            report: report.as_str(),
            dry_run,
            runs,
        })
    }
}

fn log_api_error(error: &ApiError, report: ReportName, organisation: &str) {
    match error {
        ApiError::GraphQl(n) => tracing::error!(
            %report,
            organisation,
            message = %n.message,
            error_type = n.error_type.as_deref().unwrap_or("-"),
            "GitHub GraphQL API error"
        ),
        ApiError::Transport(n) => tracing::error!(
            %report,
            organisation,
            message = %n.message,
            status_code = ?n.status_code,
            body = %truncate(n.response_body.as_deref().unwrap_or(""), LOGGED_BODY_CHARS),
            retryable = error.is_retryable(),
            "GitHub API transport error"
        ),
        other => tracing::error!(
            %report,
            organisation,
            category = other.category(),
            error = %other,
            "Report failed"
        ),
    }
}

/// One organisation's report result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationRun {
    pub organisation: String,
    pub records: usize,
    /// Chunk documents written; `None` until persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<usize>,
    #[serde(serialize_with = "serialize_millis", rename = "elapsedMs")]
    pub elapsed: Duration,
    pub persisted: bool,
    pub data: ReportData,
}

/// Every organisation's result for one report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub report: &'static str,
    pub dry_run: bool,
    pub runs: Vec<OrganisationRun>,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl TableOutput for AgentSummary {
    fn print_table(&self, color: bool) {
        print_header(&format!("Report {}", self.report));

        let mut table = TableBuilder::new()
            .color(color)
            .headers(["Organisation", "Records", "Chunks", "Elapsed", "Status"])
            .numeric_columns([1, 2]);

        for run in &self.runs {
            let status = if run.persisted { "persisted" } else { "dry run" };
            table = table.row([
                run.organisation.clone(),
                run.records.to_string(),
                run.chunks.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
                format_duration(run.elapsed),
                format_status(status, color),
            ]);
        }

        table.print();
    }
}
