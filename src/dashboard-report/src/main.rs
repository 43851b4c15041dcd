//! Dashboard Report: fetches a purchase report from a running dashboard
//! server and writes the rendered dashboard and/or the CSV export.

use chrono::Local;
use clap::{Parser, ValueEnum};
use dashboard_client::{default_range, Column, Dashboard, Phase, ReportClient, SortDirection};
use dashboard_core::config::{AppConfig, DisplayLanguage};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Language {
    Hebrew,
    English,
}

impl From<Language> for DisplayLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Hebrew => DisplayLanguage::Hebrew,
            Language::English => DisplayLanguage::English,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dashboard-report")]
#[command(about = "Render the purchase dashboard or export it as CSV")]
#[command(version)]
struct Cli {
    /// Base URL of the dashboard server
    #[arg(long, env = "DASHBOARD_URL", default_value = "http://localhost:3000")]
    server: String,

    /// First day of the range (default: 30 days ago)
    #[arg(long)]
    start_date: Option<String>,

    /// Last day of the range (default: today)
    #[arg(long)]
    end_date: Option<String>,

    /// Keep only rows where any field contains this text
    #[arg(long)]
    search: Option<String>,

    /// Column to sort by, e.g. `revenue` or `firstSource`
    #[arg(long)]
    sort: Option<Column>,

    /// Sort descending instead of ascending
    #[arg(long, default_value_t = false, requires = "sort")]
    desc: bool,

    /// Table page to render
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Display language (overrides config)
    #[arg(long, value_enum)]
    language: Option<Language>,

    /// Write the rendered dashboard HTML here
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write the CSV export here (default name: purchases_<start>_to_<end>.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the CSV export into the current directory under its default name
    #[arg(long, default_value_t = false, conflicts_with = "csv")]
    export: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_report=info,dashboard_client=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let mut display = AppConfig::load()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })
        .display;
    if let Some(language) = cli.language {
        display.language = language.into();
    }

    let defaults = default_range(Local::now().date_naive());
    let start_date = cli.start_date.unwrap_or(defaults.start_date);
    let end_date = cli.end_date.unwrap_or(defaults.end_date);

    let client = ReportClient::new(&cli.server)?;
    info!(endpoint = %client.endpoint(), start_date = %start_date, end_date = %end_date, "Requesting report");

    let mut dashboard = Dashboard::new(client, display);
    match dashboard.fetch(&start_date, &end_date).await {
        Phase::Error(message) => warn!(error = %message, "Report could not be loaded"),
        Phase::Empty => info!("No purchases in range"),
        _ => {}
    }

    if let Some(query) = &cli.search {
        dashboard.search(query);
    }
    if let Some(column) = cli.sort {
        let wanted = if cli.desc { SortDirection::Desc } else { SortDirection::Asc };
        // Clicking an inactive header sorts ascending; a second click flips it.
        dashboard.sort(column);
        if dashboard.state().sort().direction != wanted {
            dashboard.sort(column);
        }
    }
    dashboard.go_to_page(cli.page);

    if let Some(path) = &cli.html {
        std::fs::write(path, dashboard.render_page())?;
        info!(path = %path.display(), "Dashboard written");
    }

    if cli.csv.is_some() || cli.export {
        match dashboard.export()? {
            Some(export) => {
                let path = cli.csv.clone().unwrap_or_else(|| PathBuf::from(&export.filename));
                std::fs::write(&path, export.content)?;
                info!(
                    path = %path.display(),
                    rows = dashboard.state().filtered_rows().len(),
                    "CSV export written"
                );
            }
            None => warn!("Nothing to export"),
        }
    }

    if let Phase::Error(message) = dashboard.state().phase() {
        anyhow::bail!("{message}");
    }
    Ok(())
}
