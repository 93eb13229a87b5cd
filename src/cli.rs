/// # folio CLI interface
///
/// Command parsing and orchestration for the `folio` binary. Rendering, fetching
/// and aggregation live in `folio-core`; this module only wires config, core calls
/// and output together.
///
/// - [`Cli`] and [`Commands`] define the user-facing subcommands.
/// - [`run`] is the async entrypoint shared by `main()` and integration tests.
use crate::export::export_cv;
use crate::load_config::{load_config, load_profile};
use crate::summary::render_summary;
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use folio_core::cv::DocumentFormat;
use folio_core::dashboard::{load_dashboard, DEFAULT_TOP_N};
use folio_core::github::GitHubClient;
use folio_core::model::Language;
use std::path::PathBuf;

/// CLI for folio: CV exports and GitHub activity.
#[derive(Parser)]
#[clap(
    name = "folio",
    version,
    about = "Export a CV as CSV, text, LaTeX or PDF and summarise GitHub activity"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the CV documents into the configured output directory
    Export {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Document format to produce
        #[clap(long, value_enum, default_value_t = FormatArg::All)]
        format: FormatArg,
        /// Display language (pt or en); both when omitted
        #[clap(long)]
        lang: Option<Language>,
    },
    /// Fetch GitHub profile, repositories and events and print the dashboard
    Dashboard {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Print the dashboard as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Text,
    Latex,
    Pdf,
    All,
}

impl FormatArg {
    pub fn formats(self) -> Vec<DocumentFormat> {
        match self {
            FormatArg::Csv => vec![DocumentFormat::Csv],
            FormatArg::Text => vec![DocumentFormat::Text],
            FormatArg::Latex => vec![DocumentFormat::Latex],
            FormatArg::Pdf => vec![DocumentFormat::Pdf],
            FormatArg::All => DocumentFormat::ALL.to_vec(),
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Export {
            config,
            format,
            lang,
        } => {
            let config = load_config(config)?;
            let data = load_profile(&config.profile)?;
            let languages = lang.map(|l| vec![l]).unwrap_or_else(|| Language::ALL.to_vec());
            tracing::info!(command = "export", ?format, ?languages, "Starting export");

            let written = export_cv(
                &data,
                &format.formats(),
                &languages,
                &config.export.output_dir,
                &config.export.pdf_options(),
                Utc::now(),
            )
            .map_err(|e| {
                tracing::error!(command = "export", error = %e, "Export failed");
                e
            })?;
            for path in &written {
                println!("{}", path.display());
            }
            tracing::info!(command = "export", files = written.len(), "Export complete");
            Ok(())
        }
        Commands::Dashboard { config, json } => {
            let config = load_config(config)?;
            let github = config
                .github
                .ok_or_else(|| anyhow::anyhow!("Config has no github section"))?;
            tracing::info!(command = "dashboard", ?github, "Loading dashboard");

            let client = GitHubClient::new(github.client_config())
                .map_err(|e| anyhow::anyhow!("Failed to construct GitHub client: {e}"))?;
            let dashboard = match load_dashboard(&client, DEFAULT_TOP_N).await {
                Ok(dashboard) => dashboard,
                Err(e) => {
                    tracing::error!(command = "dashboard", error = %e, "Dashboard failed to load");
                    eprintln!("Failed to load GitHub activity: {e}");
                    eprintln!("Run `folio export` to produce the CV documents without it.");
                    return Err(anyhow::Error::msg(e));
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", render_summary(&dashboard));
            }
            tracing::info!(command = "dashboard", "Dashboard printed");
            Ok(())
        }
    }
}
