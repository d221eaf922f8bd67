use std::path::PathBuf;
use std::process::ExitCode;

use askama::Template;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use booking_ui::behaviors::booking;
use booking_ui::config::{ConfigError, UiConfig};
use booking_ui::platform::SystemPlatform;
use booking_ui::templates::PreviewTemplate;
use booking_ui::theme::{ThemeConfig, ThemeError};
use booking_ui::{Page, UiError};

/// Booking site UI tooling.
#[derive(Parser)]
#[command(name = "booking-ui")]
#[command(version, about = "Render and check the booking site's UI assets", long_about = None)]
struct Cli {
    /// JSON file overriding the default timings and search form profile
    #[arg(long, env = "BOOKING_UI_CONFIG")]
    config: Option<PathBuf>,

    /// JSON file overriding the default theme
    #[arg(long, env = "BOOKING_UI_THEME")]
    theme: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the theme stylesheet
    Css,

    /// Print the booking confirmation fragment
    Dialog {
        /// Booking reference to show
        reference: String,
    },

    /// Print a standalone page with the stylesheet and a confirmation dialog
    Preview {
        /// Booking reference to show
        reference: String,
    },

    /// Attach behaviors to an HTML page and report which ones were wired
    Check {
        /// Page to check
        page: PathBuf,

        /// Treat the page as publishing date inventory
        #[arg(long)]
        available_dates: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Ui(#[from] UiError),

    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),

    #[error("failed to read page {}: {source}", path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("booking_ui=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => UiConfig::load(path)?,
        None => UiConfig::default(),
    };
    let theme = match &cli.theme {
        Some(path) => ThemeConfig::load(path)?,
        None => ThemeConfig::default(),
    };
    debug!(profile = ?config.search_profile, "configuration loaded");

    match cli.command {
        Commands::Css => print!("{}", theme.to_css()),

        Commands::Dialog { reference } => {
            println!("{}", booking::confirmation_markup(&reference)?);
        }

        Commands::Preview { reference } => {
            let dialog = booking::confirmation_markup(&reference)?;
            let stylesheet = theme.to_css();
            let page = PreviewTemplate {
                title: "Booking confirmation preview",
                stylesheet: &stylesheet,
                dialog: &dialog,
            };
            println!("{}", page.render()?);
        }

        Commands::Check {
            page,
            available_dates,
        } => {
            let html = std::fs::read_to_string(&page).map_err(|source| CliError::Page {
                path: page.clone(),
                source,
            })?;
            if !theme.scans(&page.to_string_lossy()) {
                warn!(page = %page.display(), "page is outside the theme's content globs");
            }

            let mut ui = Page::from_html(&html, SystemPlatform::new(false), config)
                .with_available_dates(available_dates);
            let behaviors = ui.bootstrap()?.summary();
            if behaviors.is_empty() {
                println!("{}: no behaviors attached", page.display());
            } else {
                println!("{}:", page.display());
                for behavior in behaviors {
                    println!("  {behavior}");
                }
            }
        }
    }

    Ok(())
}
