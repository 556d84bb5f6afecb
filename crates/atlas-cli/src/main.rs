mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atlas-cli")]
#[command(about = "Inspect, expand and sanitize Google Maps links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether a link is an accepted Google Maps URL
    Validate { url: String },
    /// Extract place name, coordinates and country from a link
    Parse {
        url: String,
        /// Never expand short links
        #[arg(long)]
        offline: bool,
    },
    /// Resolve a short link to the full URL it redirects to
    Expand { url: String },
    /// Escape and bound free text the way it is stored
    Sanitize {
        text: String,
        /// Maximum length in characters
        #[arg(long, default_value_t = atlas_core::DEFAULT_MAX_LENGTH)]
        max_length: usize,
        /// Escape for display, without the length limit or NUL stripping
        #[arg(long)]
        display: bool,
    },
    /// Build a place suggestion from a link and a reason
    Draft {
        #[arg(long)]
        url: String,
        #[arg(long)]
        reason: String,
        /// Overrides the name extracted from the link
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        offline: bool,
    },
    /// Check sign-up fields and show the display name derived from the email
    CheckSignup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value_t = atlas_core::DEFAULT_MIN_PASSWORD_LENGTH)]
        min_password_length: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { url } => commands::run_validate(&url),
        Commands::Parse { url, offline } => commands::run_parse(&url, offline).await,
        Commands::Expand { url } => commands::run_expand(&url).await,
        Commands::Sanitize {
            text,
            max_length,
            display,
        } => {
            println!("{}", commands::sanitize_text(&text, max_length, display));
            Ok(())
        }
        Commands::Draft {
            url,
            reason,
            name,
            offline,
        } => commands::run_draft(&url, &reason, name.as_deref(), offline).await,
        Commands::CheckSignup {
            email,
            password,
            min_password_length,
        } => commands::run_check_signup(&email, password.as_deref(), min_password_length),
    }
}
