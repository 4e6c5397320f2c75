//! Bazaar CLI - Browse the catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the category strip shown on the home page
//! bazaar categories
//!
//! # List the products in one category
//! bazaar category home-decor
//! ```
//!
//! # Commands
//!
//! - `categories` - Summarize categories from a product sample
//! - `category <slug>` - Show a category page
//!
//! Configuration is read from the environment (see `bazaar_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::error::AppError;
use bazaar_storefront::state::AppState;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar catalog browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show up to seven categories derived from a product sample
    Categories,
    /// Show the products in a category
    Category {
        /// Category slug, e.g. `home-decor`
        slug: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_storefront=info,bazaar_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[allow(clippy::print_stderr)]
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            let err = AppError::from(e);
            err.report();
            eprintln!("error: {}", err.user_message());
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, config).await {
        let message = match &e {
            CommandError::App(app) => {
                app.report();
                app.user_message()
            }
            CommandError::Load(message) => {
                tracing::error!("Command failed: {message}");
                message.clone()
            }
        };
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CommandError> {
    let state = AppState::new(config).map_err(AppError::from)?;

    let output = match cli.command {
        Commands::Categories => commands::browse::categories(&state).await?,
        Commands::Category { slug } => commands::browse::category(&state, &slug).await?,
    };

    print!("{output}");
    Ok(())
}
