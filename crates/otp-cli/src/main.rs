//! # otp CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use otp_cli::auth::{run_login, run_logout, LoginArgs};
use otp_cli::fetch::{run_fetch, FetchArgs};
use otp_cli::profile::{run_profile, ProfileArgs};
use otp_cli::slide::{run_slide, SlideArgs};

/// OTP profile toolkit
///
/// Manages the session token, sends authenticated API requests, edits and
/// saves the player profile, and previews slide transitions.
#[derive(Parser, Debug)]
#[command(name = "otp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs and slide frames as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a session token.
    Login(LoginArgs),

    /// Remove the stored session token.
    Logout,

    /// Send an authenticated request and print the response.
    Fetch(FetchArgs),

    /// Show, edit and save the profile.
    Profile(ProfileArgs),

    /// Print the frames of a slide transition.
    Slide(SlideArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    if cli.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "otp CLI starting");

    let result = match cli.command {
        Commands::Login(args) => run_login(&args, &otp_cli::credential_store()),
        Commands::Logout => run_logout(&otp_cli::credential_store()),
        Commands::Fetch(args) => match otp_cli::client_from_env() {
            Ok(client) => run_fetch(&args, &client).await,
            Err(e) => Err(e),
        },
        Commands::Profile(args) => run_profile(&args).await,
        Commands::Slide(args) => run_slide(&args, cli.json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
