//! Minion agent container entrypoint.
//!
//! Establishes the ephemeral credential store for the backing agent, then
//! hands the process over to the `acp2rt` protocol adapter. One-shot: any
//! failure is fatal and surfaces as a non-zero container exit; success is
//! never observed as an exit code because the process becomes the adapter.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use minion_boot_core::application::bootstrap::{self, BootstrapSettings};
use minion_boot_core::domain::LaunchProfile;
use minion_boot_core::port::environment::SystemEnvironment;
use minion_boot_infra_system::{ExecProcessHost, FsCredentialStore, SupervisedProcessHost};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_WORKSPACE_PATH: &str = "/workspace";
const DEFAULT_CREDENTIAL_HOME: &str = "/root/.codex";

#[derive(Parser)]
#[command(name = "minion-boot")]
#[command(about = "Bootstrap an agent container and hand off to the protocol adapter")]
#[command(version)]
struct Cli {
    /// Agent launch profile
    #[arg(long, value_enum, env = "MINION_BOOT_PROFILE", default_value = "minimal")]
    profile: Profile,

    /// Workspace mount forwarded to the protocol adapter
    #[arg(long, default_value = DEFAULT_WORKSPACE_PATH)]
    workspace_path: PathBuf,

    /// Ephemeral credential home for the backing agent
    #[arg(long, default_value = DEFAULT_CREDENTIAL_HOME)]
    credential_home: PathBuf,

    /// Supervise the adapter as a child (signal-relaying PID 1) instead of
    /// exec-ing over the bootstrap
    #[arg(long, env = "MINION_BOOT_SUPERVISE")]
    supervise: bool,
}

/// CLI mirror of the core launch profile (core stays clap-free)
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// Provider selection only
    Minimal,
    /// Never prompt, agent sandbox disabled; the container is the boundary
    Autonomous,
}

impl From<Profile> for LaunchProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Minimal => LaunchProfile::Minimal,
            Profile::Autonomous => LaunchProfile::Autonomous,
        }
    }
}

fn init_logging() {
    let log_format =
        std::env::var("MINION_BOOT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("Failed to create env filter");

    // stderr only: stdout becomes the adapter's protocol stream after the
    // hand-off, and must stay clean before it
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    info!("minion-boot v{} starting", VERSION);

    let store = FsCredentialStore::new(&cli.credential_home);
    let settings = BootstrapSettings {
        profile: cli.profile.into(),
        workspace_path: cli.workspace_path.clone(),
    };

    let result = if cli.supervise {
        bootstrap::run(&SystemEnvironment, &store, &SupervisedProcessHost, &settings)
    } else {
        bootstrap::run(&SystemEnvironment, &store, &ExecProcessHost, &settings)
    };

    // Reachable only on failure: a successful hand-off never returns
    if let Err(e) = result {
        error!(error = %e, "bootstrap failed");
        return Err(e.into());
    }
    Ok(())
}
