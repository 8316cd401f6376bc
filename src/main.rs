use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use jb_app::usecases::LaunchPlan;
use jb_app::{RecoveryOutcome, SessionRuntime};
use jb_core::auth::AuthSession;
use jb_core::navigation::Route;
use jb_core::onboarding::OnboardingSignals;
use jb_core::recovery::RecoveryState;
use jb_core::user::{UserProfile, UserRecord, UserRole};
use jobboard_lib::bootstrap::{self, tracing::init_tracing_subscriber, AppServices};
use jobboard_lib::prompt::ConsoleRecoveryPrompt;

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "JobBoard session core: auth, onboarding routing and recovery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config_dir>/jobboard/config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the key-value store file
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the launch, mount the session and print the route
    Launch {
        /// Deep-link target; skips navigation restore
        #[arg(long)]
        deep_link: Option<String>,
    },

    /// Log in and persist the session
    Login {
        #[arg(long)]
        id: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        name: Option<String>,
    },

    /// Clear the stored session and mode preference
    Logout,

    /// Mount the session and print auth, onboarding and route
    Status,

    /// Update the signed-in user's onboarding record
    Profile {
        #[arg(long)]
        city: Option<String>,

        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        #[arg(long)]
        completed: bool,
    },

    /// Persist a serialized navigation tree
    Navigate {
        /// JSON navigation state
        blob: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Worker,
    Employer,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Worker => UserRole::Worker,
            RoleArg::Employer => UserRole::Employer,
        }
    }
}

#[derive(Serialize)]
struct SessionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    launch: Option<LaunchPlan>,
    route: Route,
    auth: AuthSession,
    onboarding: OnboardingSignals,
    recovery: RecoveryState,
}

impl SessionReport {
    fn capture(runtime: &SessionRuntime) -> Self {
        Self {
            launch: None,
            route: runtime.route(),
            auth: runtime.auth_session(),
            onboarding: runtime.onboarding_signals(),
            recovery: runtime.recovery_state(),
        }
    }

    fn print(&self) -> anyhow::Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(self).context("Failed to render report")?
        );
        Ok(())
    }
}

/// Run recovery to completion, remounting after a forced logout.
async fn settle(runtime: SessionRuntime) -> SessionRuntime {
    match runtime.drive_recovery().await {
        RecoveryOutcome::ForcedLogout { attempts } => {
            warn!(attempts, "session was reset by recovery");
            runtime.remount().await
        }
        _ => runtime,
    }
}

async fn run(command: Commands, services: AppServices) -> anyhow::Result<ExitCode> {
    let report = match command {
        Commands::Launch { deep_link } => {
            let plan = services.launch.execute(deep_link.as_deref()).await;
            let runtime = settle(SessionRuntime::mount(services.session).await).await;
            SessionReport {
                launch: Some(plan),
                ..SessionReport::capture(&runtime)
            }
        }
        Commands::Login { id, email, name } => {
            let mut user = UserProfile::new(id, email);
            if let Some(name) = name {
                user = user.with_name(name);
            }
            let runtime = SessionRuntime::mount(services.session).await;
            runtime.login(user).await;
            SessionReport::capture(&settle(runtime).await)
        }
        Commands::Logout => {
            let runtime = SessionRuntime::mount(services.session).await;
            runtime.logout().await;
            SessionReport::capture(&runtime)
        }
        Commands::Status => {
            let runtime = settle(SessionRuntime::mount(services.session).await).await;
            SessionReport::capture(&runtime)
        }
        Commands::Profile {
            city,
            role,
            completed,
        } => {
            let runtime = SessionRuntime::mount(services.session).await;
            let Some(user_id) = runtime.auth_session().user_id().map(str::to_string) else {
                eprintln!("Not logged in.");
                return Ok(ExitCode::FAILURE);
            };
            let mut record = services
                .onboarding
                .load_user_record(&user_id)
                .await?
                .unwrap_or_else(|| UserRecord::new(&user_id));
            if city.is_some() {
                record.city = city;
            }
            if let Some(role) = role {
                record.role = Some(role.into());
            }
            record.profile_completed |= completed;
            services.onboarding.save_user_record(&record).await?;
            runtime.check_auth_status().await;
            SessionReport::capture(&settle(runtime).await)
        }
        Commands::Navigate { blob } => {
            serde_json::from_str::<serde_json::Value>(&blob)
                .context("Navigation state must be JSON")?;
            let written = services.navigation.persist(blob).await?;
            info!(written, "navigation state persisted");
            return Ok(if written {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
    };

    report.print()?;
    Ok(if report.auth.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = bootstrap::resolve_config(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    if let Err(err) =
        init_tracing_subscriber(config.log_level.as_deref(), config.log_file.as_deref())
    {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let services = bootstrap::wire_dependencies(&config, Arc::new(ConsoleRecoveryPrompt))?;
    run(cli.command, services).await
}
