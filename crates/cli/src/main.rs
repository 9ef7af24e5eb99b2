//! MedQ - hospital queue console
//!
//! Composition root: wires providers, the session store and the queue
//! engine, then drives the engine from an interactive console. Which
//! commands are offered depends on the signed-in role; the engine itself
//! trusts its caller.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tabled::{Table, Tabled};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medq_core::application::{
    shutdown_channel, QueueEngine, SessionManager, SharedEngine, WaitEstimator,
};
use medq_core::domain::{Priority, QueueEntry, QueueStatus, SessionUser, UserRole};
use medq_core::fixture;
use medq_core::port::id_provider::UuidProvider;
use medq_core::port::time_provider::SystemTimeProvider;
use medq_core::port::{IdProvider, TimeProvider};
use medq_infra_fs::FileSessionStore;

const DEFAULT_TICK_SECS: u64 = 5;

#[derive(Parser)]
#[command(name = "medq")]
#[command(about = "MedQ hospital queue demo", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Session file path (defaults to the platform data directory)
    #[arg(long, env = "MEDQ_SESSION_PATH")]
    session_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        email: String,
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Start the interactive queue console
    Console {
        /// Estimator tick interval in seconds
        #[arg(long, env = "MEDQ_TICK_SECS", default_value_t = DEFAULT_TICK_SECS)]
        tick_secs: u64,
    },
}

fn init_tracing() {
    let log_format = std::env::var("MEDQ_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("medq=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

fn build_sessions(session_path: Option<PathBuf>) -> Result<SessionManager> {
    let store = match session_path {
        Some(path) => FileSessionStore::at(path),
        None => FileSessionStore::new().context("Failed to locate session storage")?,
    };
    Ok(SessionManager::new(
        fixture::users(),
        Arc::new(store),
        Arc::new(UuidProvider),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut sessions = build_sessions(cli.session_path)?;

    match cli.command {
        Commands::Login { email, password } => {
            let user = sessions
                .login(&email, &password)
                .map_err(|e| anyhow!("{e}"))?;
            println!(
                "{} {} ({})",
                "Signed in as".green(),
                user.name.bold(),
                user.role
            );
        }
        Commands::Logout => {
            sessions.logout().map_err(|e| anyhow!("{e}"))?;
            println!("{}", "Signed out".green());
        }
        Commands::Whoami => match sessions.restore() {
            Some(user) => println!("{} ({}) <{}>", user.name.bold(), user.role, user.email),
            None => println!("{}", "Not signed in".yellow()),
        },
        Commands::Console { tick_secs } => {
            run_console(sessions, tick_secs).await?;
        }
    }

    Ok(())
}

async fn run_console(mut sessions: SessionManager, tick_secs: u64) -> Result<()> {
    let Some(user) = sessions.restore() else {
        bail!("Not signed in; run `medq login <email> <password>` first");
    };

    // DI wiring: real providers, fixture-seeded engine
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let id_provider: Arc<dyn IdProvider> = Arc::new(UuidProvider);
    let engine: SharedEngine = Arc::new(Mutex::new(QueueEngine::new(
        fixture::clinics(),
        fixture::queue_entries(time_provider.now_millis()),
        id_provider.clone(),
        time_provider.clone(),
    )));

    // The estimator lives exactly as long as this console session
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let estimator = WaitEstimator::new(engine.clone(), Duration::from_secs(tick_secs.max(1)));
    let estimator_handle = tokio::spawn(estimator.run(shutdown_rx));

    info!(user_id = %user.id, role = %user.role, "Console session started");
    println!(
        "{} {} ({}) - type `help` for commands, `quit` to exit",
        "Welcome".green(),
        user.name.bold(),
        user.role
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = dispatch(line, &user, &engine, &sessions, &time_provider, &id_provider) {
            println!("{} {}", "error:".red(), e);
        }
    }

    shutdown_tx.shutdown();
    let _ = estimator_handle.await;
    info!("Console session ended");
    Ok(())
}

fn dispatch(
    line: &str,
    user: &SessionUser,
    engine: &SharedEngine,
    sessions: &SessionManager,
    time_provider: &Arc<dyn TimeProvider>,
    id_provider: &Arc<dyn IdProvider>,
) -> Result<()> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match cmd {
        "help" => print_help(user.role),
        "clinics" => {
            let engine = lock(engine)?;
            let rows: Vec<ClinicRow> = engine
                .clinics()
                .into_iter()
                .map(|c| {
                    let waiting = engine
                        .clinic_queue(&c.id)
                        .iter()
                        .filter(|e| e.status != QueueStatus::Serving)
                        .count();
                    ClinicRow {
                        id: c.id,
                        name: c.name,
                        status: c.status.to_string(),
                        waiting,
                        avg_wait: format!("{} min", c.average_wait_minutes),
                        served: c.total_served,
                    }
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        "queue" => {
            let clinic_id = clinic_arg(&args, user)?;
            let engine = lock(engine)?;
            if engine.clinic(&clinic_id).is_none() {
                bail!("clinic not found: {clinic_id}");
            }
            let view = engine.clinic_queue(&clinic_id);
            if view.is_empty() {
                println!("{}", "Queue is empty".yellow());
            } else {
                println!("{}", Table::new(view.iter().map(queue_row)));
            }
        }
        "join" => {
            require_role(user, &[UserRole::Patient])?;
            let clinic_id = args
                .first()
                .ok_or_else(|| anyhow!("usage: join <clinic> [urgent]"))?;
            let priority = parse_priority(args.get(1).copied())?;
            let entry = lock(engine)?
                .join_queue(&user.id, &user.name, clinic_id, priority)
                .map_err(|e| anyhow!("{e}"))?;
            println!(
                "{} queue number {} (estimated wait {} min)",
                "Joined:".green(),
                entry.queue_number.to_string().bold(),
                entry.estimated_wait_minutes
            );
        }
        "walkin" => {
            require_role(user, &[UserRole::Receptionist, UserRole::Admin])?;
            if args.len() < 2 {
                bail!("usage: walkin <clinic> <patient name...> [urgent]");
            }
            let clinic_id = args[0];
            let (name_parts, priority) = match args.last() {
                Some(&"urgent") => (&args[1..args.len() - 1], Priority::Urgent),
                _ => (&args[1..], Priority::Normal),
            };
            if name_parts.is_empty() {
                bail!("usage: walkin <clinic> <patient name...> [urgent]");
            }
            // Walk-ins have no account; give them a synthetic patient id
            let patient_id = format!("walk-in-{}", id_provider.generate_id());
            let entry = lock(engine)?
                .join_queue(&patient_id, &name_parts.join(" "), clinic_id, priority)
                .map_err(|e| anyhow!("{e}"))?;
            println!(
                "{} {} as queue number {}",
                "Registered:".green(),
                entry.patient_name.bold(),
                entry.queue_number
            );
        }
        "leave" => {
            require_role(user, &[UserRole::Patient])?;
            let mut engine = lock(engine)?;
            let entry = engine
                .patient_queue(&user.id, args.first().copied())
                .ok_or_else(|| anyhow!("you are not in any queue"))?;
            engine.leave_queue(&entry.id).map_err(|e| anyhow!("{e}"))?;
            println!("{} {}", "Left queue for clinic".green(), entry.clinic_id);
        }
        "me" => {
            require_role(user, &[UserRole::Patient])?;
            let engine = lock(engine)?;
            match engine.patient_queue(&user.id, None) {
                Some(entry) => {
                    let ahead = engine.waiting_count(&entry);
                    println!("{}", Table::new([queue_row(&entry)]));
                    println!(
                        "{} patient(s) ahead of you, estimated wait {} min",
                        ahead, entry.estimated_wait_minutes
                    );
                }
                None => println!("{}", "You are not in any queue".yellow()),
            }
        }
        "call" => {
            require_role(user, &[UserRole::Doctor])?;
            let clinic_id = clinic_arg(&args, user)?;
            let called = lock(engine)?
                .call_next_patient(&clinic_id)
                .map_err(|e| anyhow!("{e}"))?;
            println!(
                "{} #{} {} ({})",
                "Now serving:".green(),
                called.queue_number,
                called.patient_name.bold(),
                called.priority
            );
        }
        "done" => {
            require_role(user, &[UserRole::Doctor])?;
            let clinic_id = clinic_arg(&args, user)?;
            let mut engine = lock(engine)?;
            let serving = engine
                .clinic_queue(&clinic_id)
                .into_iter()
                .find(|e| e.status == QueueStatus::Serving)
                .ok_or_else(|| anyhow!("no patient is being served"))?;
            engine
                .mark_patient_done(&serving.id)
                .map_err(|e| anyhow!("{e}"))?;
            println!("{} {}", "Done:".green(), serving.patient_name.bold());
        }
        "stats" => {
            require_role(user, &[UserRole::Admin])?;
            let stats = lock(engine)?.system_stats(sessions.users());
            println!("patients:       {}", stats.total_patients);
            println!("doctors:        {}", stats.total_doctors);
            println!("staff:          {}", stats.total_staff);
            println!(
                "clinics:        {} ({} active)",
                stats.total_clinics, stats.active_clinics
            );
            println!("in queue:       {}", stats.total_in_queue);
            println!("served today:   {}", stats.total_served_today);
            println!("avg wait:       {} min", stats.average_wait_minutes);
        }
        "refresh" => {
            require_role(user, &[UserRole::Admin])?;
            lock(engine)?.refresh(
                fixture::clinics(),
                fixture::queue_entries(time_provider.now_millis()),
            );
            println!("{}", "State reset from fixtures".green());
        }
        other => bail!("unknown command: {other} (try `help`)"),
    }
    Ok(())
}

fn lock(engine: &SharedEngine) -> Result<std::sync::MutexGuard<'_, QueueEngine>> {
    engine.lock().map_err(|_| anyhow!("engine lock poisoned"))
}

/// Clinic from the first argument, falling back to the doctor's assignment
fn clinic_arg(args: &[&str], user: &SessionUser) -> Result<String> {
    if let Some(&clinic_id) = args.first() {
        return Ok(clinic_id.to_string());
    }
    user.clinic_id
        .clone()
        .ok_or_else(|| anyhow!("no clinic given and none assigned to you"))
}

fn parse_priority(arg: Option<&str>) -> Result<Priority> {
    match arg {
        None | Some("normal") => Ok(Priority::Normal),
        Some("urgent") => Ok(Priority::Urgent),
        Some(other) => bail!("unknown priority: {other}"),
    }
}

fn require_role(user: &SessionUser, allowed: &[UserRole]) -> Result<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        bail!("command not available for role {}", user.role)
    }
}

fn print_help(role: UserRole) {
    println!("available commands:");
    println!("  clinics                    list clinics");
    println!("  queue [clinic]             show a clinic's queue");
    match role {
        UserRole::Patient => {
            println!("  join <clinic> [urgent]     join a clinic's queue");
            println!("  leave [clinic]             leave your queue");
            println!("  me                         show your queue position");
        }
        UserRole::Doctor => {
            println!("  call [clinic]              call the next patient");
            println!("  done [clinic]              finish the current patient");
        }
        UserRole::Receptionist => {
            println!("  walkin <clinic> <name...> [urgent]  register a walk-in patient");
        }
        UserRole::Admin => {
            println!("  walkin <clinic> <name...> [urgent]  register a walk-in patient");
            println!("  stats                      system statistics");
            println!("  refresh                    reset state from fixtures");
        }
    }
    println!("  quit                       exit the console");
}

#[derive(Tabled)]
struct ClinicRow {
    id: String,
    name: String,
    status: String,
    waiting: usize,
    #[tabled(rename = "avg wait")]
    avg_wait: String,
    served: u32,
}

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "#")]
    number: u32,
    patient: String,
    status: String,
    priority: String,
    #[tabled(rename = "est. wait")]
    wait: String,
}

fn queue_row(entry: &QueueEntry) -> QueueRow {
    let status = match entry.status {
        QueueStatus::Serving => entry.status.to_string().green().to_string(),
        QueueStatus::Almost => entry.status.to_string().yellow().to_string(),
        _ => entry.status.to_string(),
    };
    let priority = match entry.priority {
        Priority::Urgent => entry.priority.to_string().red().to_string(),
        Priority::Normal => entry.priority.to_string(),
    };
    QueueRow {
        number: entry.queue_number,
        patient: entry.patient_name.clone(),
        status,
        priority,
        wait: format!("{} min", entry.estimated_wait_minutes),
    }
}
