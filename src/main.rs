//! `route-gate`: inspect a route table and run navigations through the gate.
//!
//! ```text
//! route-gate check
//! route-gate --config routes.toml resolve /patients/42
//! route-gate navigate /profile --token abc --session session.json
//! route-gate session show --session session.json
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

use route_gate::config::{load_config, RouteTableConfig};
use route_gate::observability::logging::init_logging;
use route_gate::session::{FileSessionStore, MemorySessionStore, SessionKey, SessionStore};
use route_gate::{NavigationGate, NavigationGuard, RouteTable};

#[derive(Parser)]
#[command(name = "route-gate")]
#[command(about = "Inspect the route table and exercise the navigation guard", long_about = None)]
struct Cli {
    /// Route table configuration (TOML). Uses the built-in table when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and print it
    Check,
    /// Show which route a path resolves to
    Resolve {
        path: String,
    },
    /// Run a navigation through the gate
    Navigate(NavigateArgs),
    /// Inspect a persisted session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(Args)]
struct NavigateArgs {
    /// Requested path
    path: String,

    /// Evaluate a single gate call instead of following redirects
    #[arg(long)]
    once: bool,

    /// Current path, reported to the gate with --once
    #[arg(long)]
    from: Option<String>,

    /// Persist the session in this JSON file
    #[arg(long)]
    session: Option<PathBuf>,

    /// Set the session token before navigating
    #[arg(long)]
    token: Option<String>,

    /// Set the user id before navigating
    #[arg(long)]
    user_id: Option<String>,

    /// Set the patient id before navigating
    #[arg(long)]
    patient_id: Option<String>,
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Print the persisted session
    Show {
        #[arg(long)]
        session: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouteTableConfig::default(),
    };
    init_logging(&config.observability)?;

    let output = match cli.command {
        Commands::Check => {
            let table = RouteTable::from_config(&config)?;
            let guard = NavigationGuard::new(&table, &config.guard)?;
            let routes: Vec<_> = table.iter().collect();
            json!({
                "routes": routes,
                "guard": &config.guard,
                "rules": guard.rule_names(),
            })
        }
        Commands::Resolve { path } => {
            let table = RouteTable::from_config(&config)?;
            let matched = table.resolve_match(&path);
            json!({
                "route": matched.descriptor,
                "params": matched.params,
            })
        }
        Commands::Navigate(args) => match &args.session {
            Some(path) => run_navigation(&config, FileSessionStore::open(path)?, &args)?,
            None => run_navigation(&config, MemorySessionStore::new(), &args)?,
        },
        Commands::Session {
            command: SessionCommands::Show { session },
        } => serde_json::to_value(FileSessionStore::open(session)?.snapshot())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_navigation<S: SessionStore>(
    config: &RouteTableConfig,
    mut session: S,
    args: &NavigateArgs,
) -> Result<Value, Box<dyn Error>> {
    let seeds = [
        (SessionKey::Token, &args.token),
        (SessionKey::UserId, &args.user_id),
        (SessionKey::PatientId, &args.patient_id),
    ];
    for (key, value) in seeds {
        if let Some(value) = value {
            session.set(key, value.clone());
        }
    }

    let mut gate = NavigationGate::from_config(config, session)?;
    let navigation = if args.once {
        serde_json::to_value(gate.on_before_navigate(&args.path, args.from.as_deref()))?
    } else {
        serde_json::to_value(gate.navigate(&args.path)?)?
    };

    Ok(json!({
        "navigation": navigation,
        "session": gate.session().snapshot(),
    }))
}
