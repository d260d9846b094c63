mod cli;
mod config;
mod dashboard;
mod error;
mod gemini;
mod metadata;
mod session;
mod store;
mod timer;
mod types;
mod wizard;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::AppResult;
use crate::session::SessionStore;
use crate::store::ProjectStore;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run() {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let mut session = SessionStore::open(&config.data_dir)?;
    let mut store = ProjectStore::open(&config.data_dir)?;

    match &cli.command {
        Command::New => wizard::run_wizard(&config, &mut session, &mut store),
        Command::Dashboard { watch } => dashboard::run_dashboard(&store, &session, *watch),
        Command::Submit { project, image } => {
            dashboard::run_submit(&config, &mut store, &session, project, image)
        }
        Command::Login => session::login_prompt(&mut session),
        Command::Logout => {
            session.logout()?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            match session.user() {
                Some(user) => println!(
                    "{} ({}) · {} · {} xp",
                    user.name.bold(),
                    user.email,
                    user.level,
                    user.xp
                ),
                None => println!(
                    "{} Run {} first.",
                    "You're not signed in.".yellow(),
                    "briefcraft login".cyan()
                ),
            }
            Ok(())
        }
        Command::Reconcile => {
            let expired = store.reconcile_expired(chrono::Utc::now())?;
            if expired.is_empty() {
                println!("Nothing to reconcile.");
            } else {
                for id in &expired {
                    println!("{} {}", "expired:".red(), id);
                }
            }
            Ok(())
        }
    }
}
