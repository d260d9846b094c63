use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide = true)]
    pub api_key: Option<String>,

    /// Model used for brief generation and evaluation
    #[arg(long, env = "BRIEFCRAFT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API base URL
    #[arg(long, env = "BRIEFCRAFT_API_BASE", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,

    /// Data directory (defaults to ~/.briefcraft)
    #[arg(long, env = "BRIEFCRAFT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the brief wizard: pick a design type and industry, get a brief
    New,
    /// Show your projects with live countdowns
    Dashboard {
        /// Redraw countdowns every second until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Submit a design image for mentor feedback
    Submit {
        /// Project id (see the dashboard)
        project: String,
        /// Path to the image file (png, jpg, webp, or gif)
        image: PathBuf,
    },
    /// Sign in with a mock local account
    Login,
    /// Sign out and forget the local account
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Mark overdue active projects as expired
    Reconcile,
}
