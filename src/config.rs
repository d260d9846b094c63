use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Resolved runtime settings, built once at startup and passed explicitly to
/// command handlers.
#[derive(Clone, Debug)]
pub struct Config {
    /// Missing key does not halt startup; calls fail later as generation errors.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| AppError::Config("couldn't find home dir".to_string()))?
                .join(".briefcraft"),
        };

        let api_key = cli.api_key.clone().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::error!("GEMINI_API_KEY is not set; brief generation and evaluation will fail");
        }

        Ok(Self {
            api_key,
            model: cli.model.clone(),
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            data_dir,
        })
    }
}
