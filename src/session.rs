use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::User;

const SESSION_VERSION: u32 = 1;
const SESSION_FILE: &str = "user.json";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not signed in")]
    AuthRequired,
    #[error("unsupported session version {0}")]
    UnsupportedVersion(u32),
}

#[derive(serde::Serialize, serde::Deserialize)]
struct SessionFile {
    version: u32,
    user: User,
}

/// Holds the singleton mock-auth identity for this data directory.
pub struct SessionStore {
    path: PathBuf,
    user: Option<User>,
}

impl SessionStore {
    pub fn open(data_dir: &Path) -> Result<Self, SessionError> {
        let path = data_dir.join(SESSION_FILE);
        let user = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Some(decode_session(&contents)?)
        } else {
            None
        };
        Ok(Self { path, user })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The accept-brief path calls this; `AuthRequired` is handled by opening
    /// the login prompt, not surfaced as a failure.
    pub fn require_user(&self) -> Result<&User, SessionError> {
        self.user.as_ref().ok_or(SessionError::AuthRequired)
    }

    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let envelope = SessionFile {
            version: SESSION_VERSION,
            user: user.clone(),
        };
        let temp = self.path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(&envelope)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.path)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.user = None;
        Ok(())
    }
}

fn decode_session(contents: &str) -> Result<User, SessionError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    // pre-envelope files held the bare user object
    if value.get("version").is_none() {
        tracing::warn!("migrating legacy session file to versioned envelope");
        return Ok(serde_json::from_value(value)?);
    }
    let envelope: SessionFile = serde_json::from_value(value)?;
    if envelope.version > SESSION_VERSION {
        return Err(SessionError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.user)
}

/// Interactive mock login: asks for a name and email, persists the singleton
/// user. No password and no server round-trip.
pub fn login_prompt(store: &mut SessionStore) -> crate::error::AppResult<()> {
    use colored::Colorize;
    use dialoguer::{Input, theme::ColorfulTheme};

    let theme = ColorfulTheme::default();
    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .allow_empty(true)
        .interact_text()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .allow_empty(true)
        .interact_text()?;

    let user = mock_user(&name, &email);
    store.login(user)?;
    if let Some(user) = store.user() {
        println!("{} Signed in as {} ({}).", "Welcome!".green().bold(), user.name.bold(), user.level);
    }
    Ok(())
}

/// Default identity for a mock login when no name is given.
pub fn mock_user(name: &str, email: &str) -> User {
    User {
        name: if name.trim().is_empty() {
            "Designer".to_string()
        } else {
            name.trim().to_string()
        },
        email: if email.trim().is_empty() {
            "designer@briefcraft.local".to_string()
        } else {
            email.trim().to_string()
        },
        avatar: String::new(),
        level: "Level 1".to_string(),
        xp: 0,
    }
}
