//! Interactive input for connection values missing from configuration.
//!
//! Prompts are written to stderr so stdout carries only the run summary.

use std::fmt;
use std::io;

use anyhow::Context;
use console::Term;
use zbx_config::{ApiConfig, normalize_base_url};

/// Line-oriented operator input.
pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Read a line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;

    fn notice(&mut self, message: &str) -> io::Result<()>;
}

/// [`Prompter`] backed by the controlling terminal.
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn ensure_attended(&self) -> io::Result<()> {
        if self.term.is_term() {
            Ok(())
        } else {
            Err(io::Error::other(
                "not attached to a terminal; configure the value instead (see ZBX_API__* variables)",
            ))
        }
    }
}

impl Prompter for TermPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.ensure_attended()?;
        self.term.write_str(prompt)?;
        self.term.read_line()
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.ensure_attended()?;
        self.term.write_str(prompt)?;
        self.term.read_secure_line()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.term.write_line(message)
    }
}

/// How the run obtains its session.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Pre-issued API token used as the session directly.
    Token(String),
    Password { username: String, password: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Connection target with every value resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Normalized frontend base URL.
    pub base_url: String,
    pub credentials: Credentials,
}

/// Fill in whatever `api` leaves unset by asking the operator.
pub fn resolve_target(api: &ApiConfig, prompter: &mut impl Prompter) -> anyhow::Result<Target> {
    let base_url = match api.base_url() {
        Some(base_url) => base_url,
        None => prompt_base_url(prompter)?,
    };

    if api.has_token() {
        return Ok(Target {
            base_url,
            credentials: Credentials::Token(api.token.trim().to_string()),
        });
    }

    let username = if api.username.is_empty() {
        prompter
            .read_line("Username: ")
            .context("failed to read username")?
            .trim()
            .to_string()
    } else {
        api.username.clone()
    };
    let password = if api.password.is_empty() {
        prompter
            .read_secret("Password: ")
            .context("failed to read password")?
            .trim()
            .to_string()
    } else {
        api.password.clone()
    };

    Ok(Target {
        base_url,
        credentials: Credentials::Password { username, password },
    })
}

fn prompt_base_url(prompter: &mut impl Prompter) -> anyhow::Result<String> {
    loop {
        let raw = prompter
            .read_line("Enter Zabbix URL (e.g. http://localhost/zabbix): ")
            .context("failed to read Zabbix URL")?;
        let base_url = normalize_base_url(&raw);
        if !base_url.is_empty() {
            return Ok(base_url);
        }
        prompter.notice("Please enter a valid URL.")?;
    }
}
