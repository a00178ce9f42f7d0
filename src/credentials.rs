use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Supplies the GitHub username and password on demand. The code search
/// crawler never prompts or reads the environment itself; it only sees
/// whatever provider the caller injected.
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// Credentials read from `GITHUB_USERNAME` / `GITHUB_PASSWORD`.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Returns `None` unless both variables are set.
    pub fn from_env() -> Option<Self> {
        let username = env::var("GITHUB_USERNAME").ok()?;
        let password = env::var("GITHUB_PASSWORD").ok()?;
        Some(Self {
            credentials: Credentials { username, password },
        })
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}

/// Interactive prompt on stdin. Password entry is non-echoing on a
/// terminal and falls back to plain input otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCredentials;

impl CredentialProvider for PromptCredentials {
    fn credentials(&self) -> Result<Credentials> {
        println!("A GitHub login is necessary to read code search results.");

        let username = prompt_line("Enter your GitHub username: ")?;
        let password = if io::stdin().is_terminal() {
            rpassword::prompt_password("Enter your GitHub password: ")?
        } else {
            prompt_line("Enter your GitHub password: ")?
        };

        Ok(Credentials { username, password })
    }
}

/// Fixed credentials, mainly useful in tests.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("octocat", "hunter2");
        let credentials = provider.credentials().unwrap();
        assert_eq!(credentials.username, "octocat");
        assert_eq!(credentials.password, "hunter2");
    }
}
