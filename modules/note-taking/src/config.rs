use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "NOTES_HOST";
    pub const PORT: &str = "NOTES_PORT";
    /// Path of the JSON file mirroring the note collection.
    pub const NOTES_FILE: &str = "NOTES_FILE";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 5001;
    pub const NOTES_FILE: &str = "notes_data.json";
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub notes_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var(env_vars::HOST)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| defaults::HOST.to_string());

        let port = match env::var(env_vars::PORT) {
            Ok(raw) => parse_port(&raw).unwrap_or_else(|| {
                log::warn!(
                    "Ignoring invalid {}={:?}, using {}",
                    env_vars::PORT,
                    raw,
                    defaults::PORT
                );
                defaults::PORT
            }),
            Err(_) => defaults::PORT,
        };

        let notes_file = env::var(env_vars::NOTES_FILE)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| defaults::NOTES_FILE.to_string());

        Self {
            host,
            port,
            notes_file: PathBuf::from(notes_file),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}
