use crate::gateway::http::parse_base_url;
use crate::timer::TimerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

const DATA_DIR_NAME: &str = ".focusup";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "focusup.log";

/// Upper bound for a work or break interval
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "FOCUSUP_API_URL";

/// Client settings stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub request_timeout_secs: u64,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
            work_minutes: 25,
            break_minutes: 5,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.work_minutes == 0 || self.work_minutes > MAX_PHASE_MINUTES {
            anyhow::bail!("work_minutes must be between 1 and {}", MAX_PHASE_MINUTES);
        }
        if self.break_minutes == 0 || self.break_minutes > MAX_PHASE_MINUTES {
            anyhow::bail!("break_minutes must be between 1 and {}", MAX_PHASE_MINUTES);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        parse_base_url(&self.api_url)?;
        Ok(())
    }

    /// Apply the environment value, then the command-line value; later wins
    pub fn with_overrides(mut self, env_url: Option<String>, cli_url: Option<String>) -> Self {
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(url) = cli_url {
            self.api_url = url;
        }
        self
    }

    pub fn timer(&self) -> TimerConfig {
        TimerConfig {
            work_minutes: self.work_minutes,
            break_minutes: self.break_minutes,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Get the data directory - checks for local .focusup first, then falls back to ~/.focusup
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find a local .focusup directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let dir = current.join(DATA_DIR_NAME);
        if dir.is_dir() {
            return Some(dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Create a local .focusup directory with a default config.json
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let dir = current_dir.join(DATA_DIR_NAME);

    if dir.exists() {
        anyhow::bail!("FocusUp directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    save_config(dir.join(CONFIG_FILE), &Config::default())?;

    Ok(dir)
}

pub fn config_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(CONFIG_FILE))
}

pub fn log_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(LOG_FILE))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Load config from a file, defaults if it doesn't exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)
}

/// Config file + environment + command line, validated
pub fn resolve(cli_api_url: Option<String>) -> Result<Config> {
    let config = load_config(config_file()?)?
        .with_overrides(env::var(API_URL_ENV).ok(), cli_api_url);
    config.validate()?;
    Ok(config)
}
