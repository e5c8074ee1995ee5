use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// libcurl transfer limits (optional `[transfer]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Upper bound on one whole transfer, in seconds.
    pub timeout_secs: u64,
    /// Abort when the rate stays below this many bytes/s ...
    pub low_speed_limit: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Maximum HTTP redirects followed per source.
    pub max_redirections: u32,
    /// Optional receive-rate cap in bytes per second (None = no cap).
    pub max_bytes_per_sec: Option<u64>,
    /// Optional User-Agent header; libcurl sends none by default.
    pub user_agent: Option<String>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            max_bytes_per_sec: None,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/vfetch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Directory used when a request has no explicit destination.
    /// Must be absolute; defaults to `$XDG_DATA_HOME/vfetch/downloads`.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub transfer: TransferConfig,
}

impl FetchConfig {
    /// Directory that derived destinations are joined to.
    pub fn default_download_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.download_dir {
            if !dir.is_absolute() {
                anyhow::bail!("download_dir must be absolute: {}", dir.display());
            }
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vfetch")?;
        Ok(xdg_dirs.get_data_home().join("downloads"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
