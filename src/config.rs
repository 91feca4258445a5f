//! TOML configuration: listen address, upload limit and chart layout.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use crate::chart::ChartLayout;
use crate::{ReportError, ReportResult};

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub charts: ChartLayout,
}

impl AppConfig {
    pub fn validate(&self) -> ReportResult<()> {
        self.bind_addr()?;
        if self.server.max_upload_bytes == 0 {
            return Err(ReportError::Config("server.max_upload_bytes must be positive".to_string()));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(ReportError::Config("charts.width and charts.height must be positive".to_string()));
        }
        if self.charts.max_bars == 0 {
            return Err(ReportError::Config("charts.max_bars must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> ReportResult<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| ReportError::Config(format!("invalid server.bind {:?}: {e}", self.server.bind)))
    }
}

pub fn parse_config(s: &str) -> ReportResult<AppConfig> {
    let cfg: AppConfig = toml::from_str(s).map_err(|e| ReportError::Config(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> ReportResult<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| ReportError::Config(format!("failed to read {}: {e}", path.display())))?;
    parse_config(&s)
}

/// Load `path` when given, otherwise fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> ReportResult<AppConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(AppConfig::default()),
    }
}
