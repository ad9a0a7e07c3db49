use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Built frontend (trunk `dist`), served for every path not matched otherwise
    pub dist_dir: String,
    /// Served under `/data`
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Catalog document inside `data_dir`
    pub file: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[site]
dist_dir = "dist"
data_dir = "data"

[catalog]
file = "resource-categories.json"
"#;

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server address {}:{}: {}", self.host, self.port, e))?;
        Ok(addr)
    }
}

impl Config {
    pub fn dist_dir(&self) -> PathBuf {
        resolve_path(&self.site.dist_dir)
    }

    pub fn data_dir(&self) -> PathBuf {
        resolve_path(&self.site.data_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir().join(&self.catalog.file)
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Relative paths are tried against the working directory first (cargo run,
/// trunk serve), then next to the executable.
pub fn resolve_path(raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.site.dist_dir, "dist");
        assert_eq!(config.site.data_dir, "data");
        assert_eq!(config.catalog.file, "resource-categories.json");
        assert_eq!(config.server.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_invalid_host_is_reported() {
        let config = parse_config(
            r#"
            [server]
            host = "not a host"
            port = 8080
            [site]
            dist_dir = "dist"
            data_dir = "data"
            [catalog]
            file = "c.json"
            "#,
        )
        .unwrap();
        assert!(config.server.socket_addr().is_err());
    }

    #[test]
    fn test_missing_section_fails() {
        assert!(parse_config("[server]\nhost = \"127.0.0.1\"\nport = 1").is_err());
    }

    #[test]
    fn test_absolute_paths_kept() {
        let root = if cfg!(windows) { "C:\\site\\dist" } else { "/srv/site/dist" };
        assert_eq!(resolve_path(root), PathBuf::from(root));
    }
}
