use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted upload body, in bytes.
    pub max_body_size: usize,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_body_size: 100 * 1024 * 1024,
            log_level: "info".into(),
        }
    }
}

impl ServerConfig {
    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_size, 100 * 1024 * 1024);
        assert_eq!(c.log_level, "info");
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:80\"").unwrap();
        writeln!(file, "max_body_size = 1024").unwrap();

        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:80".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_size, 1024);
        assert_eq!(c.log_level, "info");
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = 12").unwrap();
        assert!(matches!(ServerConfig::load(file.path()), Err(ServerError::Config(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
