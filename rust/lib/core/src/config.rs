use std::path::PathBuf;

/// Default listen address for the document service.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Default document database file name, relative to `data_dir`.
pub const DEFAULT_DB_FILE: &str = "pantry.redb";

/// Storage and listener settings for the document service.
///
/// The binary fills this from its config file and command-line flags,
/// then hands it to storage initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the service's persistent files.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/pantry.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/pantry.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            self.data_dir
                .as_ref()
                .map(|d| d.join(DEFAULT_DB_FILE))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.resolve_db_path(), PathBuf::from("pantry.redb"));
    }

    #[test]
    fn db_path_under_data_dir() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/var/lib/pantry")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/var/lib/pantry/pantry.redb"));
    }

    #[test]
    fn explicit_db_path_wins() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/var/lib/pantry")),
            db_path: Some(PathBuf::from("/tmp/other.redb")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/tmp/other.redb"));
    }
}
