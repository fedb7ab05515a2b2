use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory receiving `latest.json`, `metrics.json` and `sale_points.json`.
    pub output_dir: PathBuf,
    /// Feed file used when the command line does not name one.
    pub feed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Colored log output is only wanted outside production.
    #[must_use]
    pub fn log_ansi(&self) -> bool {
        self.env != Environment::Production
    }
}
