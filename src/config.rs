//! Environment-driven settings. Everything else is compiled in.

use std::{env, fs, io, path::PathBuf, sync::Mutex};

use tracing_subscriber::EnvFilter;

pub const LOG_FILE_VAR: &str = "IGL_LOG_FILE";
pub const LOG_FILTER_VAR: &str = "IGL_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Log destination; logging is off when unset.
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var_os(LOG_FILE_VAR).map(PathBuf::from),
            env::var(LOG_FILTER_VAR).ok(),
        )
    }

    fn from_vars(log_file: Option<PathBuf>, log_filter: Option<String>) -> Self {
        Self {
            log_file: log_file.filter(|p| !p.as_os_str().is_empty()),
            log_filter: log_filter
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

/// Installs a file-backed tracing subscriber. The terminal belongs to the
/// UI, so nothing is ever written to stdout or stderr.
pub fn init_logging(settings: &Settings) -> io::Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let filter = EnvFilter::try_new(&settings.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_vars() {
        let settings = Settings::from_vars(None, None);
        assert_eq!(settings.log_file, None);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let settings = Settings::from_vars(Some(PathBuf::new()), Some("  ".to_string()));
        assert_eq!(settings.log_file, None);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_explicit_values() {
        let settings = Settings::from_vars(
            Some(PathBuf::from("/tmp/igl.log")),
            Some("igl=debug".to_string()),
        );
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/igl.log")));
        assert_eq!(settings.log_filter, "igl=debug");
    }

    #[test]
    fn test_logging_disabled_is_noop() {
        let settings = Settings::from_vars(None, None);
        assert!(init_logging(&settings).is_ok());
    }
}
