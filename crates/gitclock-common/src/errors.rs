use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),

    #[error("config write error: {0}")]
    WriteError(String),

    #[error(transparent)]
    Location(#[from] PlatformError),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("preference store error: {0}")]
    PrefsError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GitClockError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("server.port = 0".into());
        assert_eq!(err.to_string(), "config validation error: server.port = 0");

        let err = ConfigError::WatchError("inotify limit reached".into());
        assert_eq!(err.to_string(), "config watch error: inotify limit reached");
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::PrefsError("settings.json is not an object".into());
        assert_eq!(
            err.to_string(),
            "preference store error: settings.json is not an object"
        );

        let err = PlatformError::NotSupported("no data dir".into());
        assert_eq!(err.to_string(), "not supported: no data dir");
    }

    #[test]
    fn gitclock_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: GitClockError = config_err.into();
        assert!(matches!(err, GitClockError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn gitclock_error_from_platform() {
        let platform_err = PlatformError::PathError("no home".into());
        let err: GitClockError = platform_err.into();
        assert!(matches!(err, GitClockError::Platform(_)));
        assert!(err.to_string().contains("no home"));
    }

    #[test]
    fn gitclock_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GitClockError = io_err.into();
        assert!(matches!(err, GitClockError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn gitclock_error_string_variants() {
        let err = GitClockError::Layout("unknown widget".into());
        assert_eq!(err.to_string(), "layout error: unknown widget");

        let err = GitClockError::Bridge("address in use".into());
        assert_eq!(err.to_string(), "bridge error: address in use");

        let err = GitClockError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
