mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{config_dir, config_file, data_dir, log_dir, prefs_file};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_gitclock() {
        let path = config_dir().unwrap();
        assert!(
            path.ends_with("gitclock"),
            "config_dir should end with 'gitclock', got: {path:?}"
        );
    }

    #[test]
    fn data_dir_ends_with_gitclock() {
        let path = data_dir().unwrap();
        assert!(
            path.ends_with("gitclock"),
            "data_dir should end with 'gitclock', got: {path:?}"
        );
    }

    #[test]
    fn config_file_has_correct_name() {
        let path = config_file().unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "config.toml");
    }

    #[test]
    fn prefs_file_lives_in_data_dir() {
        let path = prefs_file().unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "settings.json");
        assert!(path.starts_with(data_dir().unwrap()));
    }

    #[test]
    fn log_dir_is_inside_data_dir() {
        let log = log_dir().unwrap();
        let data = data_dir().unwrap();
        assert!(
            log.starts_with(&data),
            "log_dir should be inside data_dir: log={log:?}, data={data:?}"
        );
        assert_eq!(log.file_name().unwrap().to_str().unwrap(), "logs");
    }
}
