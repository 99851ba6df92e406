//! Configuration file management for sbs-decode.
//!
//! Reads/writes `~/.sbs-decode/config.yaml` with the message allow-list and
//! the default log level.

use std::path::{Path, PathBuf};

use crate::classify::AllowList;
use crate::types::{MessageKind, SbsError, StatusSubtype};

/// Full configuration structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub filter: FilterConfig,
    pub logging: LoggingConfig,
}

/// Which message kinds and status subtypes are decoded; everything else is
/// skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub kinds: Vec<MessageKind>,
    pub statuses: Vec<StatusSubtype>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Level directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            filter: FilterConfig {
                kinds: vec![
                    MessageKind::NewAircraft,
                    MessageKind::Identification,
                    MessageKind::Transmission,
                    MessageKind::StatusChange,
                ],
                statuses: StatusSubtype::ALL.to_vec(),
            },
            logging: LoggingConfig {
                level: "warn".into(),
            },
        }
    }
}

impl Config {
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(
            self.filter.kinds.iter().copied(),
            self.filter.statuses.iter().copied(),
        )
    }
}

/// Get the config directory path (`~/.sbs-decode/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".sbs-decode")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load config from `~/.sbs-decode/config.yaml`.
///
/// Returns default config if file doesn't exist.
pub fn load_config() -> Config {
    load_config_from(&config_file())
}

/// Load config from `path`, falling back to defaults if it is missing or
/// unreadable.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(text) => parse_config(&text),
        Err(_) => Config::default(),
    }
}

/// Save config to `~/.sbs-decode/config.yaml`.
pub fn save_config(config: &Config) -> Result<PathBuf, SbsError> {
    let path = config_file();
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save config to `path`, creating its parent directory.
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), SbsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, serialize_config(config))?;
    Ok(())
}

/// Parse simple YAML-like config text.
fn parse_config(text: &str) -> Config {
    let mut config = Config::default();
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let is_indented = line.starts_with("  ") || line.starts_with('\t');

        if let Some((key, val)) = stripped.split_once(':') {
            let key = key.trim();
            let val = val.trim();

            if !is_indented {
                current_section = if val.is_empty() {
                    Some(key.to_string())
                } else {
                    None
                };
            } else if let Some(ref section) = current_section {
                match (section.as_str(), key) {
                    ("filter", "kinds") => {
                        config.filter.kinds = parse_code_list(val);
                    }
                    ("filter", "status") => {
                        config.filter.statuses = parse_code_list(val);
                    }
                    ("logging", "level") => {
                        if let Some(v) = parse_string_value(val) {
                            config.logging.level = v;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    config
}

fn parse_string_value(val: &str) -> Option<String> {
    if val == "null" || val == "~" || val.is_empty() {
        return None;
    }
    // Strip quotes
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        return Some(val[1..val.len() - 1].to_string());
    }
    Some(val.to_string())
}

/// Comma separated wire codes. Unknown codes are dropped, `null` is an empty
/// list.
fn parse_code_list<T: std::str::FromStr>(val: &str) -> Vec<T> {
    parse_string_value(val)
        .map(|v| {
            v.split(',')
                .filter_map(|code| code.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Serialize config to YAML-like text.
fn serialize_config(config: &Config) -> String {
    let kinds: Vec<&str> = config.filter.kinds.iter().map(|k| k.code()).collect();
    let statuses: Vec<&str> = config.filter.statuses.iter().map(|s| s.code()).collect();

    let lines = [
        "# sbs-decode configuration".to_string(),
        String::new(),
        "filter:".into(),
        format!("  kinds: \"{}\"", kinds.join(",")),
        format!("  status: \"{}\"", statuses.join(",")),
        String::new(),
        "logging:".into(),
        format!("  level: \"{}\"", config.logging.level),
    ];

    lines.join("\n") + "\n"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MessageFilter;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.filter.kinds.len(), 4);
        assert_eq!(config.filter.statuses.len(), 5);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.allow_list(), AllowList::default());
    }

    #[test]
    fn test_parse_config() {
        let text = r#"
# only transmissions and lost signals
filter:
  kinds: "MSG, STA"
  status: SL

logging:
  level: "sbs_core=debug"
"#;
        let config = parse_config(text);
        assert_eq!(
            config.filter.kinds,
            vec![MessageKind::Transmission, MessageKind::StatusChange]
        );
        assert_eq!(config.filter.statuses, vec![StatusSubtype::SignalLost]);
        assert_eq!(config.logging.level, "sbs_core=debug");

        let filter = config.allow_list();
        assert!(!filter.is_expected_kind(MessageKind::NewAircraft));
        assert!(!filter.is_expected_status(StatusSubtype::Remove));
    }

    #[test]
    fn test_parse_config_unknown_codes_and_null() {
        let text = r#"
filter:
  kinds: "MSG,BOGUS"
  status: null
"#;
        let config = parse_config(text);
        assert_eq!(config.filter.kinds, vec![MessageKind::Transmission]);
        assert!(config.filter.statuses.is_empty());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_roundtrip() {
        let config = Config {
            filter: FilterConfig {
                kinds: vec![MessageKind::Transmission, MessageKind::Click],
                statuses: vec![StatusSubtype::OkReset],
            },
            logging: LoggingConfig {
                level: "info".into(),
            },
        };
        let parsed = parse_config(&serialize_config(&config));
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = load_config_from(Path::new("/nonexistent/sbs-decode/config.yaml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_creates_parent_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            filter: FilterConfig {
                kinds: vec![MessageKind::Transmission],
                statuses: vec![StatusSubtype::PositionLost, StatusSubtype::Delete],
            },
            logging: LoggingConfig {
                level: "debug".into(),
            },
        };

        save_config_to(&config, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_save_into_file_parent_is_io_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("config.yaml");
        let err = save_config_to(&Config::default(), &path).unwrap_err();
        assert!(matches!(err, SbsError::Io(_)));
        assert!(!err.is_invalid_input());
    }
}
