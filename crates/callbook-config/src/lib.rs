use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use callbook_core::flow::ReachedRedirect;
use callbook_core::rules::validate_display_format;
use callbook_core::time::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "callbook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_SEARCH_MAX_RESULTS: i64 = 50;
pub const MAX_SEARCH_MAX_RESULTS: i64 = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub calls: CallsConfig,
    pub search: SearchConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone)]
pub struct CallsConfig {
    pub after_reached: ReachedRedirect,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_results: i64,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub date_format: String,
    pub time_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            calls: CallsConfig {
                after_reached: ReachedRedirect::default(),
            },
            search: SearchConfig {
                max_results: DEFAULT_SEARCH_MAX_RESULTS,
            },
            display: DisplayConfig {
                date_format: DEFAULT_DATE_FORMAT.to_string(),
                time_format: DEFAULT_TIME_FORMAT.to_string(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid search.max_results value: {0}")]
    InvalidMaxResults(i64),
    #[error("invalid display.{field} value: {value}")]
    InvalidDisplayFormat { field: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    calls: Option<CallsFile>,
    search: Option<SearchFile>,
    display: Option<DisplayFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CallsFile {
    after_reached: Option<ReachedRedirect>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchFile {
    max_results: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayFile {
    date_format: Option<String>,
    time_format: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(after_reached) = parsed.calls.and_then(|calls| calls.after_reached) {
        config.calls.after_reached = after_reached;
    }

    if let Some(max_results) = parsed.search.and_then(|search| search.max_results) {
        if !(1..=MAX_SEARCH_MAX_RESULTS).contains(&max_results) {
            return Err(ConfigError::InvalidMaxResults(max_results));
        }
        config.search.max_results = max_results;
    }

    if let Some(display) = parsed.display {
        if let Some(format) = display.date_format {
            config.display.date_format = checked_format("date_format", format)?;
        }
        if let Some(format) = display.time_format {
            config.display.time_format = checked_format("time_format", format)?;
        }
    }

    Ok(config)
}

fn checked_format(field: &'static str, value: String) -> Result<String> {
    match validate_display_format(&value) {
        Ok(()) => Ok(value),
        Err(_) => Err(ConfigError::InvalidDisplayFormat { field, value }),
    }
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, CallsFile, ConfigError, ConfigFile, DisplayFile, SearchFile,
        DEFAULT_SEARCH_MAX_RESULTS,
    };
    use callbook_core::flow::ReachedRedirect;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            calls: Some(CallsFile {
                after_reached: Some(ReachedRedirect::Home),
            }),
            search: Some(SearchFile {
                max_results: Some(10),
            }),
            display: Some(DisplayFile {
                date_format: Some("%Y-%m-%d".to_string()),
                time_format: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.calls.after_reached, ReachedRedirect::Home);
        assert_eq!(merged.search.max_results, 10);
        assert_eq!(merged.display.date_format, "%Y-%m-%d");
        assert_eq!(merged.display.time_format, "%-I:%M %P");
    }

    #[test]
    fn merge_config_defaults_when_empty() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        assert_eq!(merged.calls.after_reached, ReachedRedirect::Patient);
        assert_eq!(merged.search.max_results, DEFAULT_SEARCH_MAX_RESULTS);
    }

    #[test]
    fn merge_config_rejects_out_of_range_max_results() {
        let parsed = ConfigFile {
            search: Some(SearchFile {
                max_results: Some(0),
            }),
            ..Default::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxResults(0)));
    }

    #[test]
    fn merge_config_rejects_bad_time_format() {
        let parsed = ConfigFile {
            display: Some(DisplayFile {
                date_format: None,
                time_format: Some("%Q".to_string()),
            }),
            ..Default::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDisplayFormat {
                field: "time_format",
                ..
            }
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[calls]\nafter_reached = \"home\"\n[search]\nmax_results = 5\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.calls.after_reached, ReachedRedirect::Home);
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "theme = \"dark\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
