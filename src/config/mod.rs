use crate::core::analytics::options::{AlertPolicy, ReportOptions, ShiftStrategy};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys every config file is expected to carry; reported by `config --check`.
pub const KNOWN_KEYS: &[&str] = &[
    "database",
    "impound_danger_rate",
    "impound_warning_rate",
    "underperformer_ratio",
    "shift_strategy",
    "currency_symbol",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_danger_rate")]
    pub impound_danger_rate: f64,
    #[serde(default = "default_warning_rate")]
    pub impound_warning_rate: f64,
    #[serde(default = "default_underperformer_ratio")]
    pub underperformer_ratio: f64,
    #[serde(default)]
    pub shift_strategy: ShiftStrategy,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_danger_rate() -> f64 {
    AlertPolicy::default().danger_rate
}
fn default_warning_rate() -> f64 {
    AlertPolicy::default().warning_rate
}
fn default_underperformer_ratio() -> f64 {
    AlertPolicy::default().underperformer_ratio
}
fn default_currency_symbol() -> String {
    "R".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            impound_danger_rate: default_danger_rate(),
            impound_warning_rate: default_warning_rate(),
            underperformer_ratio: default_underperformer_ratio(),
            shift_strategy: ShiftStrategy::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("weighlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".weighlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("weighlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("weighlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Analytics options derived from the configured thresholds.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            policy: AlertPolicy {
                danger_rate: self.impound_danger_rate,
                warning_rate: self.impound_warning_rate,
                underperformer_ratio: self.underperformer_ratio,
            },
            shift_strategy: self.shift_strategy,
        }
    }

    /// Keys absent from a YAML document (filled by defaults on load).
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let map = match value {
            serde_yaml::Value::Mapping(m) => m,
            serde_yaml::Value::Null => return Ok(KNOWN_KEYS.to_vec()),
            _ => {
                return Err(AppError::Config(
                    "configuration file is not a YAML mapping".into(),
                ));
            }
        };

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    /// Initialize configuration and database path.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("weighlog.sqlite"),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Self::load()?
            };
            config.save_to(&Self::config_file())?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let cfg = Config::from_yaml("database: /tmp/x.sqlite\nimpound_danger_rate: 20\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.impound_danger_rate, 20.0);
        assert_eq!(cfg.impound_warning_rate, 10.0);
        assert_eq!(cfg.underperformer_ratio, 0.5);
        assert_eq!(cfg.shift_strategy, ShiftStrategy::Assignment);
        assert_eq!(cfg.currency_symbol, "R");
    }

    #[test]
    fn empty_file_is_default() {
        let cfg = Config::from_yaml("   \n").unwrap();
        assert_eq!(cfg.impound_danger_rate, 15.0);
    }

    #[test]
    fn shift_strategy_is_kebab_case() {
        let cfg = Config::from_yaml("shift_strategy: assignment-then-timestamp\n").unwrap();
        assert_eq!(
            cfg.report_options().shift_strategy,
            ShiftStrategy::AssignmentThenTimestamp
        );
    }

    #[test]
    fn check_reports_absent_keys() {
        let missing = Config::missing_keys("database: a\ncurrency_symbol: $\n").unwrap();
        assert_eq!(
            missing,
            vec![
                "impound_danger_rate",
                "impound_warning_rate",
                "underperformer_ratio",
                "shift_strategy"
            ]
        );
        assert!(Config::missing_keys("- a\n- b\n").is_err());
    }

    #[test]
    fn report_options_carry_thresholds() {
        let cfg = Config {
            impound_danger_rate: 30.0,
            impound_warning_rate: 5.0,
            underperformer_ratio: 0.25,
            ..Config::default()
        };
        let opts = cfg.report_options();
        assert_eq!(opts.policy.danger_rate, 30.0);
        assert_eq!(opts.policy.warning_rate, 5.0);
        assert_eq!(opts.policy.underperformer_ratio, 0.25);
    }
}
