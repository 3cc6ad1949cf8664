use crate::core::notify::parse_cc;
use crate::errors::{AppError, AppResult};
use crate::models::cadence::Cadence;
use crate::models::metric::MetricKind;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Username that receives a copy of every overdue alert.
    #[serde(default = "default_supervisor")]
    pub supervisor: String,
    #[serde(default = "default_mail_sender")]
    pub mail_sender: String,
    /// Comma-separated CC list added to every outgoing message.
    #[serde(default)]
    pub mail_cc: String,
    #[serde(default = "default_banks")]
    pub banks: Vec<String>,
    /// Daily metrics checked over a rolling window instead of a single day.
    #[serde(default = "default_grace_windows")]
    pub grace_windows: BTreeMap<String, u32>,
    #[serde(default = "default_reminder_time")]
    pub reminder_time: String,
    #[serde(default = "default_overdue_time")]
    pub overdue_time: String,
}

fn default_supervisor() -> String {
    "supervisor".to_string()
}
fn default_mail_sender() -> String {
    "kpidesk@localhost".to_string()
}
fn default_banks() -> Vec<String> {
    ["CBZ Bank", "Ecobank", "Stanbic Bank", "Nedbank"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_grace_windows() -> BTreeMap<String, u32> {
    BTreeMap::from([("scrap".to_string(), 3)])
}
fn default_reminder_time() -> String {
    "08:00".to_string()
}
fn default_overdue_time() -> String {
    "10:00".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            supervisor: default_supervisor(),
            mail_sender: default_mail_sender(),
            mail_cc: String::new(),
            banks: default_banks(),
            grace_windows: default_grace_windows(),
            reminder_time: default_reminder_time(),
            overdue_time: default_overdue_time(),
        }
    }

    /// Return the standard configuration directory (`~/.kpidesk`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kpidesk")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("kpidesk.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("kpidesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, at schedule or check time.
    pub fn validate(&self) -> AppResult<()> {
        if parse_clock(&self.reminder_time)? == parse_clock(&self.overdue_time)? {
            return Err(AppError::Config(
                "reminder_time and overdue_time must differ".into(),
            ));
        }
        for (name, days) in &self.grace_windows {
            MetricKind::from_code(name).ok_or_else(|| {
                AppError::Config(format!("grace_windows: unknown metric '{name}'"))
            })?;
            if *days == 0 {
                return Err(AppError::Config(format!(
                    "grace_windows: '{name}' needs a window of at least 1 day"
                )));
            }
        }
        if self.banks.is_empty() {
            return Err(AppError::Config("banks: at least one bank is required".into()));
        }
        Ok(())
    }

    pub fn cc_list(&self) -> Vec<String> {
        parse_cc(&self.mail_cc)
    }

    /// Cadence override for a daily metric, if a grace window is configured.
    pub fn grace_cadence(&self, kind: MetricKind) -> Option<Cadence> {
        self.grace_windows
            .iter()
            .find(|(name, _)| MetricKind::from_code(name) == Some(kind))
            .map(|(_, days)| Cadence::Range(*days))
    }

    pub fn reminder_clock(&self) -> AppResult<NaiveTime> {
        parse_clock(&self.reminder_time)
    }

    pub fn overdue_clock(&self) -> AppResult<NaiveTime> {
        parse_clock(&self.overdue_time)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

fn parse_clock(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| AppError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_put_scrap_on_a_three_day_window() {
        let cfg = Config::default();
        assert_eq!(
            cfg.grace_cadence(MetricKind::ScrapData),
            Some(Cadence::Range(3))
        );
        assert_eq!(cfg.grace_cadence(MetricKind::SalesData), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_fills_missing_fields() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\nmail_cc: a@b.com, c@d.com\n")
            .unwrap();
        assert_eq!(cfg.supervisor, "supervisor");
        assert_eq!(cfg.banks.len(), 4);
        assert_eq!(cfg.cc_list(), vec!["a@b.com", "c@d.com"]);
    }

    #[test]
    fn unknown_grace_metric_is_rejected() {
        let mut cfg = Config::default();
        cfg.grace_windows.insert("weather".into(), 2);
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn zero_day_grace_window_is_rejected() {
        let mut cfg = Config::default();
        cfg.grace_windows.insert("scrap".into(), 0);
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn clocks_must_parse_and_differ() {
        let mut cfg = Config::default();
        cfg.overdue_time = "8:00".into();
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));

        cfg.overdue_time = "25:00".into();
        assert!(matches!(cfg.validate(), Err(AppError::InvalidTime(_))));
    }
}
