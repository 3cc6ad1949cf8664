//! Configuration file upgrades: detect and fill keys added in newer releases.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Other("default configuration is not a mapping".into())),
    }
}

/// Keys present in the default configuration but absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add missing keys with their default values, keeping existing ones untouched.
/// Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn run_config_migration(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        info(format!("No configuration file at {}", path.display()));
        return Ok(false);
    }

    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (key, value) in defaults {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if added.is_empty() {
        return Ok(false);
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(current))?;
    fs::write(path, yaml)?;
    success(format!("Configuration updated, added: {}", added.join(", ")));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, body: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{name}_kpidesk.conf"));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reports_and_fills_missing_keys() {
        let path = temp_conf("cfg_migrate", "database: /tmp/db.sqlite\nsupervisor: Boss\n");

        let missing = missing_keys(&path).unwrap();
        assert!(missing.contains(&"banks".to_string()));
        assert!(!missing.contains(&"supervisor".to_string()));

        assert!(run_config_migration(&path).unwrap());
        assert!(missing_keys(&path).unwrap().is_empty());

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.supervisor, "Boss");
        assert!(!run_config_migration(&path).unwrap());

        fs::remove_file(&path).ok();
    }
}
