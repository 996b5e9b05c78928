//! Configuration file maintenance: detect keys missing from an older
//! config file and back-fill them with defaults.

use crate::config::Config;
use crate::errors::AppResult;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every config file should carry.
const REQUIRED_KEYS: &[&str] = &["database", "default_location", "calendar_name"];

fn as_mapping(content: &str) -> AppResult<Mapping> {
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(content)?;
    Ok(value.as_mapping().cloned().unwrap_or_default())
}

/// Keys from `REQUIRED_KEYS` absent from the YAML text.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let map = as_mapping(content)?;
    Ok(REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Add the missing keys (with default values) to the YAML text.
/// Existing keys, including unknown ones, are preserved.
pub fn fill_missing(content: &str) -> AppResult<(String, Vec<&'static str>)> {
    let mut map = as_mapping(content)?;
    let defaults = as_mapping(&serde_yaml::to_string(&Config::default())?)?;

    let mut added = Vec::new();
    for key in REQUIRED_KEYS {
        let k = Value::String((*key).to_string());
        if !map.contains_key(&k)
            && let Some(v) = defaults.get(&k)
        {
            map.insert(k, v.clone());
            added.push(*key);
        }
    }

    Ok((serde_yaml::to_string(&Value::Mapping(map))?, added))
}

/// Rewrite the config file at `path` if keys are missing.
/// Returns the keys that were added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<&'static str>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let (updated, added) = fill_missing(&content)?;
    if !added.is_empty() {
        fs::write(path, updated)?;
    }
    Ok(added)
}
