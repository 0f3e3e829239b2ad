//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMGATE_DEBUG` | `debug` |
//! | `FORMGATE_LOG_LEVEL` | `log_level` |
//! | `FORMGATE_PASSWORD_MIN_LENGTH` | `password_policy.min_length` |
//! | `FORMGATE_SPECIAL_CHARACTERS` | `password_policy.special_characters` |
//! | `FORMGATE_SIMULATED_LATENCY_MS` | `submission.simulated_latency_ms` |
//! | `FORMGATE_REDIRECT_TO` | `submission.redirect_to` |
//! | `FORMGATE_REDIRECT_DELAY_MS` | `submission.redirect_delay_ms` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formgate_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/formgate.toml").unwrap();
//! let settings = settings_loader::from_file_with_env("config/formgate.json").unwrap();
//! ```

use std::path::Path;

use crate::error::FormgateError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values, including
/// fields of nested tables.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormgateError> {
    // Go through serde_json so the parsed table can be deep-merged over the
    // serialized defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormgateError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormgateError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormgateError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormgateError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormgateError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a file, picking the format from its extension.
///
/// `.json` files are read as JSON; everything else is read as TOML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, FormgateError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_file(path)
    } else {
        from_toml_file(path)
    }
}

/// Loads settings from a file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormgateError> {
    let mut settings = from_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Numeric variables that fail to parse are ignored with a warning.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` as the variable source.
fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("FORMGATE_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("FORMGATE_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("FORMGATE_PASSWORD_MIN_LENGTH") {
        match parse_number::<usize>("FORMGATE_PASSWORD_MIN_LENGTH", &val) {
            Some(0) => tracing::warn!(
                key = "FORMGATE_PASSWORD_MIN_LENGTH",
                "ignoring zero minimum password length"
            ),
            Some(n) => settings.password_policy.min_length = n,
            None => {}
        }
    }

    if let Some(val) = lookup("FORMGATE_SPECIAL_CHARACTERS") {
        if val.is_empty() {
            tracing::warn!(
                key = "FORMGATE_SPECIAL_CHARACTERS",
                "ignoring empty special-character set"
            );
        } else {
            settings.password_policy.special_characters = val;
        }
    }

    if let Some(val) = lookup("FORMGATE_SIMULATED_LATENCY_MS") {
        if let Some(ms) = parse_number("FORMGATE_SIMULATED_LATENCY_MS", &val) {
            settings.submission.simulated_latency_ms = ms;
        }
    }

    if let Some(val) = lookup("FORMGATE_REDIRECT_TO") {
        settings.submission.redirect_to = val;
    }

    if let Some(val) = lookup("FORMGATE_REDIRECT_DELAY_MS") {
        if let Some(ms) = parse_number("FORMGATE_REDIRECT_DELAY_MS", &val) {
            settings.submission.redirect_delay_ms = ms;
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_number<T: std::str::FromStr>(key: &str, val: &str) -> Option<T> {
    match val.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(key, value = val, "ignoring non-numeric environment override");
            None
        }
    }
}

fn read_config(path: &Path, format: &str) -> Result<String, FormgateError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormgateError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, FormgateError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormgateError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    let settings: Settings = serde_json::from_value(merged).map_err(|e| {
        FormgateError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })?;
    check_password_policy(&settings)?;
    Ok(settings)
}

/// Rejects policies no password could satisfy.
fn check_password_policy(settings: &Settings) -> Result<(), FormgateError> {
    let policy = &settings.password_policy;
    if policy.min_length == 0 {
        return Err(FormgateError::ConfigurationError(
            "password_policy.min_length must be at least 1".to_string(),
        ));
    }
    if policy.special_characters.is_empty() {
        return Err(FormgateError::ConfigurationError(
            "password_policy.special_characters must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            log_level = "debug"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        // Defaults preserved
        assert_eq!(settings.password_policy.min_length, 8);
        assert_eq!(settings.submission.redirect_to, "dashboard.html");
    }

    #[test]
    fn test_from_toml_str_partial_nested_table() {
        let toml = r"
            [password_policy]
            min_length = 12
        ";

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.password_policy.min_length, 12);
        assert_eq!(
            settings.password_policy.special_characters,
            crate::settings::DEFAULT_SPECIAL_CHARACTERS
        );
    }

    #[test]
    fn test_from_toml_str_submission() {
        let toml = r#"
            [submission]
            simulated_latency_ms = 10
            redirect_to = "/home"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.submission.simulated_latency_ms, 10);
        assert_eq!(settings.submission.redirect_to, "/home");
        assert_eq!(settings.submission.redirect_delay_ms, 1500);
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(FormgateError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "debug": false,
            "password_policy": { "special_characters": "!?" }
        }"#;

        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.password_policy.special_characters, "!?");
        assert_eq!(settings.password_policy.min_length, 8);
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("formgate.toml");
        let mut f = std::fs::File::create(&toml_path).unwrap();
        writeln!(f, "log_level = \"warn\"").unwrap();

        let json_path = dir.path().join("formgate.json");
        let mut f = std::fs::File::create(&json_path).unwrap();
        writeln!(f, "{{\"log_level\": \"trace\"}}").unwrap();

        assert_eq!(from_file(&toml_path).unwrap().log_level, "warn");
        assert_eq!(from_file(&json_path).unwrap().log_level, "trace");
    }

    #[test]
    fn test_from_file_missing() {
        let result = from_toml_file("/nonexistent/formgate.toml");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    // ── Environment overrides ───────────────────────────────────────

    #[test]
    fn test_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("FORMGATE_DEBUG", "false"),
            ("FORMGATE_LOG_LEVEL", "debug"),
            ("FORMGATE_PASSWORD_MIN_LENGTH", "10"),
            ("FORMGATE_SPECIAL_CHARACTERS", "#"),
            ("FORMGATE_SIMULATED_LATENCY_MS", "5"),
            ("FORMGATE_REDIRECT_TO", "/app"),
            ("FORMGATE_REDIRECT_DELAY_MS", "0"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_overrides(&mut settings, |k| env.get(k).map(ToString::to_string));

        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.password_policy.min_length, 10);
        assert_eq!(settings.password_policy.special_characters, "#");
        assert_eq!(settings.submission.simulated_latency_ms, 5);
        assert_eq!(settings.submission.redirect_to, "/app");
        assert_eq!(settings.submission.redirect_delay_ms, 0);
    }

    #[test]
    fn test_overrides_ignore_bad_numbers() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, |k| {
            (k == "FORMGATE_PASSWORD_MIN_LENGTH").then(|| "eight".to_string())
        });
        assert_eq!(settings.password_policy.min_length, 8);
    }

    #[test]
    fn test_overrides_debug_truthy_values() {
        for (raw, expected) in [("1", true), ("YES", true), ("true", true), ("no", false)] {
            let mut settings = Settings {
                debug: !expected,
                ..Settings::default()
            };
            apply_overrides(&mut settings, |k| {
                (k == "FORMGATE_DEBUG").then(|| raw.to_string())
            });
            assert_eq!(settings.debug, expected, "FORMGATE_DEBUG={raw}");
        }
    }

    #[test]
    fn test_overrides_ignore_unsatisfiable_policy() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, |k| match k {
            "FORMGATE_PASSWORD_MIN_LENGTH" => Some("0".to_string()),
            "FORMGATE_SPECIAL_CHARACTERS" => Some(String::new()),
            _ => None,
        });
        assert_eq!(settings.password_policy, Settings::default().password_policy);
    }

    // ── Policy checks ───────────────────────────────────────────────

    #[test]
    fn test_empty_special_characters_rejected() {
        let err = from_toml_str("[password_policy]\nspecial_characters = \"\"").unwrap_err();
        assert!(err.to_string().contains("special_characters"), "{err}");

        let json = r#"{"password_policy": {"special_characters": ""}}"#;
        let err = from_json_str(json).unwrap_err();
        assert!(matches!(err, FormgateError::ConfigurationError(_)));
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let err = from_toml_str("[password_policy]\nmin_length = 0").unwrap_err();
        assert!(err.to_string().contains("min_length"), "{err}");

        let err = from_json_str(r#"{"password_policy": {"min_length": 0}}"#).unwrap_err();
        assert!(matches!(err, FormgateError::ConfigurationError(_)));
    }

    #[test]
    fn test_custom_policy_accepted() {
        let toml = "[password_policy]\nmin_length = 1\nspecial_characters = \"_\"";
        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.password_policy.min_length, 1);
        assert_eq!(settings.password_policy.special_characters, "_");
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_deep() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }
}
