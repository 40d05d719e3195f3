// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::app_arguments::AppArguments;
use crate::color_engine::DEFAULT_HEX_COLOR;
use crate::color_utils;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_CONFIG_NAME: &str = "oxpicker_config.json";
const DEFAULT_LOG_NAME: &str = "oxpicker.log";
const DEFAULT_COPY_FEEDBACK_DURATION_MS: u64 = 2000;

const DEFAULT_PALETTE: &[&str] = &[
    DEFAULT_HEX_COLOR,
    "#000000",
    "#ffffff",
    "#808080",
    "#ff0000",
    "#ffa500",
    "#ffff00",
    "#00ff00",
    "#008080",
    "#00ffff",
    "#0000ff",
    "#800080",
    "#ff00ff",
    "#a52a2a",
    "#f5deb3",
    "#1e90ff",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: String,
    pub default_color: String,
    pub palette: Vec<String>,
    pub always_on_top: bool,
    pub copy_feedback_duration_ms: u64,
    pub report_copy_failures: bool,
    pub log_level: String,
    pub custom_theme: Option<CustomTheme>,
    #[serde(skip)]
    pub paths: PathCaches,
    #[serde(skip)]
    pub custom_title: Option<String>,
    #[serde(skip)]
    pub start_color: Option<String>,
    // problems with the file itself, the defaults are used instead
    #[serde(skip)]
    pub config_read_error: Option<String>,
    // problems with separate values that were replaced with defaults
    #[serde(skip)]
    pub validation_errors: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathCaches {
    pub exe_folder_path: PathBuf,
    pub config_path: PathBuf,
    pub log_path: PathBuf,
}

// colors are stored as hex strings, same as the user would type them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTheme {
    pub background: String,
    pub text: String,
    pub primary: String,
    pub success: String,
    pub danger: String,
}

impl Default for CustomTheme {
    fn default() -> Self {
        CustomTheme {
            background: "#40424a".to_string(),
            text: "#ffffff".to_string(),
            primary: "#7387da".to_string(),
            success: "#4f802b".to_string(),
            danger: "#b34d4d".to_string(),
        }
    }
}

impl CustomTheme {
    pub fn is_valid(&self) -> bool {
        [
            &self.background,
            &self.text,
            &self.primary,
            &self.success,
            &self.danger,
        ]
        .iter()
        .all(|color| color_utils::is_valid_hex(color))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_color: DEFAULT_HEX_COLOR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|hex| hex.to_string()).collect(),
            always_on_top: false,
            copy_feedback_duration_ms: DEFAULT_COPY_FEEDBACK_DURATION_MS,
            report_copy_failures: true,
            log_level: "info".to_string(),
            custom_theme: None,
            paths: PathCaches::default(),
            custom_title: None,
            start_color: None,
            config_read_error: None,
            validation_errors: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn get_log_level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }

    pub fn get_copy_feedback_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.copy_feedback_duration_ms)
    }

    // the color the session starts with, both candidates are validated on read
    pub fn get_start_color(&self) -> &str {
        self.start_color.as_deref().unwrap_or(&self.default_color)
    }

    pub fn get_config_problems(&self) -> Option<String> {
        let mut problems: Vec<&str> = Vec::new();
        if let Some(error) = &self.config_read_error {
            problems.push(error);
        }
        problems.extend(self.validation_errors.iter().map(String::as_str));

        if problems.is_empty() {
            None
        } else {
            Some(problems.join("\n"))
        }
    }
}

pub fn write_config_to_file(config: &AppConfig, path: &Path) -> Result<(), String> {
    let data = serde_json::to_string_pretty(config).map_err(|err| {
        format!(
            "Failed to serialize config.\nNotify the developer about this error.\nError: {}",
            err
        )
    })?;
    std::fs::write(path, data).map_err(|err| {
        format!(
            "Failed to write config to '{}'.\nMake sure you have write rights to that folder.\nError: {}",
            path.to_string_lossy(),
            err
        )
    })
}

fn default_config_with_error(paths: PathCaches, error: String) -> AppConfig {
    AppConfig {
        paths,
        config_read_error: Some(error),
        ..Default::default()
    }
}

pub fn read_config(app_arguments: &AppArguments) -> AppConfig {
    let exe_folder_path = get_exe_folder_path();
    let paths = PathCaches {
        config_path: match &app_arguments.custom_config_path {
            Some(path) => PathBuf::from(path),
            None => exe_folder_path.join(DEFAULT_CONFIG_NAME),
        },
        log_path: match &app_arguments.custom_log_path {
            Some(path) => PathBuf::from(path),
            None => exe_folder_path.join(DEFAULT_LOG_NAME),
        },
        exe_folder_path,
    };

    let mut config = read_config_from_path(paths);
    config.custom_title = app_arguments.custom_title.clone();
    apply_start_color(&mut config, app_arguments.start_color.as_deref());
    config
}

pub fn read_config_from_path(paths: PathCaches) -> AppConfig {
    // if config file doesn't exist, create it
    if !paths.config_path.exists() {
        let default_config = AppConfig {
            paths: paths.clone(),
            ..Default::default()
        };
        if let Err(error) = write_config_to_file(&default_config, &paths.config_path) {
            return default_config_with_error(paths, error);
        }
        return default_config;
    }

    let data = match std::fs::read_to_string(&paths.config_path) {
        Ok(data) => data,
        Err(err) => {
            let error = format!(
                "Config file '{}' can't be read.\nMake sure you have read rights to that file.\nError: {}",
                paths.config_path.to_string_lossy(),
                err
            );
            return default_config_with_error(paths, error);
        }
    };

    let mut config: AppConfig = match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(err) => {
            let error = format!(
                "Config file '{}' has incorrect format:\n{}",
                paths.config_path.to_string_lossy(),
                err
            );
            return default_config_with_error(paths, error);
        }
    };

    config.paths = paths;
    update_config_version(&mut config);
    validate_config_values(&mut config);
    config
}

// Rewrites a config saved by another version so it carries the current
// version and lists the fields that were added since then.
// Runs before validation so invalid values stay in the file for the user to fix.
fn update_config_version(config: &mut AppConfig) {
    let current_version = env!("CARGO_PKG_VERSION");
    if config.version == current_version {
        return;
    }

    log::info!(
        "Updating config from version '{}' to '{}'",
        config.version,
        current_version
    );
    config.version = current_version.to_string();
    if let Err(error) = write_config_to_file(config, &config.paths.config_path) {
        config.validation_errors.push(format!(
            "Config was not updated to version {}:\n{}",
            current_version, error
        ));
    }
}

fn validate_config_values(config: &mut AppConfig) {
    if !color_utils::is_valid_hex(&config.default_color) {
        config.validation_errors.push(format!(
            "Default color '{}' is not a valid hex color, using {} instead",
            config.default_color, DEFAULT_HEX_COLOR
        ));
        config.default_color = DEFAULT_HEX_COLOR.to_string();
    }

    let invalid_palette_entries: Vec<String> = config
        .palette
        .iter()
        .filter(|hex| !color_utils::is_valid_hex(hex))
        .cloned()
        .collect();
    if !invalid_palette_entries.is_empty() {
        config.validation_errors.push(format!(
            "Palette colors {} are not valid hex colors and were skipped",
            invalid_palette_entries.join(", ")
        ));
        config.palette.retain(|hex| color_utils::is_valid_hex(hex));
    }

    if log::LevelFilter::from_str(&config.log_level).is_err() {
        config.validation_errors.push(format!(
            "Unknown log level '{}', using 'info' instead",
            config.log_level
        ));
        config.log_level = "info".to_string();
    }

    if let Some(custom_theme) = &config.custom_theme {
        if !custom_theme.is_valid() {
            config
                .validation_errors
                .push("Custom theme has invalid colors, using the default theme".to_string());
            config.custom_theme = None;
        }
    }
}

fn apply_start_color(config: &mut AppConfig, start_color: Option<&str>) {
    let Some(start_color) = start_color else {
        return;
    };

    if color_utils::is_valid_hex(start_color) {
        config.start_color = Some(start_color.to_string());
    } else {
        config.validation_errors.push(format!(
            "Start color '{}' is not a valid hex color and was ignored",
            start_color
        ));
    }
}

fn get_exe_folder_path() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_default()
        .parent()
        .unwrap_or(&PathBuf::from(""))
        .to_str()
        .unwrap_or_default()
        .to_string()
        .trim_start_matches("\\\\?\\")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get_test_paths(test_name: &str) -> PathCaches {
        let folder = std::env::temp_dir().join(format!(
            "oxpicker_config_test_{}_{}",
            test_name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&folder);
        std::fs::create_dir_all(&folder).unwrap();
        PathCaches {
            exe_folder_path: folder.clone(),
            config_path: folder.join(DEFAULT_CONFIG_NAME),
            log_path: folder.join(DEFAULT_LOG_NAME),
        }
    }

    #[test]
    fn test_missing_config_file_is_created_with_defaults() {
        let paths = get_test_paths("missing");

        let config = read_config_from_path(paths.clone());

        assert!(paths.config_path.exists());
        assert_eq!(config.default_color, "#283d46");
        assert_eq!(config.copy_feedback_duration_ms, 2000);
        assert!(config.report_copy_failures);
        assert_eq!(config.get_config_problems(), None);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.config_path).unwrap()).unwrap();
        assert_eq!(written["default_color"], json!("#283d46"));
    }

    #[test]
    fn test_incorrect_json_falls_back_to_defaults_with_error() {
        let paths = get_test_paths("bad_json");
        std::fs::write(&paths.config_path, "{ not json").unwrap();

        let config = read_config_from_path(paths);

        assert_eq!(config.default_color, "#283d46");
        assert!(config
            .config_read_error
            .unwrap()
            .contains("has incorrect format"));
    }

    #[test]
    fn test_missing_fields_take_default_values() {
        let paths = get_test_paths("partial");
        std::fs::write(
            &paths.config_path,
            json!({"default_color": "#ffa500", "always_on_top": true}).to_string(),
        )
        .unwrap();

        let config = read_config_from_path(paths);

        assert_eq!(config.default_color, "#ffa500");
        assert!(config.always_on_top);
        assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.get_config_problems(), None);
    }

    #[test]
    fn test_invalid_values_are_replaced_and_reported() {
        let paths = get_test_paths("invalid_values");
        std::fs::write(
            &paths.config_path,
            json!({
                "default_color": "#12345",
                "palette": ["#fff", "nope", "#000000", "#gg0000"],
                "log_level": "loud",
                "custom_theme": {
                    "background": "#000",
                    "text": "#fff",
                    "primary": "blue",
                    "success": "#0f0",
                    "danger": "#f00"
                }
            })
            .to_string(),
        )
        .unwrap();

        let config = read_config_from_path(paths);

        assert_eq!(config.default_color, "#283d46");
        assert_eq!(config.palette, vec!["#fff".to_string(), "#000000".to_string()]);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.custom_theme, None);
        assert_eq!(config.validation_errors.len(), 4);
        assert!(config.get_config_problems().unwrap().contains("nope, #gg0000"));
    }

    #[test]
    fn test_start_color_overrides_default_only_when_valid() {
        let mut config = AppConfig::default();
        apply_start_color(&mut config, Some("fa0"));
        assert_eq!(config.get_start_color(), "fa0");

        let mut config = AppConfig::default();
        apply_start_color(&mut config, Some("orange"));
        assert_eq!(config.get_start_color(), "#283d46");
        assert_eq!(config.validation_errors.len(), 1);
    }

    #[test]
    fn test_log_level_filter_is_parsed() {
        let config = AppConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(config.get_log_level_filter(), log::LevelFilter::Debug);
        assert_eq!(
            AppConfig::default().get_log_level_filter(),
            log::LevelFilter::Info
        );
    }

    #[test]
    fn test_config_from_older_version_is_rewritten_with_new_fields() {
        let paths = get_test_paths("older_version");
        std::fs::write(
            &paths.config_path,
            json!({"version": "0.0.1", "default_color": "#nothex"}).to_string(),
        )
        .unwrap();

        let config = read_config_from_path(paths.clone());

        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.config_path).unwrap()).unwrap();
        assert_eq!(written["version"], json!(env!("CARGO_PKG_VERSION")));
        assert_eq!(written["copy_feedback_duration_ms"], json!(2000));
        // the user's value is kept in the file even though it's replaced in memory
        assert_eq!(written["default_color"], json!("#nothex"));
        assert_eq!(config.default_color, "#283d46");
    }

    #[test]
    fn test_config_with_current_version_is_not_rewritten() {
        let paths = get_test_paths("current_version");
        let data = json!({"version": env!("CARGO_PKG_VERSION"), "always_on_top": true}).to_string();
        std::fs::write(&paths.config_path, &data).unwrap();

        let config = read_config_from_path(paths.clone());

        assert!(config.always_on_top);
        assert_eq!(std::fs::read_to_string(&paths.config_path).unwrap(), data);
    }

    #[test]
    fn test_default_custom_theme_is_valid() {
        assert!(CustomTheme::default().is_valid());
    }
}
