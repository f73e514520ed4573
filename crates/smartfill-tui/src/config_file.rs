use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use smartfill_core::{Binding, FieldBindings, FieldPath};

use crate::model::settings::{InputSpec, Settings};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub key: Option<String>,
    pub display_fields: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub inputs: Option<Vec<InputConfig>>,
    pub bindings: Option<Vec<BindingConfig>>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub id: String,
    pub label: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingConfig {
    pub path: String,
    pub input: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Platform config directory path: `<config_dir>/smartfill/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("smartfill").join("config.toml"))
}

/// Load config by cascading CWD `.smartfill.toml` over platform config.
/// CWD values override platform values. Unreadable files are skipped.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p).ok());
    let cwd = load_from_path(Path::new(".smartfill.toml")).ok();

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load an explicitly requested config file over the cascaded ones.
/// Unlike the cascade, failures here are reported.
pub fn load_config_with(explicit: &Path) -> Result<ConfigFile, ConfigError> {
    let overlay = load_from_path(explicit)?;
    Ok(merge(load_config(), overlay))
}

pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
/// Lists replace rather than concatenate.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let display = match (base.display, overlay.display) {
        (None, None) => None,
        (b, o) => {
            let b = b.unwrap_or_default();
            let o = o.unwrap_or_default();
            Some(DisplayConfig {
                theme: o.theme.or(b.theme),
                log_file: o.log_file.or(b.log_file),
            })
        }
    };
    ConfigFile {
        source: overlay.source.or(base.source),
        key: overlay.key.or(base.key),
        display_fields: overlay.display_fields.or(base.display_fields),
        timeout_secs: overlay.timeout_secs.or(base.timeout_secs),
        inputs: overlay.inputs.or(base.inputs),
        bindings: overlay.bindings.or(base.bindings),
        display,
    }
}

/// Fill `settings` from a `ConfigFile`.
/// Only sets values that are `Some` in the file config (doesn't overwrite with defaults).
pub fn apply_to_settings(file_cfg: &ConfigFile, settings: &mut Settings) {
    if let Some(ref source) = file_cfg.source
        && !source.is_empty()
    {
        settings.source = Some(source.clone());
    }
    if let Some(ref key) = file_cfg.key
        && !key.is_empty()
    {
        settings.key = Some(key.clone());
    }
    if let Some(ref fields) = file_cfg.display_fields {
        settings.display_fields = fields.iter().map(|f| FieldPath::new(f.as_str())).collect();
    }
    if let Some(secs) = file_cfg.timeout_secs {
        settings.timeout_secs = secs.max(1);
    }
    if let Some(ref inputs) = file_cfg.inputs {
        settings.inputs = inputs
            .iter()
            .map(|i| InputSpec {
                id: i.id.clone(),
                label: i.label.clone().unwrap_or_else(|| i.id.clone()),
                value: i.value.clone().unwrap_or_default(),
            })
            .collect();
    }
    if let Some(ref bindings) = file_cfg.bindings {
        settings.bindings = bindings
            .iter()
            .map(|b| Binding::new(b.path.as_str(), b.input.as_str()))
            .collect::<FieldBindings>();
    }
    if let Some(disp) = &file_cfg.display {
        if let Some(ref theme) = disp.theme
            && !theme.is_empty()
        {
            settings.theme_name = theme.clone();
        }
        if let Some(ref log_file) = disp.log_file
            && !log_file.is_empty()
        {
            settings.log_file = Some(log_file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
source = "https://example.com/users.json"
key = "users"
display_fields = ["name", "address.city"]

[[inputs]]
id = "nameInput"
label = "Name"

[[inputs]]
id = "cityInput"

[[bindings]]
path = "name"
input = "nameInput"

[[bindings]]
path = "address.city"
input = "cityInput"

[display]
theme = "modern"
"#;

    #[test]
    fn parses_and_applies_full_config() {
        let cfg: ConfigFile = toml::from_str(SAMPLE).unwrap();
        let mut settings = Settings::default();
        apply_to_settings(&cfg, &mut settings);

        assert_eq!(settings.key.as_deref(), Some("users"));
        assert_eq!(settings.display_fields.len(), 2);
        assert_eq!(settings.inputs[1].label, "cityInput");
        assert_eq!(
            settings.bindings.path_for(&"cityInput".into()),
            Some(&FieldPath::from("address.city"))
        );
        assert_eq!(settings.theme_name, "modern");
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn overlay_wins_field_by_field() {
        let base: ConfigFile = toml::from_str(SAMPLE).unwrap();
        let overlay: ConfigFile = toml::from_str(
            r#"
key = "people"
[display]
log_file = "/tmp/smartfill.log"
"#,
        )
        .unwrap();
        let merged = merge(base, overlay);
        assert_eq!(merged.key.as_deref(), Some("people"));
        assert_eq!(merged.source.as_deref(), Some("https://example.com/users.json"));
        let display = merged.display.unwrap();
        assert_eq!(display.theme.as_deref(), Some("modern"));
        assert_eq!(display.log_file.as_deref(), Some("/tmp/smartfill.log"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config_with(Path::new("/nonexistent/smartfill.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_file_parse_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "source = [").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn empty_strings_do_not_clear_values() {
        let cfg: ConfigFile = toml::from_str(r#"source = """#).unwrap();
        let mut settings = Settings {
            source: Some("users.json".into()),
            ..Settings::default()
        };
        apply_to_settings(&cfg, &mut settings);
        assert_eq!(settings.source.as_deref(), Some("users.json"));
    }
}
