//! Configuration loading for the `wug` CLI.
//!
//! Connection settings come from a TOML file and `WUG_*` environment
//! variables, merged by figment, and translate into a
//! `wug_core::ConnectionConfig`. Desired-state manifests are read from
//! TOML, YAML, or JSON files and validated into typed records.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wug_core::{ConnectionConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("missing {field}: set it in the config file, via {env}, or on the command line")]
    Missing { field: String, env: String },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported manifest format '{}' (expected .toml, .yaml, .yml, or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Connection settings after merging every source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// API root, e.g. `https://wug.example.net:9644/api/v1`.
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Accept self-signed or otherwise unverifiable certificates.
    #[serde(default)]
    pub allow_unverified_ssl: bool,
    /// PEM bundle to trust in addition to the system store.
    pub ca_cert: Option<PathBuf>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            password: None,
            allow_unverified_ssl: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

/// Values given on the command line. Only the fields that are set take
/// part in the merge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_unverified_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("cloud", "nerim", "wug").map_or_else(
        || PathBuf::from(".wug.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Settings keys whose environment values are strings as written.
const VERBATIM_ENV: [(&str, &str); 2] = [("user", "WUG_USER"), ("password", "WUG_PASSWORD")];

/// Merge defaults, the config file, `WUG_*` variables, and `overrides`,
/// later sources winning.
///
/// An explicit `path` must exist; the default location is optional.
/// `WUG_USER` and `WUG_PASSWORD` are taken verbatim, never parsed as
/// numbers or booleans.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let path = match path {
        Some(explicit) if !explicit.exists() => {
            return Err(ConfigError::FileNotFound {
                path: explicit.to_path_buf(),
            });
        }
        Some(explicit) => explicit.to_path_buf(),
        None => config_path(),
    };

    let mut figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("WUG_").ignore(&VERBATIM_ENV.map(|(key, _)| key)));

    for (key, var) in VERBATIM_ENV {
        if let Ok(value) = std::env::var(var) {
            figment = figment.merge(Serialized::default(key, value));
        }
    }

    Ok(figment.merge(Serialized::defaults(overrides)).extract()?)
}

impl Settings {
    /// Validate and build the runtime connection config.
    pub fn into_connection(self) -> Result<ConnectionConfig, ConfigError> {
        let raw_url = self.url.ok_or_else(|| missing("url", "WUG_URL"))?;
        let url = raw_url.parse().map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("{raw_url}: {e}"),
        })?;

        let username = self.user.ok_or_else(|| missing("user", "WUG_USER"))?;
        let password = self
            .password
            .ok_or_else(|| missing("password", "WUG_PASSWORD"))?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = if self.allow_unverified_ssl {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ca) = self.ca_cert {
            TlsVerification::CustomCa(ca)
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ConnectionConfig {
            url,
            username,
            password: SecretString::from(password),
            tls,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

fn missing(field: &str, env: &str) -> ConfigError {
    ConfigError::Missing {
        field: field.into(),
        env: env.into(),
    }
}

// ── Manifests ───────────────────────────────────────────────────────

/// Read one desired-state record from a TOML, YAML, or JSON file,
/// chosen by extension.
pub fn load_manifest<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let figment = match ext.as_deref() {
        Some("toml") => Figment::from(Toml::file(path)),
        Some("yaml" | "yml") => Figment::from(Yaml::file(path)),
        Some("json") => Figment::from(Json::file(path)),
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    Ok(figment.extract()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;
    use wug_core::{Device, Monitor, MonitorType, TemplateOption};

    use super::*;

    #[test]
    fn file_then_env_then_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "wug.toml",
                r#"
                    url = "https://file.local/api/v1"
                    user = "file-user"
                    password = "file-pass"
                    timeout = 10
                "#,
            )?;
            jail.set_env("WUG_USER", "env-user");
            jail.set_env("WUG_ALLOW_UNVERIFIED_SSL", "true");

            let overrides = Overrides {
                url: Some("https://flag.local/api/v1".into()),
                ..Overrides::default()
            };
            let settings = load_settings(Some(Path::new("wug.toml")), &overrides).unwrap();

            assert_eq!(settings.url.as_deref(), Some("https://flag.local/api/v1"));
            assert_eq!(settings.user.as_deref(), Some("env-user"));
            assert_eq!(settings.password.as_deref(), Some("file-pass"));
            assert!(settings.allow_unverified_ssl);
            assert_eq!(settings.timeout, 10);
            Ok(())
        });
    }

    #[test]
    fn numeric_credentials_from_env_stay_strings() {
        Jail::expect_with(|jail| {
            jail.create_file("wug.toml", r#"url = "https://wug.local/api/v1""#)?;
            jail.set_env("WUG_USER", "1001");
            jail.set_env("WUG_PASSWORD", "0123456");

            let settings = load_settings(Some(Path::new("wug.toml")), &Overrides::default())
                .unwrap();
            assert_eq!(settings.user.as_deref(), Some("1001"));
            assert_eq!(settings.password.as_deref(), Some("0123456"));

            let connection = settings.into_connection().unwrap();
            assert_eq!(connection.password.expose_secret(), "0123456");
            Ok(())
        });
    }

    #[test]
    fn boolean_looking_password_stays_a_string() {
        Jail::expect_with(|jail| {
            jail.create_file("wug.toml", "")?;
            jail.set_env("WUG_PASSWORD", "true");
            jail.set_env("WUG_TIMEOUT", "12");

            let settings = load_settings(Some(Path::new("wug.toml")), &Overrides::default())
                .unwrap();
            assert_eq!(settings.password.as_deref(), Some("true"));
            assert_eq!(settings.timeout, 12);
            Ok(())
        });
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let settings = Settings {
            url: Some("https://wug.local/api/v1".into()),
            user: Some("admin".into()),
            password: Some("pw".into()),
            timeout: 0,
            ..Settings::default()
        };
        let err = settings.into_connection().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "timeout"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("/nonexistent/wug.toml")), &Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn connection_requires_credentials() {
        let settings = Settings {
            url: Some("https://wug.local/api/v1".into()),
            user: Some("admin".into()),
            ..Settings::default()
        };
        let err = settings.into_connection().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref field, .. } if field == "password"));
    }

    #[test]
    fn connection_tls_selection() {
        let base = Settings {
            url: Some("https://wug.local/api/v1".into()),
            user: Some("admin".into()),
            password: Some("pw".into()),
            ..Settings::default()
        };

        let strict = base.clone().into_connection().unwrap();
        assert_eq!(strict.tls, TlsVerification::SystemDefaults);
        assert_eq!(strict.password.expose_secret(), "pw");

        let insecure = Settings {
            allow_unverified_ssl: true,
            ca_cert: Some("/etc/wug/ca.pem".into()),
            ..base.clone()
        }
        .into_connection()
        .unwrap();
        assert_eq!(insecure.tls, TlsVerification::DangerAcceptInvalid);

        let pinned = Settings {
            ca_cert: Some("/etc/wug/ca.pem".into()),
            ..base
        }
        .into_connection()
        .unwrap();
        assert_eq!(
            pinned.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/wug/ca.pem"))
        );
    }

    #[test]
    fn bad_url_is_a_validation_error() {
        let settings = Settings {
            url: Some("not a url".into()),
            user: Some("admin".into()),
            password: Some("pw".into()),
            ..Settings::default()
        };
        assert!(matches!(
            settings.into_connection().unwrap_err(),
            ConfigError::Validation { .. }
        ));
    }

    #[test]
    fn device_manifest_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "switch.toml",
                r#"
                    name = "core-switch-1"
                    options = "L2"

                    [[groups]]
                    name = "Network"

                    [[interface]]
                    default = true
                    network_address = "10.0.0.1"
                    network_name = "sw1"

                    [[active_monitor]]
                    name = "Ping"
                    critical = true
                    polling_order = 1
                "#,
            )?;

            let device: Device = load_manifest(Path::new("switch.toml")).unwrap();
            assert_eq!(device.name, "core-switch-1");
            assert_eq!(device.options, TemplateOption::L2);
            assert_eq!(device.interfaces.len(), 1);
            assert_eq!(device.active_monitors.iter().next().unwrap().polling_order, 1);
            Ok(())
        });
    }

    #[test]
    fn monitor_manifest_from_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "ping.yaml",
                "device_id: \"42\"\ntype: active\nactive:\n  interface_id: 5\n",
            )?;

            let monitor: Monitor = load_manifest(Path::new("ping.yaml")).unwrap();
            assert_eq!(monitor.kind, MonitorType::Active);
            assert_eq!(monitor.active.unwrap().interface_id, Some(5));
            Ok(())
        });
    }

    #[test]
    fn invalid_enum_in_manifest_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.json", r#"{ "name": "x", "options": "full" }"#)?;
            assert!(load_manifest::<Device>(Path::new("bad.json")).is_err());
            Ok(())
        });
    }

    #[test]
    fn unknown_extension_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("device.ini", "name = x")?;
            let err = load_manifest::<Device>(Path::new("device.ini")).unwrap_err();
            assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
            Ok(())
        });
    }
}
