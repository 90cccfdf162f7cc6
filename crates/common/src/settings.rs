//! Provider signing configuration.
//!
//! Settings come from an optional TOML document layered under `IOPROOF_*`
//! environment variables, so `IOPROOF_PRIVATE_KEY`, `IOPROOF_PUBLIC_KEY` and
//! `IOPROOF_KEY_ID` configure a provider without any file.

use std::fmt;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use crate::constants::DEFAULT_CACHE_MAX_AGE_SECONDS;
use crate::error::IoProofError;
use crate::response_signing::{KeyEntry, ResponseSigner, WellKnownDirectory};

pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "IOPROOF";
pub const ENVIRONMENT_VARIABLE_SEPARATOR: &str = "__";

#[derive(Clone, Deserialize, Validate)]
pub struct Settings {
    /// Hex of the 32-byte Ed25519 seed.
    #[validate(length(equal = 64))]
    pub private_key: String,

    #[validate(length(min = 1))]
    pub key_id: String,

    /// Optional hex public key, checked against `private_key` when present.
    #[serde(default)]
    #[validate(length(equal = 64))]
    pub public_key: Option<String>,

    /// Retired keys still published for verifiers, oldest first.
    #[serde(default)]
    pub previous_keys: Vec<KeyEntry>,

    #[serde(default = "default_cache_max_age_seconds")]
    #[validate(range(min = 60, max = 86400))]
    pub cache_max_age_seconds: u32,
}

fn default_cache_max_age_seconds() -> u32 {
    DEFAULT_CACHE_MAX_AGE_SECONDS
}

impl Settings {
    /// Loads settings from the environment alone.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, Report<IoProofError>> {
        Self::from_toml("")
    }

    /// Loads settings from a TOML file with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the file cannot be read or the
    /// resulting settings are invalid.
    pub fn from_file(path: &Path) -> Result<Self, Report<IoProofError>> {
        let toml_str = std::fs::read_to_string(path).change_context(IoProofError::Configuration {
            message: format!("Failed to read settings file {}", path.display()),
        })?;
        Self::from_toml(&toml_str)
    }

    /// Parses a TOML document with `IOPROOF_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if parsing or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<IoProofError>> {
        let environment = Environment::with_prefix(ENVIRONMENT_VARIABLE_PREFIX)
            .prefix_separator("_")
            .separator(ENVIRONMENT_VARIABLE_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let settings: Self = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .and_then(|config| config.try_deserialize())
            .change_context(IoProofError::Configuration {
                message: "Failed to load settings".into(),
            })?;

        settings
            .validate()
            .change_context(IoProofError::Configuration {
                message: "Settings validation failed".into(),
            })?;

        Ok(settings)
    }

    /// Builds the signer, checking the configured public key when present.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the private key is malformed
    /// or does not match `public_key`.
    pub fn signer(&self) -> Result<ResponseSigner, Report<IoProofError>> {
        let signer = ResponseSigner::from_private_key_hex(&self.private_key, &self.key_id)
            .attach("while loading IOPROOF_PRIVATE_KEY")?;

        if let Some(public_key) = &self.public_key {
            if !public_key.eq_ignore_ascii_case(&signer.public_key_hex()) {
                return Err(Report::new(IoProofError::Configuration {
                    message: "IOPROOF_PUBLIC_KEY does not match IOPROOF_PRIVATE_KEY".into(),
                }));
            }
        }

        Ok(signer)
    }

    /// Keys to publish: previous keys in configured order, then the current key.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the current key is invalid.
    pub fn active_keys(&self) -> Result<Vec<KeyEntry>, Report<IoProofError>> {
        let signer = self.signer()?;
        let mut keys = self.previous_keys.clone();
        keys.retain(|entry| entry.kid != self.key_id);
        keys.push(KeyEntry::new(signer.key_id(), signer.public_key_hex()));
        Ok(keys)
    }

    /// Discovery document for the active keys.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the current key is invalid.
    pub fn directory(&self) -> Result<WellKnownDirectory, Report<IoProofError>> {
        Ok(WellKnownDirectory::new(&self.active_keys()?))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("private_key", &"<redacted>")
            .field("key_id", &self.key_id)
            .field("public_key", &self.public_key)
            .field("previous_keys", &self.previous_keys)
            .field("cache_max_age_seconds", &self.cache_max_age_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::{crate_test_settings_str, VECTOR};

    const ENV_VARS: [&str; 4] = [
        "IOPROOF_PRIVATE_KEY",
        "IOPROOF_PUBLIC_KEY",
        "IOPROOF_KEY_ID",
        "IOPROOF_CACHE_MAX_AGE_SECONDS",
    ];

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset(ENV_VARS, f)
    }

    #[test]
    fn test_settings_from_valid_toml() {
        let settings = without_env(|| Settings::from_toml(&crate_test_settings_str()))
            .expect("should load settings");

        assert_eq!(settings.key_id, VECTOR.key_id);
        assert_eq!(settings.public_key.as_deref(), Some(VECTOR.public_key));
        assert_eq!(settings.cache_max_age_seconds, 3600);
        assert!(settings.previous_keys.is_empty());

        let signer = settings.signer().expect("should build signer");
        assert_eq!(signer.public_key_hex(), VECTOR.public_key);
    }

    #[test]
    fn test_settings_from_env() {
        temp_env::with_vars(
            [
                ("IOPROOF_PRIVATE_KEY", Some(VECTOR.private_key)),
                ("IOPROOF_PUBLIC_KEY", Some(VECTOR.public_key)),
                ("IOPROOF_KEY_ID", Some("2026-02")),
                ("IOPROOF_CACHE_MAX_AGE_SECONDS", None),
            ],
            || {
                let settings = Settings::from_env().expect("should load from env");
                assert_eq!(settings.key_id, "2026-02");
                assert_eq!(settings.private_key, VECTOR.private_key);
            },
        );
    }

    #[test]
    fn test_env_overrides_toml() {
        temp_env::with_vars(
            [
                ("IOPROOF_KEY_ID", Some("override")),
                ("IOPROOF_CACHE_MAX_AGE_SECONDS", Some("600")),
                ("IOPROOF_PRIVATE_KEY", None),
                ("IOPROOF_PUBLIC_KEY", None),
            ],
            || {
                let settings =
                    Settings::from_toml(&crate_test_settings_str()).expect("should load");
                assert_eq!(settings.key_id, "override");
                assert_eq!(settings.cache_max_age_seconds, 600);
            },
        );
    }

    #[test]
    fn test_missing_private_key() {
        let err = without_env(|| Settings::from_toml(r#"key_id = "2026-01""#))
            .expect_err("should require private_key");
        assert!(matches!(
            err.current_context(),
            IoProofError::Configuration { .. }
        ));
    }

    #[test]
    fn test_wrong_length_private_key() {
        let toml_str = r#"
            private_key = "abcd"
            key_id = "2026-01"
            "#;
        let err =
            without_env(|| Settings::from_toml(toml_str)).expect_err("should fail validation");
        assert!(err.to_string().contains("validation"));
    }

    #[test]
    fn test_cache_max_age_out_of_range() {
        let toml_str = format!("{}\ncache_max_age_seconds = 5\n", crate_test_settings_str());
        assert!(without_env(|| Settings::from_toml(&toml_str)).is_err());
    }

    #[test]
    fn test_non_hex_private_key_fails_at_signer() {
        let toml_str = format!(
            r#"
            private_key = "{}"
            key_id = "2026-01"
            "#,
            "zz".repeat(32)
        );
        let settings = without_env(|| Settings::from_toml(&toml_str)).expect("length is valid");
        let err = settings.signer().expect_err("should reject non-hex key");
        assert!(matches!(
            err.current_context(),
            IoProofError::Configuration { .. }
        ));
    }

    #[test]
    fn test_mismatched_public_key() {
        let toml_str = format!(
            r#"
            private_key = "{}"
            public_key = "{}"
            key_id = "2026-01"
            "#,
            VECTOR.private_key,
            "aa".repeat(32)
        );
        let settings = without_env(|| Settings::from_toml(&toml_str)).expect("should parse");
        let err = settings.signer().expect_err("should detect mismatch");
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_directory_with_previous_keys() {
        let toml_str = format!(
            r#"
            private_key = "{}"
            key_id = "2026-02"

            [[previous_keys]]
            kid = "2026-01"
            public_key = "{}"
            "#,
            VECTOR.private_key,
            "aa".repeat(32)
        );
        let settings = without_env(|| Settings::from_toml(&toml_str)).expect("should parse");
        let directory = settings.directory().expect("should build directory");

        assert_eq!(directory.keys.len(), 2);
        assert_eq!(directory.keys[0].kid, "2026-01");
        assert_eq!(directory.keys[1].kid, "2026-02");
        assert_eq!(directory.keys[1].public_key, VECTOR.public_key);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let settings = without_env(|| Settings::from_toml(&crate_test_settings_str()))
            .expect("should load settings");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains(VECTOR.private_key));
    }
}
