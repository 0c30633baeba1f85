//! Settings loading.
//!
//! Layers, lowest to highest priority: built-in defaults, an `rk.toml`
//! file, `RK_*` environment variables. Nested keys use `__` in variable
//! names, e.g. `RK_TEN_DICE__LITTLE_TRUTHS=true`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rk_dice::{DiceError, TenDiceRule};
use serde::{Deserialize, Serialize};

/// Settings file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "rk.toml";

/// Everything the roller can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ten Dice Rule variant.
    pub ten_dice: TenDiceRule,
    /// Target number used when a roll does not give one.
    pub default_tn: i64,
    /// Fixed RNG seed; rolls are random when unset.
    pub seed: Option<u64>,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> Result<Self, DiceError> {
        let file = match path {
            Some(p) if !p.is_file() => {
                return Err(DiceError::InvalidConfig(format!(
                    "config file '{}' not found",
                    p.display()
                )));
            }
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG),
        };

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed("RK_").split("__"))
            .extract()
            .map_err(|e| DiceError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.ten_dice.little_truths);
        assert_eq!(settings.default_tn, 0);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/rk.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn reads_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "default_tn = 15\nseed = 7\n\n[ten_dice]\nlittle_truths = true\n",
            )?;
            let settings = Settings::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(settings.default_tn, 15);
            assert_eq!(settings.seed, Some(7));
            assert!(settings.ten_dice.little_truths);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("rk.toml", "default_tn = 15\n")?;
            jail.set_env("RK_DEFAULT_TN", "20");
            jail.set_env("RK_TEN_DICE__LITTLE_TRUTHS", "true");
            let settings = Settings::load(None).map_err(|e| e.to_string())?;
            assert_eq!(settings.default_tn, 20);
            assert!(settings.ten_dice.little_truths);
            Ok(())
        });
    }
}
