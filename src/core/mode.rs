use serde::{Deserialize, Serialize};

/// Build variant selector, resolved once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
    Stats,
}

impl Mode {
    /// Environment variable consulted by `from_env`
    pub const ENV_VAR: &'static str = "NODE_ENV";

    /// Read the mode from `NODE_ENV`. An unset or unrecognized value
    /// resolves to `Production`; this never fails.
    pub fn from_env() -> Self {
        Self::from_name(&std::env::var(Self::ENV_VAR).unwrap_or_default())
    }

    /// Map a mode name to a `Mode`. Only "development" and "stats" are
    /// recognized; everything else is the production variant.
    pub fn from_name(name: &str) -> Self {
        match name {
            "development" => Mode::Development,
            "stats" => Mode::Stats,
            _ => Mode::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
            Mode::Stats => "stats",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booleans derived from `Mode` at composition time, immutable afterward.
///
/// `is_prod` is defined as "not development", so a stats build keeps the
/// full production pipeline (minimizer included) and only adds the
/// analyzer on top. Tests pin this interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSwitches {
    pub is_dev: bool,
    pub is_prod: bool,
    pub is_stats: bool,
}

impl FeatureSwitches {
    pub fn from_mode(mode: Mode) -> Self {
        let is_dev = mode == Mode::Development;
        Self {
            is_dev,
            is_prod: !is_dev,
            is_stats: mode == Mode::Stats,
        }
    }
}

impl From<Mode> for FeatureSwitches {
    fn from(mode: Mode) -> Self {
        Self::from_mode(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_names() {
        assert_eq!(Mode::from_name("development"), Mode::Development);
        assert_eq!(Mode::from_name("stats"), Mode::Stats);
        assert_eq!(Mode::from_name("production"), Mode::Production);
    }

    #[test]
    fn test_unrecognized_names_default_to_production() {
        for name in ["", "prod", "dev", "DEVELOPMENT", "Stats", "test", "staging"] {
            assert_eq!(Mode::from_name(name), Mode::Production, "name: {name:?}");
        }
    }

    #[test]
    fn test_switches_development() {
        let switches = FeatureSwitches::from_mode(Mode::Development);
        assert!(switches.is_dev);
        assert!(!switches.is_prod);
        assert!(!switches.is_stats);
    }

    #[test]
    fn test_switches_production() {
        let switches = FeatureSwitches::from_mode(Mode::Production);
        assert!(!switches.is_dev);
        assert!(switches.is_prod);
        assert!(!switches.is_stats);
    }

    #[test]
    fn test_switches_stats_keeps_production_on() {
        // Stats is not exclusive with production: is_prod is "not dev".
        let switches = FeatureSwitches::from_mode(Mode::Stats);
        assert!(!switches.is_dev);
        assert!(switches.is_prod);
        assert!(switches.is_stats);
    }

    #[test]
    fn test_unrecognized_switches_are_production_only() {
        let switches = FeatureSwitches::from_mode(Mode::from_name("staging"));
        assert!(switches.is_prod);
        assert!(!switches.is_dev);
        assert!(!switches.is_stats);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Mode::Development).unwrap(),
            "\"development\""
        );
        assert_eq!(serde_json::to_string(&Mode::Stats).unwrap(), "\"stats\"");
    }

    #[test]
    fn test_display_round_trips_through_from_name() {
        for mode in [Mode::Development, Mode::Production, Mode::Stats] {
            assert_eq!(Mode::from_name(mode.as_str()), mode);
        }
    }
}
