use crate::core::composer::ConfigComposer;
use crate::core::mode::Mode;
use crate::core::models::EntryPoint;
use crate::utils::{KumiError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration file format (kumi.config.json)
///
/// Every field is optional; only the static side of the configuration can
/// be overridden here. The conditional pieces (minimizer, loader chains,
/// plugin list) always derive from the resolved mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KumiConfig {
    /// Mode name applied when neither `--mode` nor the environment set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Source root the configuration is anchored at (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// Dev-server port (default: 4200)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Entry map, replacing the built-in entries wholesale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<HashMap<String, EntryPoint>>,

    /// Import aliases, merged over the built-in ones key by key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<HashMap<String, PathBuf>>,

    /// Resolvable extensions, replacing the built-in list wholesale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

impl Default for KumiConfig {
    fn default() -> Self {
        Self {
            mode: None,
            context: Some("src".to_string()),
            outdir: Some("dist".to_string()),
            port: Some(ConfigComposer::DEFAULT_PORT),
            entries: None,
            alias: None,
            extensions: None,
        }
    }
}

/// Config loader that supports config files with CLI override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file if it exists
    /// Searches for kumi.config.json in the project root
    pub fn load_from_file(root: &Path) -> Result<Option<KumiConfig>> {
        let config_path = root.join("kumi.config.json");

        if !config_path.exists() {
            Logger::config_file_missing();
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(KumiError::Io)?;

        let config: KumiConfig = serde_json::from_str(&content).map_err(|e| {
            KumiError::config(format!("Failed to parse kumi.config.json: {}", e))
        })?;

        Logger::config_file_loaded(&config_path);
        Ok(Some(config))
    }

    /// Resolve the active mode (CLI flag > environment > config file >
    /// production default). Unrecognized names resolve to production, so
    /// this never fails.
    pub fn resolve_mode(flag: Option<&str>, file_mode: Option<&str>) -> Mode {
        let env_mode = std::env::var(Mode::ENV_VAR).ok();
        Self::resolve_mode_from(flag, env_mode.as_deref(), file_mode)
    }

    fn resolve_mode_from(
        flag: Option<&str>,
        env: Option<&str>,
        file_mode: Option<&str>,
    ) -> Mode {
        flag.or(env)
            .or(file_mode)
            .map(Mode::from_name)
            .unwrap_or_default()
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(
        file_config: Option<KumiConfig>,
        mode: Mode,
        context: Option<&str>,
        outdir: Option<&str>,
        port: Option<u16>,
    ) -> ConfigComposer {
        let base = file_config.unwrap_or_default();

        let context = context.unwrap_or_else(|| base.context.as_deref().unwrap_or("src"));
        let outdir = outdir.unwrap_or_else(|| base.outdir.as_deref().unwrap_or("dist"));
        let port = port.unwrap_or_else(|| base.port.unwrap_or(ConfigComposer::DEFAULT_PORT));

        let mut composer = ConfigComposer::new(mode)
            .with_context(context)
            .with_output_dir(outdir)
            .with_port(port);

        if let Some(entries) = base.entries {
            composer = composer.with_entries(entries);
        }
        if let Some(alias) = base.alias {
            for (name, path) in alias {
                composer = composer.with_alias(name, path);
            }
        }
        if let Some(extensions) = base.extensions {
            composer = composer.with_extensions(extensions);
        }

        composer
    }

    /// Generate example config file
    pub fn generate_example() -> String {
        let example = KumiConfig {
            mode: None,
            context: Some("src".to_string()),
            outdir: Some("dist".to_string()),
            port: Some(ConfigComposer::DEFAULT_PORT),
            entries: Some(HashMap::from([(
                "main".to_string(),
                EntryPoint::Single("./index.js".to_string()),
            )])),
            alias: Some(HashMap::from([("@".to_string(), PathBuf::from("src"))])),
            extensions: Some(vec![".js".to_string(), ".json".to_string()]),
        };
        serde_json::to_string_pretty(&example).unwrap_or_else(|_| {
            r#"{
  "context": "src",
  "outdir": "dist",
  "port": 4200,
  "entries": { "main": "./index.js" },
  "alias": { "@": "src" },
  "extensions": [".js", ".json"]
}"#
            .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_from_file_not_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_from_file(temp_dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_file_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("kumi.config.json"),
            r#"{
                "outdir": "build",
                "port": 3000,
                "entries": {
                    "main": ["@babel/polyfill", "./index.js"],
                    "admin": "./admin.ts"
                }
            }"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(temp_dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(config.outdir, Some("build".to_string()));
        assert_eq!(config.port, Some(3000));

        let entries = config.entries.unwrap();
        assert_eq!(
            entries["main"].specifiers(),
            vec!["@babel/polyfill", "./index.js"]
        );
        assert_eq!(entries["admin"].specifiers(), vec!["./admin.ts"]);
    }

    #[test]
    fn test_load_from_file_malformed() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("kumi.config.json"), "{not json").unwrap();

        let err = ConfigLoader::load_from_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, KumiError::Config(_)));
        assert!(err.to_string().contains("kumi.config.json"));
    }

    #[test]
    fn test_resolve_mode_precedence() {
        // CLI flag beats everything
        assert_eq!(
            ConfigLoader::resolve_mode_from(Some("development"), Some("stats"), Some("stats")),
            Mode::Development
        );
        // Environment beats the file
        assert_eq!(
            ConfigLoader::resolve_mode_from(None, Some("stats"), Some("development")),
            Mode::Stats
        );
        // File is the last word before the default
        assert_eq!(
            ConfigLoader::resolve_mode_from(None, None, Some("development")),
            Mode::Development
        );
        assert_eq!(ConfigLoader::resolve_mode_from(None, None, None), Mode::Production);
        // Unrecognized names stay permissive
        assert_eq!(
            ConfigLoader::resolve_mode_from(Some("staging"), None, None),
            Mode::Production
        );
    }

    #[test]
    fn test_merge_with_cli_override() {
        let file_config = KumiConfig {
            outdir: Some("build".to_string()),
            port: Some(3000),
            ..Default::default()
        };

        let composer = ConfigLoader::merge_with_cli(
            Some(file_config),
            Mode::Development,
            None,
            Some("public"), // CLI override
            None,
        );
        let config = composer.compose();

        assert_eq!(config.output.path, PathBuf::from("public")); // CLI wins
        assert_eq!(config.dev_server.port, 3000); // file wins over default
        assert_eq!(config.context, PathBuf::from("src")); // default survives
    }

    #[test]
    fn test_merge_applies_file_entries_and_aliases() {
        let file_config = KumiConfig {
            entries: Some(HashMap::from([(
                "app".to_string(),
                EntryPoint::Single("./app.js".to_string()),
            )])),
            alias: Some(HashMap::from([(
                "@ui".to_string(),
                PathBuf::from("src/ui"),
            )])),
            ..Default::default()
        };

        let config =
            ConfigLoader::merge_with_cli(Some(file_config), Mode::Production, None, None, None)
                .compose();

        // Entries are replaced wholesale
        assert_eq!(config.entry.len(), 1);
        assert_eq!(config.entry["app"].specifiers(), vec!["./app.js"]);

        // Aliases merge over the built-ins
        assert_eq!(config.resolve.alias["@ui"], PathBuf::from("src/ui"));
        assert_eq!(config.resolve.alias["@models"], PathBuf::from("src/models"));
    }

    #[test]
    fn test_generate_example_round_trips() {
        let example = ConfigLoader::generate_example();
        assert!(example.contains("context"));
        assert!(example.contains("outdir"));
        assert!(example.contains("port"));

        let parsed: KumiConfig = serde_json::from_str(&example).unwrap();
        assert_eq!(parsed.port, Some(4200));
    }
}
