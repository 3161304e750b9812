//! Pluggable validation strategies for composed configurations.
//!
//! Schema checks work on the configuration alone; filesystem checks also
//! walk the project tree the configuration points at, so they are only
//! meaningful from the CLI.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{Configuration, PluginConfig};

// Pre-compiled validation patterns
static EXTENSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.[A-Za-z0-9]+$").unwrap());

/// Findings collected by a validation pass. Errors fail `check`; warnings
/// are advisory and never affect the exit status.
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Trait for pluggable validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &Configuration) -> ValidationReport;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use kumi::core::{ConfigComposer, Mode};
/// use kumi::core::validation::{ConfigValidator, SchemaValidator};
///
/// let config = ConfigComposer::new(Mode::Development).compose();
/// assert!(SchemaValidator.validate(&config).is_ok());
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &Configuration) -> ValidationReport {
        let mut report = ValidationReport::default();

        if config.entry.is_empty() {
            report.error("entry map is empty; at least one entry point is required");
        }

        for (name, entry) in &config.entry {
            let specifiers = entry.specifiers();
            if specifiers.is_empty() {
                report.error(format!("entry '{}' has no module specifiers", name));
            }
            for specifier in specifiers {
                if specifier.trim().is_empty() {
                    report.error(format!("entry '{}' contains an empty specifier", name));
                }
            }
        }

        for extension in &config.resolve.extensions {
            if !EXTENSION_REGEX.is_match(extension) {
                report.error(format!(
                    "resolve extension '{}' must look like '.js'",
                    extension
                ));
            }
        }

        if config.dev_server.port == 0 {
            report.error("devServer.port must be nonzero");
        }

        if !config.output.filename.contains("[name]") {
            report.error(format!(
                "output filename '{}' has no [name] token, so entries would overwrite each other",
                config.output.filename
            ));
        }

        for plugin in &config.plugins {
            if let PluginConfig::CssExtract(options) = plugin {
                if !options.filename.contains("[name]") {
                    report.error(format!(
                        "extracted stylesheet filename '{}' has no [name] token",
                        options.filename
                    ));
                }
            }
        }

        for rule in &config.module.rules {
            if let Err(e) = Regex::new(&rule.test) {
                report.error(format!(
                    "module rule pattern '{}' does not compile: {}",
                    rule.test, e
                ));
            }
        }

        report
    }
}

/// Filesystem validation (for CLI use)
///
/// Runs the schema checks first, then verifies that the context directory,
/// local entry files, and the HTML template exist under the project root.
/// Missing copy-plugin sources are reported as warnings.
///
/// # Example
///
/// ```no_run
/// use kumi::core::{ConfigComposer, Mode};
/// use kumi::core::validation::{ConfigValidator, FsValidator};
///
/// let config = ConfigComposer::new(Mode::Production).compose();
/// let report = FsValidator::new(".").validate(&config);
/// for finding in &report.errors {
///     eprintln!("{}", finding);
/// }
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &Configuration) -> ValidationReport {
        let mut report = SchemaValidator.validate(config);

        let context = self.root.join(&config.context);
        if !context.is_dir() {
            report.error(format!(
                "context directory {} does not exist",
                context.display()
            ));
            // Everything below resolves against the context
            return report;
        }

        for (name, entry) in &config.entry {
            for specifier in entry.specifiers() {
                // Bare names are package imports, resolved by the engine
                if !specifier.starts_with("./") && !specifier.starts_with("../") {
                    continue;
                }
                let path = context.join(specifier);
                if !path.is_file() {
                    report.error(format!(
                        "entry '{}' points at missing file {}",
                        name,
                        path.display()
                    ));
                } else if !matches_any_rule(config, specifier) {
                    report.warn(format!(
                        "entry file '{}' matches no module rule and would not be transformed",
                        specifier
                    ));
                }
            }
        }

        for plugin in &config.plugins {
            match plugin {
                PluginConfig::Html(options) => {
                    let template = context.join(&options.template);
                    if !template.is_file() {
                        report.error(format!(
                            "html template {} does not exist",
                            template.display()
                        ));
                    }
                }
                PluginConfig::Copy(options) => {
                    for pattern in &options.patterns {
                        let from = self.root.join(&pattern.from);
                        if !from.exists() {
                            report.warn(format!("copy source {} does not exist", from.display()));
                        }
                    }
                }
                _ => {}
            }
        }

        report
    }
}

fn matches_any_rule(config: &Configuration, specifier: &str) -> bool {
    config
        .module
        .rules
        .iter()
        .any(|rule| rule.matches(specifier).unwrap_or(false))
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &Configuration) -> ValidationReport {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &Configuration, root: impl AsRef<Path>) -> ValidationReport {
    FsValidator::new(root).validate(config)
}
