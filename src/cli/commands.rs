use crate::core::composer::ConfigComposer;
use crate::core::mode::Mode;
use crate::core::validation::{ConfigValidator, FsValidator};
use crate::utils::{ConfigLoader, KumiError, KumiUI, Logger, Result, Timer};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kumi")]
#[command(about = "Kumi - Build configuration composer for webpack-style pipelines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose the configuration and print it as JSON
    Show {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Mode override (development | production | stats)
        #[arg(short, long)]
        mode: Option<String>,
        /// Write the configuration to a file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Emit compact single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Validate the composed configuration against the project tree
    Check {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Mode override (development | production | stats)
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Write an example kumi.config.json
    Init {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show composer information
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Show {
                root,
                mode,
                out,
                compact,
            } => {
                self.handle_show_command(&root, mode.as_deref(), out.as_deref(), compact)
                    .await
            }
            Commands::Check { root, mode } => {
                self.handle_check_command(&root, mode.as_deref()).await
            }
            Commands::Init { root, force } => self.handle_init_command(&root, force).await,
            Commands::Info => self.handle_info_command().await,
        }
    }

    /// Shared front half of show/check: load the project overrides,
    /// resolve the mode, assemble the composer.
    fn compose_for(&self, root: &Path, mode_flag: Option<&str>) -> Result<ConfigComposer> {
        let file_config = ConfigLoader::load_from_file(root)?;
        let file_mode = file_config.as_ref().and_then(|c| c.mode.clone());

        let mode = ConfigLoader::resolve_mode(mode_flag, file_mode.as_deref());
        Logger::mode_resolved(mode, mode_source(mode_flag, file_mode.as_deref()));

        Ok(ConfigLoader::merge_with_cli(file_config, mode, None, None, None))
    }

    async fn handle_show_command(
        &self,
        root: &str,
        mode_flag: Option<&str>,
        out: Option<&str>,
        compact: bool,
    ) -> Result<()> {
        let _timer = Timer::start("show");

        let composer = self.compose_for(Path::new(root), mode_flag)?;
        let config = composer.compose();
        Logger::compose_summary(
            config.entry.len(),
            config.plugins.len(),
            config.module.rules.len(),
        );

        let json = if compact {
            config.to_json()?
        } else {
            config.to_json_pretty()?
        };

        match out {
            Some(out) => {
                let path = PathBuf::from(out);
                tokio::fs::write(&path, &json).await.map_err(KumiError::Io)?;
                Logger::wrote_file(&path, json.len());
            }
            // Logs go to stderr, so stdout stays pipeable
            None => println!("{}", json),
        }

        Ok(())
    }

    async fn handle_check_command(&self, root: &str, mode_flag: Option<&str>) -> Result<()> {
        let ui = KumiUI::new();
        ui.show_banner();

        let root = Path::new(root);
        Logger::check_start(root);

        let config = self.compose_for(root, mode_flag)?.compose();
        let report = FsValidator::new(root).validate(&config);
        ui.show_check_report(&report);

        if report.is_ok() {
            Ok(())
        } else {
            Err(KumiError::Validation {
                errors: report.errors.len(),
            })
        }
    }

    async fn handle_init_command(&self, root: &str, force: bool) -> Result<()> {
        let config_path = Path::new(root).join("kumi.config.json");

        if config_path.exists() && !force {
            return Err(KumiError::FileExists(config_path));
        }

        let example = ConfigLoader::generate_example();
        tokio::fs::write(&config_path, &example)
            .await
            .map_err(KumiError::Io)?;
        Logger::wrote_file(&config_path, example.len());

        Ok(())
    }

    async fn handle_info_command(&self) -> Result<()> {
        tracing::info!("🧩 Kumi v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!("══════════════════════════════════════");
        tracing::info!("⚙️  Build configuration composer for webpack-style pipelines");
        tracing::info!("");
        tracing::info!("🎯 Modes (NODE_ENV or --mode):");
        tracing::info!("  • development - hot reload, lint stage, plain filenames");
        tracing::info!("  • production  - hashed filenames, minimizer pipeline (the default)");
        tracing::info!("  • stats       - production pipeline plus the bundle analyzer");
        tracing::info!("");
        tracing::info!("📦 Composed pieces:");
        tracing::info!("  • Optimization with shared-chunk splitting");
        tracing::info!("  • Style, script and TypeScript loader chains");
        tracing::info!("  • Ordered plugin list");
        tracing::info!("  • Module rules for stylesheets, assets, fonts and scripts");
        tracing::info!("");
        tracing::info!("🔧 Commands:");
        tracing::info!("  • show  - print the composed configuration as JSON");
        tracing::info!("  • check - validate it against the project tree");
        tracing::info!("  • init  - scaffold a kumi.config.json");

        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn mode_source(flag: Option<&str>, file_mode: Option<&str>) -> &'static str {
    if flag.is_some() {
        "--mode"
    } else if std::env::var(Mode::ENV_VAR).is_ok() {
        Mode::ENV_VAR
    } else if file_mode.is_some() {
        "kumi.config.json"
    } else {
        "default"
    }
}
