use std::collections::HashMap;
use std::path::PathBuf;

use super::mode::{FeatureSwitches, Mode};
use super::models::*;

/// Module path of the extraction loader shipped with the css-extract plugin
pub const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";

/// Composes the fully-resolved build configuration for a given mode.
///
/// The mode is passed in explicitly; the composer itself never touches the
/// environment. All conditional fields (optimization, filename patterns,
/// loader chains, plugin list) are pure derivations of the mode, while the
/// static fields carry built-in defaults that the override layer may
/// replace.
#[derive(Debug, Clone)]
pub struct ConfigComposer {
    mode: Mode,
    switches: FeatureSwitches,
    context: PathBuf,
    output_dir: PathBuf,
    entries: HashMap<String, EntryPoint>,
    port: u16,
    aliases: HashMap<String, PathBuf>,
    extensions: Vec<String>,
}

impl ConfigComposer {
    pub const DEFAULT_PORT: u16 = 4200;

    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            switches: FeatureSwitches::from_mode(mode),
            context: PathBuf::from("src"),
            output_dir: PathBuf::from("dist"),
            entries: default_entries(),
            port: Self::DEFAULT_PORT,
            aliases: default_aliases(),
            extensions: default_extensions(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn switches(&self) -> FeatureSwitches {
        self.switches
    }

    pub fn with_context(mut self, context: impl Into<PathBuf>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replace the entry map wholesale
    pub fn with_entries(mut self, entries: HashMap<String, EntryPoint>) -> Self {
        self.entries = entries;
        self
    }

    /// Add or replace a single named entry point
    pub fn with_entry(mut self, name: impl Into<String>, entry: EntryPoint) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.aliases.insert(alias.into(), path.into());
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Shared-chunk splitting is always on; the minimizer pipeline exists
    /// only in production builds (stats included, since its production
    /// switch stays on). When absent the engine falls back to its own
    /// default minimizers.
    pub fn optimization(&self) -> OptimizationConfig {
        let minimizer = if self.switches.is_prod {
            Some(vec![MinimizerStage::CssOptimizer, MinimizerStage::Terser])
        } else {
            None
        };

        OptimizationConfig {
            split_chunks: SplitChunksConfig {
                chunks: ChunkScope::All,
            },
            minimizer,
        }
    }

    /// Output filename pattern for a given extension: plain names in
    /// development, content-hash-qualified otherwise.
    pub fn asset_filename(&self, ext: &str) -> String {
        if self.switches.is_dev {
            format!("[name].{}", ext)
        } else {
            format!("[name].[hash].{}", ext)
        }
    }

    /// Stylesheet loader chain: extraction stage (hot reload tied to the
    /// development switch), then base css resolution. A preprocessor name
    /// appends a third stage, applied innermost-last.
    pub fn style_loaders(&self, extra: Option<&str>) -> Vec<Loader> {
        let mut loaders = vec![
            Loader::with_options(
                CSS_EXTRACT_LOADER,
                LoaderOptions::CssExtract(CssExtractLoaderOptions {
                    hmr: self.switches.is_dev,
                    reload_all: true,
                }),
            ),
            Loader::plain("css-loader"),
        ];

        if let Some(extra) = extra {
            loaders.push(Loader::plain(extra));
        }

        loaders
    }

    /// Script loader chain: transpilation, plus a lint stage in development.
    pub fn script_loaders(&self) -> Vec<Loader> {
        let mut loaders = vec![Loader::with_options(
            "babel-loader",
            LoaderOptions::Babel(BabelLoaderOptions {
                presets: vec!["@babel/preset-env".to_string()],
                plugins: vec!["@babel/plugin-proposal-class-properties".to_string()],
            }),
        )];

        if self.switches.is_dev {
            loaders.push(Loader::plain("eslint-loader"));
        }

        loaders
    }

    /// TypeScript variant of the script chain: same transpiler with the
    /// TypeScript preset added. No lint stage.
    pub fn typescript_loaders(&self) -> Vec<Loader> {
        vec![Loader::with_options(
            "babel-loader",
            LoaderOptions::Babel(BabelLoaderOptions {
                presets: vec![
                    "@babel/preset-env".to_string(),
                    "@babel/preset-typescript".to_string(),
                ],
                plugins: vec!["@babel/plugin-proposal-class-properties".to_string()],
            }),
        )]
    }

    /// The base plugin list in lifecycle order: html generation, output
    /// cleanup, static-asset copy, stylesheet extraction. Stats builds
    /// append the bundle analyzer last.
    pub fn plugins(&self) -> Vec<PluginConfig> {
        let mut plugins = vec![
            PluginConfig::Html(HtmlPluginOptions {
                template: "./index.html".to_string(),
                minify: HtmlMinifyOptions {
                    collapse_whitespace: self.switches.is_prod,
                },
            }),
            PluginConfig::Clean,
            PluginConfig::Copy(CopyPluginOptions {
                patterns: vec![CopyPattern {
                    from: self.context.join("favicon.ico"),
                    to: self.output_dir.clone(),
                }],
            }),
            PluginConfig::CssExtract(CssExtractPluginOptions {
                filename: self.asset_filename("css"),
            }),
        ];

        if self.switches.is_stats {
            plugins.push(PluginConfig::BundleAnalyzer);
        }

        plugins
    }

    /// File-type rules in match order. Loader order within each chain is
    /// the transformation pipeline order.
    pub fn module_rules(&self) -> Vec<ModuleRule> {
        vec![
            ModuleRule::new(r"\.css$", self.style_loaders(None)),
            ModuleRule::new(r"\.less$", self.style_loaders(Some("less-loader"))),
            ModuleRule::new(r"\.s[ac]ss$", self.style_loaders(Some("sass-loader"))),
            ModuleRule::new(r"\.(png|jpg|svg)$", vec![Loader::plain("file-loader")]),
            ModuleRule::new(r"\.(ttf|woff|woff2|eot)$", vec![Loader::plain("file-loader")]),
            ModuleRule::new(r"\.js$", self.script_loaders()).with_exclude("node_modules"),
            ModuleRule::new(r"\.ts$", self.typescript_loaders()).with_exclude("node_modules"),
        ]
    }

    /// Assemble the complete configuration object.
    pub fn compose(&self) -> Configuration {
        Configuration {
            context: self.context.clone(),
            mode: self.mode,
            entry: self.entries.clone(),
            output: OutputConfig {
                filename: self.asset_filename("js"),
                path: self.output_dir.clone(),
            },
            resolve: ResolveConfig {
                extensions: self.extensions.clone(),
                alias: self.aliases.clone(),
            },
            optimization: self.optimization(),
            dev_server: DevServerConfig {
                port: self.port,
                hot: self.switches.is_dev,
            },
            devtool: if self.switches.is_dev {
                "source-map".to_string()
            } else {
                String::new()
            },
            plugins: self.plugins(),
            module: ModuleConfig {
                rules: self.module_rules(),
            },
        }
    }
}

fn default_entries() -> HashMap<String, EntryPoint> {
    HashMap::from([
        (
            "main".to_string(),
            EntryPoint::Composite(vec![
                "@babel/polyfill".to_string(),
                "./index.js".to_string(),
            ]),
        ),
        (
            "analytics".to_string(),
            EntryPoint::Single("./analytics.ts".to_string()),
        ),
    ])
}

fn default_aliases() -> HashMap<String, PathBuf> {
    HashMap::from([
        ("@models".to_string(), PathBuf::from("src/models")),
        ("@".to_string(), PathBuf::from("src/src")),
    ])
}

fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string(), ".svg".to_string()]
}
