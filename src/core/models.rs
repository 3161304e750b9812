use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::mode::Mode;

/// One named entry point: a single module specifier, or an ordered list
/// (polyfills first, then the application module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPoint {
    Single(String),
    Composite(Vec<String>),
}

impl EntryPoint {
    pub fn specifiers(&self) -> Vec<&str> {
        match self {
            EntryPoint::Single(spec) => vec![spec.as_str()],
            EntryPoint::Composite(specs) => specs.iter().map(String::as_str).collect(),
        }
    }
}

/// Loader descriptor: a bare name, or a name plus an options block.
/// Serializes as the mixed string/object form the engine expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loader {
    Plain(String),
    Configured {
        loader: String,
        options: LoaderOptions,
    },
}

impl Loader {
    pub fn plain(name: impl Into<String>) -> Self {
        Loader::Plain(name.into())
    }

    pub fn with_options(name: impl Into<String>, options: LoaderOptions) -> Self {
        Loader::Configured {
            loader: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Loader::Plain(name) => name,
            Loader::Configured { loader, .. } => loader,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderOptions {
    CssExtract(CssExtractLoaderOptions),
    Babel(BabelLoaderOptions),
}

/// Options for the stylesheet extraction loader; hot reload follows the
/// development switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssExtractLoaderOptions {
    pub hmr: bool,
    pub reload_all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabelLoaderOptions {
    pub presets: Vec<String>,
    pub plugins: Vec<String>,
}

/// A post-build size-reduction stage. Order is significant: the
/// stylesheet optimizer runs before the script minifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinimizerStage {
    #[serde(rename = "optimize-css-assets-webpack-plugin")]
    CssOptimizer,
    #[serde(rename = "terser-webpack-plugin")]
    Terser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    #[default]
    All,
    Async,
    Initial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitChunksConfig {
    pub chunks: ChunkScope,
}

/// Shared-chunk splitting plus the optional minimizer pipeline.
///
/// `minimizer` is present-or-absent, never present-and-empty: the engine
/// applies its own default minimizers when the field is missing, so an
/// empty list would mean something different.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationConfig {
    pub split_chunks: SplitChunksConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimizer: Option<Vec<MinimizerStage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveConfig {
    pub extensions: Vec<String>,
    pub alias: HashMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevServerConfig {
    pub port: u16,
    pub hot: bool,
}

/// A file-matching rule: files whose name matches `test` run through the
/// loader chain, innermost-last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRule {
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename = "use")]
    pub loaders: Vec<Loader>,
}

impl ModuleRule {
    pub fn new(test: impl Into<String>, loaders: Vec<Loader>) -> Self {
        Self {
            test: test.into(),
            exclude: None,
            loaders,
        }
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Whether a file name matches this rule's `test` pattern (and is not
    /// excluded). Fails only if a pattern is not valid regex.
    pub fn matches(&self, file_name: &str) -> Result<bool> {
        let test = regex::Regex::new(&self.test)?;
        if !test.is_match(file_name) {
            return Ok(false);
        }
        if let Some(exclude) = &self.exclude {
            let exclude = regex::Regex::new(exclude)?;
            if exclude.is_match(file_name) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub rules: Vec<ModuleRule>,
}

/// Plugin descriptor handed to the engine. Serialized as
/// `{"name": ..., "options": {...}}`; order in the plugin list is the
/// lifecycle hook order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options")]
pub enum PluginConfig {
    #[serde(rename = "html-webpack-plugin")]
    Html(HtmlPluginOptions),
    #[serde(rename = "clean-webpack-plugin")]
    Clean,
    #[serde(rename = "copy-webpack-plugin")]
    Copy(CopyPluginOptions),
    #[serde(rename = "mini-css-extract-plugin")]
    CssExtract(CssExtractPluginOptions),
    #[serde(rename = "webpack-bundle-analyzer")]
    BundleAnalyzer,
}

impl PluginConfig {
    pub fn name(&self) -> &'static str {
        match self {
            PluginConfig::Html(_) => "html-webpack-plugin",
            PluginConfig::Clean => "clean-webpack-plugin",
            PluginConfig::Copy(_) => "copy-webpack-plugin",
            PluginConfig::CssExtract(_) => "mini-css-extract-plugin",
            PluginConfig::BundleAnalyzer => "webpack-bundle-analyzer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlPluginOptions {
    pub template: String,
    pub minify: HtmlMinifyOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMinifyOptions {
    pub collapse_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyPluginOptions {
    pub patterns: Vec<CopyPattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssExtractPluginOptions {
    pub filename: String,
}

/// The fully-resolved configuration object. This is the entire external
/// contract: the engine consumes the camelCase JSON rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub context: PathBuf,
    pub mode: Mode,
    pub entry: HashMap<String, EntryPoint>,
    pub output: OutputConfig,
    pub resolve: ResolveConfig,
    pub optimization: OptimizationConfig,
    pub dev_server: DevServerConfig,
    pub devtool: String,
    pub plugins: Vec<PluginConfig>,
    pub module: ModuleConfig,
}

impl Configuration {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
