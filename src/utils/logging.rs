use crate::core::mode::Mode;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter("kumi=debug")
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn mode_resolved(mode: Mode, source: &str) {
        info!("🎛️  Mode: {} (from {})", mode, source);
    }

    pub fn config_file_loaded(path: &Path) {
        debug!("📄 Loaded overrides from {}", path.display());
    }

    pub fn config_file_missing() {
        debug!("📄 No kumi.config.json found, using built-in defaults");
    }

    pub fn compose_summary(entries: usize, plugins: usize, rules: usize) {
        info!(
            "🧩 Composed configuration: {} entries, {} plugins, {} module rules",
            entries, plugins, rules
        );
    }

    pub fn wrote_file(path: &Path, size: usize) {
        info!("📦 Wrote {} ({} bytes)", path.display(), size);
    }

    pub fn check_start(root: &Path) {
        info!("🔍 Checking project at {}", root.display());
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
