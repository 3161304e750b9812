use colored::*;
use std::time::Instant;

use crate::core::validation::ValidationReport;

pub struct KumiUI {
    start_time: Instant,
}

impl KumiUI {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn show_banner(&self) {
        // Simple, clean output like Vite
        println!(
            "\n  {} {}",
            "KUMI".bright_cyan().bold(),
            format!("v{}", env!("CARGO_PKG_VERSION")).bright_white()
        );
        println!();
    }

    pub fn show_check_report(&self, report: &ValidationReport) {
        println!();
        for warning in &report.warnings {
            println!("  {} {}", "⚠".bright_yellow(), warning);
        }
        for error in &report.errors {
            println!("  {} {}", "✗".bright_red(), error);
        }

        println!();
        if report.is_ok() {
            let elapsed = self.start_time.elapsed();
            println!(
                "  {} checked in {}",
                "✓".bright_green(),
                format!("{:.0}ms", elapsed.as_secs_f64() * 1000.0)
                    .bright_white()
                    .bold()
            );
        } else {
            println!(
                "  {} {} error(s), {} warning(s)",
                "✗".bright_red(),
                report.errors.len().to_string().bright_red().bold(),
                report.warnings.len().to_string().bright_yellow().bold()
            );
        }
    }
}

impl Default for KumiUI {
    fn default() -> Self {
        Self::new()
    }
}
