use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use contact_sync_core::guest::format_elapsed;
use contact_sync_core::{BatchReport, GuestSyncReport, QueueStats};
use serde::Serialize;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn website_list(&self, ids: &[i64]) -> String {
        if ids.is_empty() {
            "none".to_string()
        } else {
            ids.iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_guest_report(&self, report: &GuestSyncReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.colorize("Guest sync", |s| s.bold())));
        output.push_str(&format!("  Guests staged: {}\n", report.contacts_created));

        for export in &report.exports {
            let code = self.colorize(&export.website_code, |s| s.cyan());
            match &export.filename {
                None => output.push_str(&format!("  {code}: nothing to export\n")),
                Some(filename) => {
                    let status = if export.queued {
                        self.colorize("queued", |s| s.green())
                    } else {
                        self.colorize("not queued", |s| s.red())
                    };
                    output.push_str(&format!(
                        "  {code}: {} exported to {filename} ({status})\n",
                        export.exported
                    ));
                }
            }
        }

        output.push_str(&format!(
            "  Total exported: {} in {}\n",
            report.total_exported(),
            format_elapsed(report.elapsed)
        ));

        Ok(output)
    }

    fn format_batch_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.colorize("Order batch", |s| s.bold())));
        output.push_str(&format!(
            "  Queued websites: {}\n",
            self.website_list(&report.queued_websites)
        ));

        let failed = self.website_list(&report.failed_websites);
        if report.failed_websites.is_empty() {
            output.push_str(&format!("  Failed websites: {failed}\n"));
        } else {
            output.push_str(&format!(
                "  Failed websites: {}\n",
                self.colorize(&failed, |s| s.red())
            ));
        }

        output.push_str(&format!(
            "  Orders marked imported: {}\n",
            report.orders_marked
        ));
        output.push_str(&format!(
            "  Product lines refreshed: {}\n",
            report.products_refreshed
        ));

        Ok(output)
    }

    fn format_queue_stats(&self, stats: &QueueStats) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.colorize("Import queue", |s| s.bold())));
        output.push_str(&format!("  Not imported: {}\n", stats.not_imported));
        output.push_str(&format!("  Importing: {}\n", stats.importing));
        output.push_str(&format!("  Imported: {}\n", stats.imported));

        let failed = stats.failed.to_string();
        if stats.failed > 0 {
            output.push_str(&format!(
                "  Failed: {}\n",
                self.colorize(&failed, |s| s.red())
            ));
        } else {
            output.push_str(&format!("  Failed: {failed}\n"));
        }

        if !stats.pending_by_type.is_empty() {
            output.push_str("  Pending by type:\n");
            for (import_type, count) in &stats.pending_by_type {
                output.push_str(&format!(
                    "    {}: {count}\n",
                    self.colorize(import_type, |s| s.yellow())
                ));
            }
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_guest_report(&self, report: &GuestSyncReport) -> Result<String> {
        self.render(report)
    }

    fn format_batch_report(&self, report: &BatchReport) -> Result<String> {
        self.render(report)
    }

    fn format_queue_stats(&self, stats: &QueueStats) -> Result<String> {
        self.render(stats)
    }
}
