//! Guest synchronization
//!
//! Discovers guest checkouts that are not tracked as contacts yet, stores
//! them in the contact table, then exports each website's pending guests to
//! a CSV file and registers that file with the import queue.
//!
//! Runs are not coordinated: callers must not run two syncs at once.

mod report;

pub use report::{GuestSyncReport, WebsiteExport, format_elapsed};

use crate::Result;
use crate::clock::{Clock, SystemClock};
use crate::error::SyncError;
use crate::models::{GuestRecord, ImportQueueEntry, Website, email_key};
use crate::traits::{ContactRepository, CsvOutput, ImportQueue, OrderRepository, WebsiteDirectory};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Email type written for every exported guest
const EMAIL_TYPE_HTML: &str = "Html";

/// Build the export file name for a website at a given local time
pub fn guest_filename(website_code: &str, now: NaiveDateTime) -> String {
    format!("{}_guest_{}.csv", website_code, now.format("%d%m%Y%H%M")).to_lowercase()
}

/// Orchestrates guest discovery and per-website export
pub struct GuestSync {
    contacts: Arc<dyn ContactRepository>,
    orders: Arc<dyn OrderRepository>,
    queue: Arc<dyn ImportQueue>,
    csv: Arc<dyn CsvOutput>,
    websites: Arc<dyn WebsiteDirectory>,
    clock: Arc<dyn Clock>,
}

impl GuestSync {
    /// Create a guest sync using the system clock
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        orders: Arc<dyn OrderRepository>,
        queue: Arc<dyn ImportQueue>,
        csv: Arc<dyn CsvOutput>,
        websites: Arc<dyn WebsiteDirectory>,
    ) -> Self {
        Self {
            contacts,
            orders,
            queue,
            csv,
            websites,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for file names
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run discovery, then export every eligible website
    ///
    /// A website is eligible when guest sync is enabled, a guest address book
    /// is mapped and the API integration is enabled. The start/end log lines
    /// are only written when at least one guest was exported.
    pub async fn sync(&self) -> Result<GuestSyncReport> {
        let contacts_created = self.find_and_create_guests().await?;

        let start = Instant::now();
        let mut report = GuestSyncReport {
            contacts_created,
            ..Default::default()
        };
        let mut started = false;

        for website in self.websites.websites() {
            if !website.accepts_guest_sync() {
                debug!(
                    "Skipping guest sync for website '{}' (disabled or unmapped)",
                    website.code
                );
                continue;
            }

            let export = self.export_guests_for_website(&website).await?;
            report.exports.push(export);

            if report.total_exported() > 0 && !started {
                info!("----------- Start guest sync ----------");
                started = true;
            }
        }

        report.elapsed = start.elapsed();
        if report.total_exported() > 0 {
            info!(
                "---- End Guest total time for guest sync : {}",
                format_elapsed(report.elapsed)
            );
        }

        Ok(report)
    }

    /// Stage every untracked guest order as a contact
    ///
    /// Returns the number of staged records. Emails are compared by
    /// [`email_key`], so a contact differing only in case is not staged
    /// again, and an email repeated within one pass is staged once per
    /// website.
    pub async fn find_and_create_guests(&self) -> Result<usize> {
        let existing = self.contacts.find_all_emails().await?;
        let orders = self.orders.find_guest_orders(&existing).await?;

        let mut seen = HashSet::new();
        let mut staged = Vec::new();

        for order in orders {
            if !order.customer_is_guest {
                continue;
            }
            let Some(email) = order.customer_email else {
                continue;
            };
            let key = email_key(&email);
            if existing.contains(&key) {
                continue;
            }

            let Some(website_id) = self.websites.website_id_for_store(order.store_id) else {
                warn!(
                    "Order {} belongs to unknown store {}, guest not staged",
                    order.id, order.store_id
                );
                continue;
            };

            if !seen.insert((key, website_id)) {
                continue;
            }
            staged.push(GuestRecord::new(email, website_id, order.store_id));
        }

        if !staged.is_empty() {
            let inserted = self.contacts.bulk_insert(&staged).await?;
            debug!("Staged {} guests, {inserted} rows inserted", staged.len());
        }

        Ok(staged.len())
    }

    /// Export one website's pending guests and queue the file
    ///
    /// No file is created when the website has no pending guests. A failed
    /// save aborts the export: rows already written stay in the file and the
    /// file is not queued.
    pub async fn export_guests_for_website(&self, website: &Website) -> Result<WebsiteExport> {
        let guests = self.contacts.find_unimported_guests(website.id).await?;
        if guests.is_empty() {
            return Ok(WebsiteExport::empty(website.id, &website.code));
        }

        let filename = guest_filename(&website.code, self.clock.now());
        info!("Guest file: {filename}");

        let path = self.csv.file_path(&filename);
        self.csv.append_row(
            &path,
            &[
                "Email".to_string(),
                "emailType".to_string(),
                website.mapped_store_name().to_string(),
            ],
        )?;

        let mut exported = 0;
        for mut guest in guests {
            guest.email_imported = true;
            self.contacts.save(&guest).await.map_err(|e| {
                SyncError::guest_persistence(&website.code, &guest.email, &e.to_string())
            })?;

            self.csv.append_row(
                &path,
                &[
                    guest.email,
                    EMAIL_TYPE_HTML.to_string(),
                    website.name.clone(),
                ],
            )?;
            exported += 1;
        }

        let mut export = WebsiteExport {
            website_id: website.id,
            website_code: website.code.clone(),
            filename: Some(filename.clone()),
            exported,
            queued: false,
        };

        if exported > 0 {
            let entry = ImportQueueEntry::guest_file(website.id, &filename);
            match self.queue.register_queue(&entry).await {
                Ok(()) => export.queued = true,
                Err(e) => debug!("Guest file {filename} was not queued: {e}"),
            }
        }

        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_guest_filename_format() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(9, 3, 41))
            .unwrap();

        assert_eq!(guest_filename("Base", now), "base_guest_050120240903.csv");
        assert_eq!(guest_filename("UK_Store", now), "uk_store_guest_050120240903.csv");
    }
}
