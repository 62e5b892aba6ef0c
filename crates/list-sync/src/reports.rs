//! Report generation.

use common::FilterSet;
use transport::{ApiRequest, Transport};
use views::ReportTable;

use crate::dispatch;
use crate::notify::{Notification, Notifier};
use crate::SyncConfig;

const REPORTS_PATH: &str = "/api/reports";
const FAILURE_MESSAGE: &str = "Error generating report. Please try again.";

/// Runs reports and turns their records into a table.
pub struct ReportGenerator<T: Transport, N: Notifier> {
    transport: T,
    notifier: N,
    config: SyncConfig,
}

impl<T: Transport, N: Notifier> ReportGenerator<T, N> {
    pub fn new(config: SyncConfig, transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            config,
        }
    }

    /// `GET /api/reports?type=&start=&end=`, omitting blank parameters.
    ///
    /// Returns `None` after notifying the user if the report failed.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self, report_type: &str, start: &str, end: &str) -> Option<ReportTable> {
        let query = FilterSet::new()
            .with("type", report_type)
            .with("start", start)
            .with("end", end);
        let request = ApiRequest::get(REPORTS_PATH).with_query(query);

        match dispatch::read_records(&self.transport, request).await {
            Ok(records) => {
                tracing::debug!(rows = records.len(), "report generated");
                Some(ReportTable::from_records(&records))
            }
            Err(error) => {
                let message =
                    error.user_message(FAILURE_MESSAGE.to_string(), FAILURE_MESSAGE.to_string());
                tracing::warn!(error = %error, "report failed");
                self.notifier
                    .notify(Notification::error(message, self.config.notification_ttl));
                None
            }
        }
    }
}
