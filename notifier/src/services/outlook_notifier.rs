use crate::mail_servers::MailServerDirectory;
use crate::services::alert_service::{AlertDispatcher, DispatchReport};
use crate::services::composer::compose;
use crate::services::expiry::expiration_message;
use crate::services::token_validator::CredentialValidator;
use crate::store::{self, ParameterStore};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// An alert already went out today
    AlreadyNotified,
    /// Nothing to report; the last-notified date is left untouched
    NothingToReport,
    Notified {
        alerts: Vec<String>,
        report: DispatchReport,
    },
}

/// Daily check-and-notify routine.
pub struct OutlookNotifier {
    store: Arc<dyn ParameterStore>,
    directory: Arc<dyn MailServerDirectory>,
    validator: CredentialValidator,
    dispatcher: AlertDispatcher,
    // One pass at a time, so overlapping triggers cannot both dispatch
    pass_lock: Mutex<()>,
}

impl OutlookNotifier {
    pub fn new(
        store: Arc<dyn ParameterStore>,
        directory: Arc<dyn MailServerDirectory>,
        validator: CredentialValidator,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            store,
            directory,
            validator,
            dispatcher,
            pass_lock: Mutex::new(()),
        }
    }

    /// Runs the check for the local calendar day.
    pub async fn run_daily_check(&self) -> Result<CheckOutcome> {
        self.run_check_on(Local::now().date_naive()).await
    }

    #[instrument(skip(self))]
    pub async fn run_check_on(&self, today: NaiveDate) -> Result<CheckOutcome> {
        let _guard = self.pass_lock.lock().await;

        let today_str = store::format_date(today);
        let last_notified = store::load_last_notified(self.store.as_ref()).await?;
        if last_notified.trim() == today_str {
            debug!("Outlook notification already sent today");
            return Ok(CheckOutcome::AlreadyNotified);
        }

        let alerts = self.collect_alerts(today).await?;
        if alerts.is_empty() {
            debug!("No Outlook secret or token problems found");
            return Ok(CheckOutcome::NothingToReport);
        }

        let body = compose(&alerts);
        let report = self.dispatcher.dispatch(&body).await;

        // Written even when every delivery failed
        store::store_last_notified(self.store.as_ref(), today).await?;

        info!("Outlook notification sent with {} alerts", alerts.len());
        Ok(CheckOutcome::Notified { alerts, report })
    }

    /// Expiration line first (if any), then one line per failing server.
    pub async fn collect_alerts(&self, today: NaiveDate) -> Result<Vec<String>> {
        let mut alerts = Vec::new();

        if let Some(expiration) = store::load_expiration(self.store.as_ref()).await? {
            if let Some(message) = expiration_message(expiration, today) {
                alerts.push(message);
            }
        }

        let failures = self.validator.check_all(self.directory.as_ref()).await?;
        alerts.extend(failures.iter().map(|failure| failure.to_message()));

        Ok(alerts)
    }
}
