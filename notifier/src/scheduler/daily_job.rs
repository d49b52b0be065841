use super::validate_6_field_cron;
use crate::services::{CheckOutcome, OutlookNotifier};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, instrument};

pub struct NotifierScheduler {
    notifier: Arc<OutlookNotifier>,
    schedule: String,
    scheduler: JobScheduler,
}

impl NotifierScheduler {
    pub async fn new(notifier: Arc<OutlookNotifier>, schedule: String) -> Result<Self> {
        validate_6_field_cron(&schedule)?;

        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            notifier,
            schedule,
            scheduler,
        })
    }

    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        let notifier = self.notifier.clone();

        let job = Job::new_async(self.schedule.as_str(), move |_uuid, _scheduler| {
            let notifier = notifier.clone();
            Box::pin(async move {
                info!("Executing scheduled Outlook secret check");
                run_pass(&notifier).await;
            })
        })
        .map_err(|e| anyhow!("Failed to create check job for '{}': {}", self.schedule, e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to add check job to scheduler: {}", e))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;

        info!("Outlook secret check scheduled: {}", self.schedule);
        Ok(())
    }

    pub async fn shutdown(mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to stop scheduler: {}", e))
    }
}

/// One scheduled pass. Infrastructure errors are logged; the scheduler keeps
/// running and the next trigger retries.
pub async fn run_pass(notifier: &OutlookNotifier) {
    match notifier.run_daily_check().await {
        Ok(CheckOutcome::Notified { alerts, report }) => {
            info!(
                "Check complete: {} alerts dispatched (channel {:?}, {} emails sent, {} failed)",
                alerts.len(),
                report.channel,
                report.emails_sent,
                report.emails_failed
            );
        }
        Ok(outcome) => info!("Check complete: {:?}", outcome),
        Err(e) => error!("Outlook secret check failed: {:#}", e),
    }
}
