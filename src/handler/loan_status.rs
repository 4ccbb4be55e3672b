//! Periodic loan status refresh.

use chrono::Utc;
use tokio::time;

use crate::{
    configuration::{AppState, State},
    error::Error,
};

/// Runs [`refresh`] every `LOAN_STATUS_INTERVAL_IN_MINUTES`. A failed run is
/// logged and retried on the next tick.
pub async fn loan_status_task(app_state: AppState<State>) -> Result<(), Error> {
    let period = app_state.config.loan_status_interval;
    let mut interval = time::interval(period);

    tracing::info!(
        "Loan status refresh every {} minute(s)",
        period.as_secs() / 60
    );

    loop {
        interval.tick().await;

        if let Err(e) = refresh(&app_state).await {
            tracing::error!("Loan status refresh failed: {}", e);
        }
    }
}

/// Marks active loans with a past due date as overdue.
pub async fn refresh(app_state: &AppState<State>) -> Result<u64, Error> {
    let today = Utc::now().date_naive();
    let updated = app_state.database.loan.mark_overdue(today).await?;

    if updated > 0 {
        tracing::info!("Marked {} loan(s) overdue", updated);
    }

    Ok(updated)
}
