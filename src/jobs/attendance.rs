use std::sync::Arc;
use tracing::info;

use crate::errors::Result;
use crate::finance::Period;
use crate::models::attendance::entities::AttendanceSummary;
use crate::storage::Storage;

/// Rebuilds every attendance summary of `period` from the raw records.
pub async fn update_attendance_summaries(
    storage: &Arc<dyn Storage>,
    period: Period,
) -> Result<Vec<AttendanceSummary>> {
    let summaries = storage
        .recalculate_attendance_summaries(period, None, None)
        .await?;
    info!(
        "Updated {} attendance summaries for {}",
        summaries.len(),
        period.label()
    );
    Ok(summaries)
}
