//! Dashboard summary.

use serde::Serialize;

use carebase_auth::Permission;

use crate::context::AppContext;
use crate::error::ApiError;

/// Live-entity counts. Tombstoned rows are never counted; the read-path
/// invariant applies to aggregates too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_clinicians: usize,
    pub total_patients: usize,
    pub total_appointments: usize,
    pub total_records: usize,
}

pub fn summary(ctx: &AppContext, token: &str) -> Result<DashboardSummary, ApiError> {
    ctx.authorize(token, &Permission::DASHBOARD_VIEW)?;

    let store = ctx.store();
    Ok(DashboardSummary {
        total_clinicians: store.count_clinicians()?,
        total_patients: store.count_patients()?,
        total_appointments: store.count_appointments()?,
        total_records: store.count_records()?,
    })
}
