use serde::Serialize;
use ts_rs::TS;

use super::entities::EnrollmentDetail;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentResponse {
    pub enrollment: EnrollmentDetail,
}
