use serde::Serialize;
use ts_rs::TS;

use super::entities::InstructorDetail;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct InstructorResponse {
    pub instructor: InstructorDetail,
}
