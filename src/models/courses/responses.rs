use serde::Serialize;
use ts_rs::TS;

use super::entities::{CourseDetail, CourseInstructor};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseResponse {
    pub course: CourseDetail,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseInstructorsResponse {
    pub items: Vec<CourseInstructor>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseStudentsResponse {
    pub items: Vec<crate::models::students::entities::Student>,
}
