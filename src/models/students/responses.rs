use serde::Serialize;
use std::collections::HashMap;
use ts_rs::TS;

use super::entities::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResponse {
    pub student: Student,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentStatistics {
    pub total: i64,
    pub active: i64,
    pub by_education_level: HashMap<String, i64>,
    pub by_gender: HashMap<String, i64>,
}

/// One rejected row of an import file (rows are 1-based, header excluded)
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ImportRowError {
    pub row: i64,
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentImportResponse {
    pub total: i64,
    pub success: i64,
    pub skipped: i64,
    pub failed: i64,
    pub errors: Vec<ImportRowError>,
}
