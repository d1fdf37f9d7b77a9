pub mod bulk;
pub mod record;
pub mod summaries;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceSummaryQuery, BulkAttendanceRequest, CourseDateQuery,
    RecalculateSummariesRequest, RecordAttendanceRequest, UpdateAttendanceRequest,
};

super::storage_service!(AttendanceService);

impl AttendanceService {
    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::list_attendance(self, query, request).await
    }

    pub async fn record_attendance(
        &self,
        body: RecordAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, body, request).await
    }

    pub async fn get_attendance(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        record::get_attendance(self, id, request).await
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::update_attendance(self, id, update, request).await
    }

    pub async fn delete_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::delete_attendance(self, id, request).await
    }

    pub async fn bulk_record(
        &self,
        body: BulkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_record(self, body, request).await
    }

    pub async fn by_course_date(
        &self,
        query: CourseDateQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::by_course_date(self, query, request).await
    }

    pub async fn list_summaries(
        &self,
        query: AttendanceSummaryQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summaries::list_summaries(self, query, request).await
    }

    pub async fn recalculate_summaries(
        &self,
        body: RecalculateSummariesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summaries::recalculate(self, body, request).await
    }
}
