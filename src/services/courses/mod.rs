pub mod assignments;
pub mod create;
pub mod get;
pub mod list;
pub mod students;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::courses::requests::{
    AssignInstructorRequest, CourseListQuery, CreateCourseRequest, EnrollStudentRequest,
    UpdateAssignmentRequest, UpdateCourseRequest,
};

super::storage_service!(CourseService);

impl CourseService {
    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn create_course(
        &self,
        course: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course, request).await
    }

    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_course(self, id, request).await
    }

    pub async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, id, update, request).await
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        update::delete_course(self, id, request).await
    }

    pub async fn list_course_students(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::list_course_students(self, id, request).await
    }

    pub async fn enroll_student(
        &self,
        id: i64,
        body: EnrollStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::enroll_student(self, id, body, request).await
    }

    pub async fn list_course_instructors(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::list_course_instructors(self, id, request).await
    }

    pub async fn assign_instructor(
        &self,
        id: i64,
        body: AssignInstructorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::assign_instructor(self, id, body, request).await
    }

    pub async fn update_assignment(
        &self,
        id: i64,
        instructor_id: i64,
        body: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::update_assignment(self, id, instructor_id, body, request).await
    }

    pub async fn remove_assignment(
        &self,
        id: i64,
        instructor_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::remove_assignment(self, id, instructor_id, request).await
    }
}
