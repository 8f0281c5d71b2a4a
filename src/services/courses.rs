use urlencoding::encode;

use crate::{
    client::ApiClient,
    error::Result,
    models::course::{Course, CourseDraft},
};

/// Lists every course.
pub async fn list_courses(api: &ApiClient) -> Result<Vec<Course>> {
    api.get("/courses").await
}

pub async fn get_course(api: &ApiClient, course_id: &str) -> Result<Course> {
    api.get(&format!("/courses/{}", encode(course_id))).await
}

pub async fn courses_by_category(api: &ApiClient, category: &str) -> Result<Vec<Course>> {
    api.get(&format!("/courses/category/{}", encode(category)))
        .await
}

pub async fn courses_by_difficulty(api: &ApiClient, difficulty: &str) -> Result<Vec<Course>> {
    api.get(&format!("/courses/difficulty/{}", encode(difficulty)))
        .await
}

pub async fn active_courses(api: &ApiClient) -> Result<Vec<Course>> {
    api.get("/courses/active").await
}

/// Full-text search on the backend.
pub async fn search_courses(api: &ApiClient, keyword: &str) -> Result<Vec<Course>> {
    api.get(&format!("/courses/search?keyword={}", encode(keyword)))
        .await
}

pub async fn create_course(api: &ApiClient, draft: &CourseDraft) -> Result<Course> {
    api.post("/courses", draft).await
}

/// Replaces a course. The record is sent exactly as given.
pub async fn update_course(api: &ApiClient, course_id: &str, course: &Course) -> Result<Course> {
    api.put(&format!("/courses/{}", encode(course_id)), course)
        .await
}

pub async fn delete_course(api: &ApiClient, course_id: &str) -> Result<()> {
    api.delete(&format!("/courses/{}", encode(course_id))).await
}
