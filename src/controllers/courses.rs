use crate::{
    controllers::{auth::require_session, catalog::Catalog},
    error::Result,
    models::course::Course,
    services::courses as course_service,
    state::AppState,
};

/// Opens the courses page.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the catalog of every course, unfiltered.
pub async fn open(state: &AppState) -> Result<Catalog<Course>> {
    require_session(state)?;

    let courses = course_service::list_courses(&state.api).await?;
    tracing::info!("📚 Loaded {} courses", courses.len());

    Ok(Catalog::new(courses, state.catalog_search_gate()))
}

/// Searches courses as the user types.
///
/// # Returns
///
/// `false` when a newer search superseded this one.
pub async fn search(state: &AppState, page: &Catalog<Course>, keyword: &str) -> Result<bool> {
    page.search(keyword, |keyword| async move {
        course_service::search_courses(&state.api, &keyword).await
    })
    .await
}

/// Fetches one course for the detail view.
pub async fn detail(state: &AppState, course_id: &str) -> Result<Course> {
    require_session(state)?;
    course_service::get_course(&state.api, course_id).await
}
