use chrono::{DateTime, Utc};

use crate::{
    controllers::{auth::require_session, catalog::Catalog},
    error::Result,
    models::blog::Blog,
    services::blogs as blog_service,
    state::AppState,
};

/// Opens the blogs page.
///
/// # Returns
///
/// A `Result` containing the catalog of every post, unfiltered.
pub async fn open(state: &AppState) -> Result<Catalog<Blog>> {
    require_session(state)?;

    let blogs = blog_service::list_blogs(&state.api).await?;
    tracing::info!("📰 Loaded {} blogs", blogs.len());

    Ok(Catalog::new(blogs, state.catalog_search_gate()))
}

pub async fn search(state: &AppState, page: &Catalog<Blog>, keyword: &str) -> Result<bool> {
    page.search(keyword, |keyword| async move {
        blog_service::search_blogs(&state.api, &keyword).await
    })
    .await
}

pub async fn detail(state: &AppState, blog_id: &str) -> Result<Blog> {
    require_session(state)?;
    blog_service::get_blog(&state.api, blog_id).await
}

/// Formats a post date relative to `now`.
///
/// Whole elapsed days decide the wording; a missing date reads "Recently".
pub fn relative_date(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return "Recently".to_string();
    };

    let days = (now - date).num_days().unsigned_abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => format!("{} months ago", days / 30),
    }
}
