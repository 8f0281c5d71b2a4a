use rand::{Rng, seq::SliceRandom};

use crate::{
    controllers::auth::require_session,
    error::{ApiError, Result},
    models::{blog::Blog, course::Course, dictionary::DictionaryTerm, user::DEFAULT_DISPLAY_NAME},
    notification::Notification,
    services::{blogs as blog_service, courses as course_service, dictionary as dictionary_service},
    state::AppState,
};

/// How many courses and blogs the dashboard previews.
pub const PREVIEW_LEN: usize = 3;

/// One dashboard panel: its content, or the message shown in its place.
pub type Section<T> = std::result::Result<T, Notification>;

/// The dashboard view model.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user_name: String,
    pub courses: Section<Vec<Course>>,
    pub blogs: Section<Vec<Blog>>,
    /// `Ok(None)` when the dictionary is empty.
    pub term_of_the_day: Section<Option<DictionaryTerm>>,
}

/// Picks the term of the day.
pub fn pick_term<R: Rng + ?Sized>(terms: &[DictionaryTerm], rng: &mut R) -> Option<DictionaryTerm> {
    terms.choose(rng).cloned()
}

fn section<T, U>(result: Result<T>, fallback: &str, view: impl FnOnce(T) -> U) -> Section<U> {
    result.map(view).map_err(|err| {
        tracing::error!("❌ {} {}", fallback, err);
        Notification::error(fallback)
    })
}

/// Loads the dashboard.
///
/// The three panels load concurrently and fail independently. A rejected
/// session fails the whole page instead, since the user must log in again.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the `Dashboard`.
pub async fn load(state: &AppState) -> Result<Dashboard> {
    require_session(state)?;
    let user_name = state
        .tokens
        .get_user()
        .map_or_else(|| DEFAULT_DISPLAY_NAME.to_string(), |user| user.display_name().to_string());

    let (courses, blogs, terms) = tokio::join!(
        course_service::list_courses(&state.api),
        blog_service::list_blogs(&state.api),
        dictionary_service::list_terms(&state.api),
    );

    let unauthorized = [
        courses.as_ref().err(),
        blogs.as_ref().err(),
        terms.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .any(ApiError::is_unauthorized);
    if unauthorized {
        return Err(ApiError::Unauthorized);
    }

    let dashboard = Dashboard {
        user_name,
        courses: section(
            courses,
            "Failed to load courses. Please try again later.",
            |courses| courses.into_iter().take(PREVIEW_LEN).collect(),
        ),
        blogs: section(blogs, "Failed to load blogs.", |blogs| {
            blogs.into_iter().take(PREVIEW_LEN).collect()
        }),
        term_of_the_day: section(terms, "Unable to load today's term.", |terms| {
            pick_term(&terms, &mut rand::thread_rng())
        }),
    };

    tracing::info!("✅ Dashboard loaded for {}", dashboard.user_name);
    Ok(dashboard)
}
