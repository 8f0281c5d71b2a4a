use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use stockscope_client::{
    ApiError, AppState, Config,
    config::SessionBackend,
    controllers::{auth, courses, dashboard, subscription},
    models::{
        course::Course,
        session::Session,
        subscription::{Billing, PlanType},
        user::User,
    },
    navigation::Route,
    notification::Notification,
    repositories::session::{MemoryStorage, SessionStorage},
    services::courses as course_service,
};

static COURSES: Lazy<Value> = Lazy::new(|| {
    json!([
        {
            "id": "c1",
            "title": "Stock Basics",
            "category": "Novice",
            "duration": 40,
            "level": "Beginner",
            "rating": 4.5,
            "modules": [{"title": "Intro", "lessons": 3}],
            "isActive": true
        },
        {"id": "c2", "title": "Chart Patterns", "category": "Trader"},
        {"id": "c3", "title": "Index Funds", "category": "Investor"},
        {"id": "c4", "title": "Options 101", "category": "Trader"}
    ])
});

static TERMS: Lazy<Value> = Lazy::new(|| {
    json!([
        {"id": "t1", "termName": "Bond", "definition": "A debt security."},
        {"id": "t2", "termName": "Equity", "definition": "Ownership in a company."}
    ])
});

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: String,
}

impl Recorded {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Backend {
    requests: Mutex<Vec<Recorded>>,
}

impl Backend {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().pop().expect("no request reached the backend")
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn handle(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    backend.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    if authorization.as_deref() == Some("Bearer stale") {
        return message(StatusCode::UNAUTHORIZED, "Invalid token");
    }

    match (method.as_str(), uri.path(), uri.query()) {
        ("POST", "/api/users/login", _) => {
            let creds: Value = serde_json::from_str(&body).unwrap();
            if creds["email"] == "a@b.com" && creds["password"] == "secret1" {
                Json(json!({"id": "u1", "name": "A", "email": "a@b.com"})).into_response()
            } else {
                message(StatusCode::BAD_REQUEST, "Invalid email or password")
            }
        }
        ("POST", "/api/users/register", _) => {
            let mut user: Value = serde_json::from_str(&body).unwrap();
            if user["email"] == "taken@b.com" {
                return message(StatusCode::BAD_REQUEST, "Email already exists");
            }
            user["id"] = json!("u2");
            (StatusCode::CREATED, Json(user)).into_response()
        }
        ("GET", "/api/courses", _) => Json(COURSES.clone()).into_response(),
        ("GET", "/api/courses/search", Some("keyword=growth")) => {
            message(StatusCode::NOT_FOUND, "No courses found")
        }
        ("GET", "/api/courses/search", Some("keyword=AA")) => {
            tokio::time::sleep(Duration::from_millis(150)).await;
            Json(json!([{"id": "aa", "title": "AA", "category": "Novice"}])).into_response()
        }
        ("GET", "/api/courses/search", Some("keyword=AAA")) => {
            Json(json!([{"id": "aaa", "title": "AAA", "category": "Novice"}])).into_response()
        }
        ("PUT", "/api/courses/c1", _) => {
            Json(serde_json::from_str::<Value>(&body).unwrap()).into_response()
        }
        ("GET", "/api/courses/empty", _) => StatusCode::OK.into_response(),
        ("DELETE", "/api/courses/c1", _) => "Course deleted successfully".into_response(),
        ("GET", "/api/blogs", _) => message(StatusCode::INTERNAL_SERVER_ERROR, "Database down"),
        ("GET", "/api/dictionary", _) => Json(TERMS.clone()).into_response(),
        ("POST", "/api/subscriptions", _) => {
            let mut subscription: Value = serde_json::from_str(&body).unwrap();
            subscription["id"] = json!("s1");
            Json(subscription).into_response()
        }
        _ => message(StatusCode::NOT_FOUND, "Not found"),
    }
}

// Shared test context
struct TestContext {
    state: AppState,
    storage: MemoryStorage,
    backend: Arc<Backend>,
}

impl TestContext {
    async fn new() -> Self {
        let backend = Arc::new(Backend::default());
        let app = Router::new().fallback(handle).with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let storage = MemoryStorage::new();
        let config = Self::config(format!("http://{addr}/api"));
        let state = AppState::with_storage(&config, Arc::new(storage.clone())).unwrap();

        Self {
            state,
            storage,
            backend,
        }
    }

    fn config(api_base_url: String) -> Config {
        Config {
            api_base_url,
            session_backend: SessionBackend::Memory,
            search_debounce: Duration::ZERO,
            dictionary_debounce: Duration::ZERO,
            ..Config::default()
        }
    }

    async fn logged_in() -> Self {
        let context = Self::new().await;
        auth::login(&context.state, &login_form("a@b.com", "secret1"))
            .await
            .unwrap();
        context
    }

    fn start_session(&self, token: &str) {
        let user: User = sonic_rs::from_str(r#"{"id":"u1","name":"A"}"#).unwrap();
        self.state
            .tokens
            .start(&Session {
                token: token.to_string(),
                user,
            })
            .unwrap();
    }
}

fn login_form(email: &str, password: &str) -> auth::LoginForm {
    auth::LoginForm {
        email: email.to_string(),
        password: Zeroizing::new(password.to_string()),
    }
}

fn register_form(email: &str, password: &str, confirm: &str) -> auth::RegisterForm {
    auth::RegisterForm {
        name: "Asha".into(),
        email: email.into(),
        mobile: "9876543210".into(),
        password: Zeroizing::new(password.into()),
        confirm_password: Zeroizing::new(confirm.into()),
        accept_terms: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_session_and_authenticates_requests() {
        let context = TestContext::new().await;

        let route = auth::login(&context.state, &login_form(" a@b.com ", "secret1"))
            .await
            .unwrap();
        assert_eq!(route, Route::Dashboard);

        let login = context.backend.last();
        assert_eq!(login.path, "/api/users/login");
        assert_eq!(login.authorization, None);
        assert_eq!(login.json(), json!({"email": "a@b.com", "password": "secret1"}));

        let tokens = &context.state.tokens;
        assert_eq!(tokens.get_token().as_deref(), Some("u1"));
        assert_eq!(tokens.get_user().unwrap().name(), Some("A"));
        assert_eq!(auth::entry_redirect(&context.state), Some(Route::Dashboard));

        let page = courses::open(&context.state).await.unwrap();
        assert_eq!(page.displayed().await.len(), 4);
        assert_eq!(
            context.backend.last().authorization.as_deref(),
            Some("Bearer u1")
        );
    }

    #[tokio::test]
    async fn test_failed_login_keeps_user_logged_out() {
        let context = TestContext::new().await;

        let err = auth::login(&context.state, &login_form("a@b.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(!context.state.tokens.is_logged_in());

        let err = auth::login(&context.state, &login_form("a@b.com", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");
        assert_eq!(context.backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let context = TestContext::new().await;
        context.start_session("stale");

        let err = course_service::list_courses(&context.state.api)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(auth::redirect_for(&err), Some(Route::Auth));
        assert!(!context.state.tokens.is_logged_in());
        assert!(context.state.tokens.get_user().is_none());

        course_service::list_courses(&context.state.api)
            .await
            .unwrap();
        let requests = context.backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].authorization, None);
    }

    #[tokio::test]
    async fn test_server_error_carries_backend_message() {
        let context = TestContext::logged_in().await;

        let err = course_service::search_courses(&context.state.api, "growth")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No courses found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(context.state.tokens.is_logged_in());
    }

    #[tokio::test]
    async fn test_invalid_registration_never_reaches_backend() {
        let context = TestContext::new().await;

        let err = auth::register(
            &context.state,
            &register_form("asha@example.com", "secret1", "secret2"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(context.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_registration_sends_normalized_user() {
        let context = TestContext::new().await;

        let notification = auth::register(
            &context.state,
            &register_form("asha@example.com", "secret1", "secret1"),
        )
        .await
        .unwrap();
        assert!(!notification.is_error());
        assert!(!context.state.tokens.is_logged_in());

        let request = context.backend.last();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.json(),
            json!({
                "name": "Asha",
                "email": "asha@example.com",
                "mobile": "9876543210",
                "password": "secret1",
                "userType": "Investor"
            })
        );

        let err = auth::register(
            &context.state,
            &register_form("taken@b.com", "secret1", "secret1"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("email is already registered"));
    }

    #[tokio::test]
    async fn test_update_preserves_unknown_fields() {
        let context = TestContext::logged_in().await;

        let all = course_service::list_courses(&context.state.api)
            .await
            .unwrap();
        let course = &all[0];
        assert_eq!(course.title(), "Stock Basics");

        let updated = course_service::update_course(&context.state.api, "c1", course)
            .await
            .unwrap();
        assert_eq!(&updated, course);
        assert_eq!(context.backend.last().json(), COURSES[0]);
    }

    #[tokio::test]
    async fn test_delete_accepts_plain_text_body() {
        let context = TestContext::logged_in().await;

        course_service::delete_course(&context.state.api, "c1")
            .await
            .unwrap();
        assert_eq!(context.backend.last().method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_latest_search_wins_over_slower_response() {
        let context = TestContext::logged_in().await;
        let page = courses::open(&context.state).await.unwrap();

        let slow = courses::search(&context.state, &page, "AA");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            courses::search(&context.state, &page, "AAA").await
        };

        let (slow, fast) = tokio::join!(slow, fast);
        assert!(!slow.unwrap());
        assert!(fast.unwrap());

        let shown: Vec<String> = page
            .displayed()
            .await
            .iter()
            .filter_map(|c| c.id())
            .collect();
        assert_eq!(shown, vec!["aaa"]);
    }

    #[tokio::test]
    async fn test_dashboard_sections_fail_independently() {
        let context = TestContext::logged_in().await;

        let page = dashboard::load(&context.state).await.unwrap();
        assert_eq!(page.user_name, "A");
        assert_eq!(page.courses.as_ref().unwrap().len(), dashboard::PREVIEW_LEN);
        assert_eq!(
            page.blogs.as_ref().unwrap_err().message,
            "Failed to load blogs."
        );

        let term = page.term_of_the_day.unwrap().unwrap();
        assert!(["Bond", "Equity"].contains(&term.term_name()));
    }

    #[tokio::test]
    async fn test_pages_require_a_session() {
        let context = TestContext::new().await;

        let err = dashboard::load(&context.state).await.unwrap_err();
        assert_eq!(auth::redirect_for(&err), Some(Route::Auth));
        assert!(courses::open(&context.state).await.is_err());
        assert!(context.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_submits_active_plan() {
        let context = TestContext::logged_in().await;

        let subscribed = subscription::subscribe(&context.state, PlanType::Premium, Billing::Yearly)
            .await
            .unwrap();
        assert_eq!(
            subscribed.notification.message,
            "Successfully subscribed to PREMIUM plan!"
        );
        assert_eq!(subscribed.summary.total_label(), "₹4790/year");
        assert_eq!(subscribed.subscription.id().as_deref(), Some("s1"));

        let body = context.backend.last().json();
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["planType"], "PREMIUM");
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(body["autoRenew"], true);
        assert!(body["startDate"].is_string());
        assert!(body["endDate"].is_string());
    }

    #[tokio::test]
    async fn test_token_without_stored_user_opens_pages() {
        let context = TestContext::new().await;
        context.state.tokens.set_token("u1").unwrap();

        let page = dashboard::load(&context.state).await.unwrap();
        assert_eq!(page.user_name, "User");
        assert_eq!(context.backend.last().authorization.as_deref(), Some("Bearer u1"));
        assert_eq!(auth::entry_redirect(&context.state), Some(Route::Dashboard));

        let subscribed = subscription::subscribe(&context.state, PlanType::Pro, Billing::Monthly)
            .await
            .unwrap();
        assert_eq!(subscribed.summary.total_label(), "₹999/month");
        assert_eq!(context.backend.last().json()["userId"], "u1");
    }

    #[tokio::test]
    async fn test_unreadable_stored_user_does_not_lock_out() {
        let context = TestContext::new().await;
        context.storage.set_item("authToken", "u1").unwrap();
        context.storage.set_item("user", "{broken").unwrap();
        assert!(context.state.tokens.get_user().is_none());

        let page = dashboard::load(&context.state).await.unwrap();
        assert_eq!(page.user_name, "User");
        assert!(courses::open(&context.state).await.is_ok());
        assert!(context.state.tokens.is_logged_in());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = TestContext::config(format!("http://{addr}/api"));
        let state = AppState::with_storage(&config, Arc::new(MemoryStorage::new())).unwrap();
        let user: User = sonic_rs::from_str(r#"{"id":"u1","name":"A"}"#).unwrap();
        state
            .tokens
            .start(&Session {
                token: "u1".to_string(),
                user,
            })
            .unwrap();

        let err = course_service::list_courses(&state.api).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(
            Notification::from(&err).message,
            "Network error. Please check if the backend is running"
        );
        assert_eq!(state.tokens.get_token().as_deref(), Some("u1"));
        assert!(state.tokens.get_user().is_some());
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_as_null() {
        let context = TestContext::logged_in().await;

        let course: Option<Course> = context.state.api.get("/courses/empty").await.unwrap();
        assert!(course.is_none());
    }
}
