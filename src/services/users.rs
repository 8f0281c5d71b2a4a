use crate::{
    client::ApiClient,
    error::{ApiError, Result},
    models::{
        session::Session,
        user::{LoginRequest, RegisterRequest, RegistrationInput, User},
    },
};

/// Registers a new user.
///
/// # Arguments
///
/// * `api` - The API client.
/// * `input` - Registration data in either naming convention.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn register(api: &ApiClient, input: RegistrationInput) -> Result<User> {
    let request: RegisterRequest = input.normalize();
    tracing::debug!("📝 Registering user: {:?}", request);
    api.post("/users/register", &request).await
}

/// Logs in and stores the session.
///
/// The backend answers with the user record; its `id` doubles as the bearer
/// token.
///
/// # Arguments
///
/// * `api` - The API client.
/// * `email` - The user's email.
/// * `password` - The user's password.
///
/// # Returns
///
/// A `Result` containing the logged-in `User`.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<User> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let user: User = api.post("/users/login", &request).await?;

    let token = user.id().ok_or_else(|| {
        ApiError::Authentication("login response did not include a user id".to_string())
    })?;

    api.tokens().start(&Session {
        token,
        user: user.clone(),
    })?;

    tracing::info!("🔑 Logged in as {}", email);
    Ok(user)
}

pub async fn get_user(api: &ApiClient, user_id: &str) -> Result<User> {
    api.get(&format!("/users/{}", urlencoding::encode(user_id))).await
}

pub async fn update_user(api: &ApiClient, user_id: &str, user: &User) -> Result<User> {
    api.put(&format!("/users/{}", urlencoding::encode(user_id)), user)
        .await
}

pub async fn delete_user(api: &ApiClient, user_id: &str) -> Result<()> {
    api.delete(&format!("/users/{}", urlencoding::encode(user_id)))
        .await
}
