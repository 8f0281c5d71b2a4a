use zeroize::Zeroizing;

use crate::{
    error::{ApiError, Result},
    models::{user::RegistrationInput, user::DEFAULT_USER_TYPE},
    navigation::Route,
    notification::Notification,
    services::users as user_service,
    state::AppState,
    validation::auth::*,
};

/// The login form.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: Zeroizing<String>,
}

/// The registration form.
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
    pub accept_terms: bool,
}

/// Where the auth page should send a visitor who already has a session.
pub fn entry_redirect(state: &AppState) -> Option<Route> {
    state.tokens.is_logged_in().then_some(Route::Dashboard)
}

/// Guards a page that needs a session.
///
/// A stored token is all it takes, the same check [`entry_redirect`] makes.
/// The stored user is optional; pages fall back to a generic name.
///
/// # Returns
///
/// The session token, or [`ApiError::Unauthorized`] when there is none;
/// see [`redirect_for`].
pub fn require_session(state: &AppState) -> Result<String> {
    match state.tokens.get_token().filter(|t| !t.is_empty()) {
        Some(token) => Ok(token),
        None => {
            tracing::debug!("🚪 No session, redirecting to {}", Route::Auth);
            Err(ApiError::Unauthorized)
        }
    }
}

/// The page an error should navigate to, if any.
pub fn redirect_for(err: &ApiError) -> Option<Route> {
    err.is_unauthorized().then_some(Route::Auth)
}

/// Handles the login form.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `form` - The submitted form.
///
/// # Returns
///
/// The route to navigate to after a successful login.
pub async fn login(state: &AppState, form: &LoginForm) -> Result<Route> {
    let email = form.email.trim();
    validate_required(&[email, form.password.as_str()])?;

    state.tokens.logout();

    let user = user_service::login(&state.api, email, &form.password).await?;
    tracing::info!("✅ Logged in user: {}", user.display_name());

    Ok(Route::Dashboard)
}

/// Validates the registration form.
///
/// Checks run in a fixed order and the first failure is reported.
pub fn validate_registration(form: &RegisterForm) -> Result<()> {
    let name = form.name.trim();
    let email = form.email.trim();
    let mobile = form.mobile.trim();

    validate_required(&[
        name,
        email,
        mobile,
        form.password.as_str(),
        form.confirm_password.as_str(),
    ])?;
    validate_terms(form.accept_terms)?;
    validate_email(email)?;
    validate_mobile(mobile)?;
    validate_password_confirmation(&form.password, &form.confirm_password)?;
    validate_password(&form.password)?;

    Ok(())
}

/// Handles the registration form.
///
/// Invalid forms never reach the network. Backend rejections that mention a
/// duplicate email or mobile number are reworded for the user.
///
/// # Returns
///
/// The notification to show on success. The user is not logged in.
pub async fn register(state: &AppState, form: &RegisterForm) -> Result<Notification> {
    validate_registration(form)?;
    tracing::info!("✅ Validations passed for: {}", form.email.trim());

    let mut input = RegistrationInput::default();
    input.name = form.name.trim().to_string();
    input.email = form.email.trim().to_string();
    input.mobile = Some(form.mobile.trim().to_string());
    input.password = form.password.as_str().to_string();
    input.user_type = Some(DEFAULT_USER_TYPE.to_string());

    match user_service::register(&state.api, input).await {
        Ok(_) => Ok(Notification::success(
            "✅ Registration successful! Please login.",
        )),
        Err(err) => Err(reword_registration_error(err)),
    }
}

fn reword_registration_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Server {
            status,
            message,
            payload,
        } => {
            let message = if message.contains("Email") {
                "⚠️ This email is already registered. Please use a different email or try logging in."
                    .to_string()
            } else if message.contains("Mobile") || message.contains("mobile") {
                "⚠️ This mobile number is already registered. Please use a different number or try logging in."
                    .to_string()
            } else {
                message
            };
            ApiError::Server {
                status,
                message,
                payload,
            }
        }
        other => other,
    }
}

/// Ends the session.
pub fn logout(state: &AppState) -> Route {
    state.tokens.logout()
}
