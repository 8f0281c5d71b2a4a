use serde::{Deserialize, Serialize};
use sonic_rs::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::record;

/// The user type assigned when registration names none.
pub const DEFAULT_USER_TYPE: &str = "Investor";
/// The name shown when a user has none, or no user is stored.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// A user as returned by the backend.
///
/// Kept as the raw JSON object so it can be stored and sent back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User {
    raw: Value,
}

impl User {
    /// Wraps a JSON value received from the backend.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }

    /// The user's id. Also used as the session token.
    pub fn id(&self) -> Option<String> {
        record::id(&self.raw)
    }

    pub fn name(&self) -> Option<&str> {
        record::text(&self.raw, "name")
    }

    pub fn email(&self) -> Option<&str> {
        record::text(&self.raw, "email")
    }

    pub fn mobile(&self) -> Option<&str> {
        record::text(&self.raw, "mobile")
    }

    pub fn user_type(&self) -> Option<&str> {
        record::text(&self.raw, "userType")
    }

    /// The name shown in page headers.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

/// Credentials sent to `POST /users/login`.
#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Registration data as callers may supply it.
///
/// Two naming conventions are accepted: `mobile` or `phone`, and `userType`
/// or `role`. [`RegistrationInput::normalize`] resolves them into the single
/// canonical [`RegisterRequest`].
#[derive(Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl RegistrationInput {
    /// Resolves the alternate field names.
    ///
    /// Precedence: a non-empty `mobile` wins over `phone`; a non-empty
    /// `userType` wins over `role`, and [`DEFAULT_USER_TYPE`] applies when
    /// both are empty.
    pub fn normalize(mut self) -> RegisterRequest {
        fn pick(primary: &mut Option<String>, secondary: &mut Option<String>) -> Option<String> {
            primary
                .take()
                .filter(|s| !s.is_empty())
                .or_else(|| secondary.take().filter(|s| !s.is_empty()))
        }

        let mobile = pick(&mut self.mobile, &mut self.phone).unwrap_or_default();
        let user_type = pick(&mut self.user_type, &mut self.role)
            .unwrap_or_else(|| DEFAULT_USER_TYPE.to_string());

        RegisterRequest {
            name: std::mem::take(&mut self.name),
            email: std::mem::take(&mut self.email),
            mobile,
            password: std::mem::take(&mut self.password),
            user_type,
        }
    }
}

/// The canonical registration payload sent to `POST /users/register`.
#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub user_type: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("mobile", &self.mobile)
            .field("password", &"***")
            .field("user_type", &self.user_type)
            .finish()
    }
}
