//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed identifier of the bootstrap super administrator
pub const SUPER_ADMIN_ID: &str = "000000";

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Six-digit identifier
    pub id: String,

    /// Unique login name
    pub username: String,

    /// Contact e-mail
    pub email: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Opaque password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role identifier
    pub role_id: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User instance
    pub fn new(id: impl Into<String>, data: NewUser, password_hash: String) -> Self {
        Self {
            id: id.into(),
            username: data.username,
            email: data.email,
            name: data.name,
            surname: data.surname,
            password_hash,
            role_id: data.role_id,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// Random candidate identifier in `100000..=999999`
    pub fn generate_id() -> String {
        rand::thread_rng().gen_range(100_000..1_000_000).to_string()
    }

    /// Records a successful login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    /// Applies editable profile fields
    pub fn apply_update(&mut self, update: UserUpdate) {
        self.username = update.username;
        self.email = update.email;
        self.name = update.name;
        self.surname = update.surname;
    }

    /// Public profile view
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            surname: self.surname.clone(),
            role_id: self.role_id.clone(),
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}

/// Data required to create a user. The password is plaintext here and is
/// hashed before it reaches a `User`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password: String,
    pub role_id: String,
}

impl NewUser {
    /// Names of required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("username", &self.username),
            ("email", &self.email),
            ("name", &self.name),
            ("surname", &self.surname),
            ("password", &self.password),
            ("role", &self.role_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub name: String,
    pub surname: String,
}

/// Read-only profile view returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role_id: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}
