use serde::{Deserialize, Serialize};
use urm_core::domain::{NewUser, UserUpdate};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub surname: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// Role identifier such as `student` or `teach`
    #[validate(length(min = 1))]
    pub role_id: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            name: request.name,
            surname: request.surname,
            password: request.password,
            role_id: request.role_id,
        }
    }
}

/// Bootstrap request for the super administrator; the role is implied
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuperAdminRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub surname: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl From<SuperAdminRequest> for NewUser {
    fn from(request: SuperAdminRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            name: request.name,
            surname: request.surname,
            password: request.password,
            role_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub surname: String,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            name: request.name,
            surname: request.surname,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,

    #[validate(length(min = 1))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleAssignmentRequest {
    #[validate(length(min = 1))]
    pub role_id: String,
}
