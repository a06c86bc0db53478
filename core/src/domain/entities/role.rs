//! Role hierarchy and the role catalog entity.

use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// Totally ordered privilege ranking over role identifiers.
///
/// The derived `Ord` follows declaration order, which is the privilege
/// order: `Student < Teacher < Admin < SuperAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoleLevel {
    Student,
    Teacher,
    Admin,
    SuperAdmin,
}

impl RoleLevel {
    /// Every level, lowest privilege first
    pub const ALL: [RoleLevel; 4] = [
        RoleLevel::Student,
        RoleLevel::Teacher,
        RoleLevel::Admin,
        RoleLevel::SuperAdmin,
    ];

    /// Resolves a role identifier (case-insensitive).
    ///
    /// An unmapped identifier is an error; there is no default level.
    pub fn from_role_id(role_id: &str) -> Result<Self, AuthError> {
        Self::ALL
            .into_iter()
            .find(|level| level.role_id().eq_ignore_ascii_case(role_id.trim()))
            .ok_or_else(|| AuthError::UnknownRole {
                role: role_id.to_string(),
            })
    }

    /// Identifier stored in tokens and in the role catalog
    pub fn role_id(&self) -> &'static str {
        match self {
            RoleLevel::Student => "student",
            RoleLevel::Teacher => "teach",
            RoleLevel::Admin => "admin",
            RoleLevel::SuperAdmin => "sadmin",
        }
    }

    /// Numeric privilege level
    pub fn level(&self) -> u8 {
        match self {
            RoleLevel::Student => 0,
            RoleLevel::Teacher => 1,
            RoleLevel::Admin => 2,
            RoleLevel::SuperAdmin => 3,
        }
    }

    /// Whether this level grants at least the privilege of `required`
    pub fn satisfies(&self, required: RoleLevel) -> bool {
        self.level() >= required.level()
    }

    /// Catalog entry seeded for this level
    pub fn catalog_entry(&self) -> Role {
        let (name, description) = match self {
            RoleLevel::SuperAdmin => ("SUPER_ADMIN", "System administrator with every privilege"),
            RoleLevel::Admin => ("ADMIN", "Administrator allowed to manage users"),
            RoleLevel::Teacher => ("DOCENTE", "Teaching staff with additional permissions"),
            RoleLevel::Student => ("STUDENTE", "Base role reserved for students"),
        };
        Role::new(self.role_id(), name, description)
    }
}

impl std::fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.role_id())
    }
}

impl std::str::FromStr for RoleLevel {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_role_id(s)
    }
}

impl TryFrom<String> for RoleLevel {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_role_id(&value)
    }
}

impl From<RoleLevel> for String {
    fn from(level: RoleLevel) -> Self {
        level.role_id().to_string()
    }
}

/// Role catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier (`student`, `teach`, `admin`, `sadmin`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
}

impl Role {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Position of this role in the hierarchy
    pub fn level(&self) -> Result<RoleLevel, AuthError> {
        RoleLevel::from_role_id(&self.id)
    }
}
