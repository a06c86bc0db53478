//! Domain events emitted on user and role changes

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// State change notification for downstream consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserEvent {
    UserCreated {
        user_id: String,
        username: String,
        email: String,
        role_id: String,
        timestamp: DateTime<Utc>,
    },
    UserUpdated {
        user_id: String,
        username: String,
        email: String,
        timestamp: DateTime<Utc>,
    },
    UserDeleted {
        user_id: String,
        timestamp: DateTime<Utc>,
    },
    RoleAssigned {
        user_id: String,
        role_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl UserEvent {
    pub fn created(user: &User) -> Self {
        Self::UserCreated {
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: user.role_id.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn updated(user: &User) -> Self {
        Self::UserUpdated {
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn deleted(user_id: impl Into<String>) -> Self {
        Self::UserDeleted {
            user_id: user_id.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn role_assigned(user_id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self::RoleAssigned {
            user_id: user_id.into(),
            role_id: role_id.into(),
            timestamp: Utc::now(),
        }
    }

    /// Routing key used on the users exchange
    pub fn routing_key(&self) -> &'static str {
        match self {
            UserEvent::UserCreated { .. } => "user.created",
            UserEvent::UserUpdated { .. } => "user.updated",
            UserEvent::UserDeleted { .. } => "user.deleted",
            UserEvent::RoleAssigned { .. } => "role.assigned",
        }
    }
}

/// Outbound event sink
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: UserEvent) -> Result<(), DomainError>;
}

/// Publishes `event`, logging instead of failing: the state change it
/// describes has already been committed.
pub(crate) async fn publish_or_warn<E: EventPublisher + ?Sized>(publisher: &E, event: UserEvent) {
    let routing_key = event.routing_key();
    if let Err(e) = publisher.publish(event).await {
        warn!(routing_key, "Event publication failed: {}", e);
    }
}

/// Publisher that writes every event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: UserEvent) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&event).map_err(|e| DomainError::Internal {
            message: format!("Event serialization failed: {}", e),
        })?;
        info!(routing_key = event.routing_key(), %payload, "Published event");
        Ok(())
    }
}
