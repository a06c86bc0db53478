//! Fixtures shared by the unit tests of this crate

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;
use crate::services::events::{EventPublisher, UserEvent};
use crate::services::password::BcryptPasswordHasher;
use crate::services::token::{KeyProvider, RevocationStore, TokenLifecycleService, TokenServiceConfig};

pub(crate) const PRIMARY_PRIVATE_KEY: &str = include_str!("../../testdata/keys/primary_private.b64");
pub(crate) const PRIMARY_PUBLIC_KEY: &str = include_str!("../../testdata/keys/primary_public.b64");
pub(crate) const SECONDARY_PRIVATE_KEY: &str = include_str!("../../testdata/keys/secondary_private.b64");
pub(crate) const SECONDARY_PUBLIC_KEY: &str = include_str!("../../testdata/keys/secondary_public.b64");

pub(crate) fn primary_keys() -> Arc<KeyProvider> {
    Arc::new(KeyProvider::new(PRIMARY_PRIVATE_KEY, PRIMARY_PUBLIC_KEY))
}

pub(crate) fn secondary_keys() -> Arc<KeyProvider> {
    Arc::new(KeyProvider::new(SECONDARY_PRIVATE_KEY, SECONDARY_PUBLIC_KEY))
}

pub(crate) fn token_service_with(config: TokenServiceConfig) -> TokenLifecycleService {
    TokenLifecycleService::new(primary_keys(), Arc::new(RevocationStore::new()), config)
        .expect("valid token service config")
}

pub(crate) fn token_service() -> TokenLifecycleService {
    token_service_with(TokenServiceConfig::default())
}

pub(crate) fn sample_user(id: &str, username: &str, role_id: &str) -> User {
    User::new(id, new_user(username, "password", role_id), "hash".to_string())
}

pub(crate) fn new_user(username: &str, password: &str, role_id: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.org", username),
        name: "Test".to_string(),
        surname: "User".to_string(),
        password: password.to_string(),
        role_id: role_id.to_string(),
    }
}

/// bcrypt at its minimum cost
pub(crate) fn fast_hasher() -> Arc<BcryptPasswordHasher> {
    Arc::new(BcryptPasswordHasher::new(4))
}

/// Keeps every published event for later inspection
#[derive(Default)]
pub(crate) struct RecordingEventPublisher {
    events: Mutex<Vec<UserEvent>>,
}

impl RecordingEventPublisher {
    pub(crate) fn routing_keys(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(UserEvent::routing_key)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: UserEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Publisher whose sink is always down
pub(crate) struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: UserEvent) -> Result<(), DomainError> {
        Err(DomainError::Internal {
            message: "broker unavailable".to_string(),
        })
    }
}
