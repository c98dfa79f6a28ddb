//! Session/profile store — application-layer orchestration
//!
//! Single source of truth for "who is acting now" and the directory of all
//! known users. The directory and the active-session marker live behind the
//! key-value port; compiled-in defaults are merged back in on every load so
//! a default profile can be edited but never lost.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::defaults::{default_admin, default_profiles, placeholder_avatar, DEFAULT_ADMIN_EMAIL};
use crate::domain::{DomainError, DomainResult, ProfilePatch, UserProfile, UserRole};
use crate::infrastructure::storage::KeyValueStore;

pub const DIRECTORY_KEY: &str = "session.user-directory";
pub const ACTIVE_EMAIL_KEY: &str = "session.active-email";

type Directory = BTreeMap<String, UserProfile>;

/// Data for a new user account
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub avatar: Option<String>,
}

struct SessionState {
    directory: Directory,
    current: UserProfile,
}

/// Session/profile service.
///
/// Constructed through [`SessionService::initialize`], which completes the
/// whole load-and-merge protocol before the instance (and therefore any
/// operation) becomes reachable.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

impl SessionService {
    /// Load persisted state, merge it with the compiled-in defaults and
    /// return a ready-to-use service. Storage failures and corrupt data
    /// degrade to the defaults with no active session; they never surface
    /// to the caller.
    pub async fn initialize(store: Arc<dyn KeyValueStore>) -> Self {
        let (persisted, directory_readable) = match store.get(DIRECTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Directory>(&raw) {
                Ok(map) => (map, true),
                Err(e) => {
                    warn!(error = %e, "persisted user directory is corrupt, using defaults");
                    (Directory::new(), false)
                }
            },
            Ok(None) => (Directory::new(), true),
            Err(e) => {
                warn!(error = %e, "failed reading user directory, using defaults");
                (Directory::new(), false)
            }
        };

        let mut directory: Directory = default_profiles()
            .into_iter()
            .map(|p| (p.email.clone(), p))
            .collect();
        // Persisted entries overlay the defaults: custom users are added and
        // edited defaults keep their edits, but a default key never vanishes.
        for (email, profile) in persisted {
            directory.insert(email, profile);
        }

        let active_email = if directory_readable {
            match store.get(ACTIVE_EMAIL_KEY).await {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "failed reading active session marker");
                    None
                }
            }
        } else {
            None
        };

        let current = active_email
            .as_deref()
            .and_then(|email| directory.get(email).cloned())
            .unwrap_or_else(|| Self::admin_of(&directory));

        info!(
            users = directory.len(),
            current = %current.email,
            "session store initialized"
        );

        Self {
            store,
            state: RwLock::new(SessionState { directory, current }),
        }
    }

    fn admin_of(directory: &Directory) -> UserProfile {
        directory
            .get(DEFAULT_ADMIN_EMAIL)
            .cloned()
            .unwrap_or_else(default_admin)
    }

    fn serialize_directory(directory: &Directory) -> String {
        serde_json::to_string(directory).expect("profile directory always serializes")
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn current_profile(&self) -> UserProfile {
        self.state.read().await.current.clone()
    }

    /// Directory listing, ordered by email.
    pub async fn list_users(&self) -> Vec<UserProfile> {
        self.state.read().await.directory.values().cloned().collect()
    }

    // ── Commands ────────────────────────────────────────────────

    /// Resolve `email` to a profile and make it current. Unknown emails
    /// resolve to the default administrator; this operation never fails.
    /// The marker write is best-effort.
    pub async fn login(&self, email: &str) -> UserProfile {
        let resolved = {
            let mut state = self.state.write().await;
            let resolved = state
                .directory
                .get(email)
                .cloned()
                .unwrap_or_else(|| Self::admin_of(&state.directory));
            state.current = resolved.clone();
            resolved
        };

        if let Err(e) = self.store.set(ACTIVE_EMAIL_KEY, &resolved.email).await {
            warn!(error = %e, email = %resolved.email, "failed persisting active session marker");
        }

        info!(email = %resolved.email, role = resolved.role.as_str(), "session started");
        resolved
    }

    /// Reset the current profile to the default administrator and clear the
    /// persisted session marker.
    pub async fn logout(&self) -> UserProfile {
        let admin = {
            let mut state = self.state.write().await;
            let admin = Self::admin_of(&state.directory);
            state.current = admin.clone();
            admin
        };

        if let Err(e) = self.store.remove(ACTIVE_EMAIL_KEY).await {
            warn!(error = %e, "failed clearing active session marker");
        }

        info!("session ended");
        admin
    }

    /// Add a new profile to the directory.
    ///
    /// Fails with [`DomainError::DuplicateUser`] when the email is taken and
    /// with a persistence error when the directory write fails — the new
    /// account's durability cannot be guaranteed in that case, although the
    /// in-memory directory keeps the entry.
    pub async fn create_user(&self, data: CreateUserData) -> DomainResult<UserProfile> {
        let (profile, serialized) = {
            let mut state = self.state.write().await;
            if state.directory.contains_key(&data.email) {
                return Err(DomainError::DuplicateUser(data.email));
            }

            let profile = UserProfile {
                avatar: data
                    .avatar
                    .unwrap_or_else(|| placeholder_avatar(&data.email)),
                email: data.email,
                name: data.name,
                phone: data.phone,
                role: data.role,
            };
            state.directory.insert(profile.email.clone(), profile.clone());
            (profile, Self::serialize_directory(&state.directory))
        };

        self.store
            .set(DIRECTORY_KEY, &serialized)
            .await
            .map_err(|e| {
                warn!(error = %e, email = %profile.email, "failed persisting new user");
                e
            })?;

        info!(email = %profile.email, role = profile.role.as_str(), "user created");
        Ok(profile)
    }

    /// Merge a partial update into the currently active profile and
    /// re-persist the directory (best-effort). If the current profile's
    /// email is somehow absent from the directory this is a silent no-op.
    pub async fn update_profile(&self, patch: ProfilePatch) -> UserProfile {
        let (profile, serialized) = {
            let mut state = self.state.write().await;
            let email = state.current.email.clone();
            let Some(existing) = state.directory.get(&email).cloned() else {
                // Defensive branch, not a normal path.
                warn!(%email, "current profile missing from directory, update skipped");
                return state.current.clone();
            };

            let merged = existing.apply(&patch);
            state.directory.insert(email, merged.clone());
            state.current = merged.clone();
            (merged, Self::serialize_directory(&state.directory))
        };

        if let Err(e) = self.store.set(DIRECTORY_KEY, &serialized).await {
            warn!(error = %e, email = %profile.email, "failed persisting profile update");
        }

        profile
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryKvStore;
    use async_trait::async_trait;

    fn new_user(email: &str, role: UserRole) -> CreateUserData {
        CreateUserData {
            email: email.to_string(),
            name: "Ana Torres".to_string(),
            phone: "+52 555 123 4567".to_string(),
            role,
            avatar: None,
        }
    }

    async fn fresh_service() -> (Arc<InMemoryKvStore>, SessionService) {
        let store = Arc::new(InMemoryKvStore::new());
        let service = SessionService::initialize(store.clone()).await;
        (store, service)
    }

    #[tokio::test]
    async fn initializes_with_defaults_and_admin_current() {
        let (_, service) = fresh_service().await;
        assert_eq!(service.current_profile().await.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(service.list_users().await.len(), default_profiles().len());
    }

    #[tokio::test]
    async fn created_user_is_listed_and_resolvable() {
        let (_, service) = fresh_service().await;
        let created = service
            .create_user(new_user("a@x.com", UserRole::Supervisor))
            .await
            .unwrap();
        assert_eq!(created.avatar, placeholder_avatar("a@x.com"));

        let resolved = service.login("a@x.com").await;
        assert_eq!(resolved, created);
        assert_eq!(service.current_profile().await, created);
    }

    #[tokio::test]
    async fn duplicate_user_fails_and_directory_unchanged() {
        let (_, service) = fresh_service().await;
        service
            .create_user(new_user("a@x.com", UserRole::Technician))
            .await
            .unwrap();
        let before = service.list_users().await;

        let err = service
            .create_user(new_user("a@x.com", UserRole::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateUser(_)));
        assert_eq!(service.list_users().await, before);
    }

    #[tokio::test]
    async fn unknown_login_falls_back_to_admin() {
        let (_, service) = fresh_service().await;
        service.logout().await;
        let resolved = service.login("nobody@x.com").await;
        assert_eq!(resolved.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(resolved.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn update_profile_keeps_key_set_and_moves_pointer() {
        let (_, service) = fresh_service().await;
        service
            .create_user(new_user("a@x.com", UserRole::Technician))
            .await
            .unwrap();
        service.login("a@x.com").await;

        let keys_before: Vec<String> = service
            .list_users()
            .await
            .into_iter()
            .map(|p| p.email)
            .collect();

        let updated = service
            .update_profile(ProfilePatch {
                name: Some("Ana T. de León".into()),
                phone: None,
                avatar: None,
            })
            .await;

        let keys_after: Vec<String> = service
            .list_users()
            .await
            .into_iter()
            .map(|p| p.email)
            .collect();
        assert_eq!(keys_before, keys_after);
        assert_eq!(updated.name, "Ana T. de León");
        assert_eq!(service.current_profile().await, updated);
        assert_eq!(service.login("a@x.com").await.name, "Ana T. de León");
    }

    #[tokio::test]
    async fn session_survives_reinitialization() {
        let (store, service) = fresh_service().await;
        service
            .create_user(new_user("a@x.com", UserRole::Supervisor))
            .await
            .unwrap();
        service.login("a@x.com").await;

        let reloaded = SessionService::initialize(store).await;
        assert_eq!(reloaded.current_profile().await.email, "a@x.com");
        assert_eq!(
            reloaded.list_users().await.len(),
            default_profiles().len() + 1
        );
    }

    #[tokio::test]
    async fn logout_clears_persisted_marker() {
        let (store, service) = fresh_service().await;
        service
            .create_user(new_user("a@x.com", UserRole::Supervisor))
            .await
            .unwrap();
        service.login("a@x.com").await;
        service.logout().await;

        assert_eq!(service.current_profile().await.email, DEFAULT_ADMIN_EMAIL);
        let reloaded = SessionService::initialize(store).await;
        assert_eq!(reloaded.current_profile().await.email, DEFAULT_ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn corrupt_directory_falls_back_to_defaults() {
        let store = Arc::new(InMemoryKvStore::new());
        store.set(DIRECTORY_KEY, "{not valid json").await.unwrap();
        store.set(ACTIVE_EMAIL_KEY, "a@x.com").await.unwrap();

        let service = SessionService::initialize(store).await;
        assert_eq!(service.list_users().await.len(), default_profiles().len());
        assert_eq!(service.current_profile().await.email, DEFAULT_ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn persisted_edits_to_defaults_survive_merge() {
        let (store, service) = fresh_service().await;
        service.login(DEFAULT_ADMIN_EMAIL).await;
        service
            .update_profile(ProfilePatch {
                name: Some("Root".into()),
                phone: None,
                avatar: None,
            })
            .await;

        let reloaded = SessionService::initialize(store).await;
        let admin = reloaded.login(DEFAULT_ADMIN_EMAIL).await;
        assert_eq!(admin.name, "Root");
        assert_eq!(reloaded.list_users().await.len(), default_profiles().len());
    }

    // ── Write-failure semantics ─────────────────────────────────

    struct FailingWrites {
        inner: InMemoryKvStore,
    }

    #[async_trait]
    impl KeyValueStore for FailingWrites {
        async fn get(&self, key: &str) -> DomainResult<Option<String>> {
            self.inner.get(key).await
        }
        async fn set(&self, _key: &str, _value: &str) -> DomainResult<()> {
            Err(DomainError::Persistence("disk full".into()))
        }
        async fn remove(&self, _key: &str) -> DomainResult<()> {
            Err(DomainError::Persistence("disk full".into()))
        }
    }

    #[tokio::test]
    async fn create_user_escalates_write_failure() {
        let store = Arc::new(FailingWrites {
            inner: InMemoryKvStore::new(),
        });
        let service = SessionService::initialize(store).await;

        let err = service
            .create_user(new_user("a@x.com", UserRole::Technician))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        // The in-memory directory keeps the entry regardless.
        assert!(service.list_users().await.iter().any(|p| p.email == "a@x.com"));
    }

    #[tokio::test]
    async fn update_and_login_swallow_write_failures() {
        let store = Arc::new(FailingWrites {
            inner: InMemoryKvStore::new(),
        });
        let service = SessionService::initialize(store).await;

        // Neither operation surfaces the storage error.
        let resolved = service.login(DEFAULT_ADMIN_EMAIL).await;
        assert_eq!(resolved.email, DEFAULT_ADMIN_EMAIL);
        let updated = service
            .update_profile(ProfilePatch {
                name: Some("Best Effort".into()),
                phone: None,
                avatar: None,
            })
            .await;
        assert_eq!(updated.name, "Best Effort");
        service.logout().await;
    }
}
