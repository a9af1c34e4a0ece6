//! Session management.

use crate::user::{LoginForm, User, UserPatch};
use crate::AuthError;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use upenergy_cache::{Cache, KeyValueStore};

/// Storage key of the logged-in user record.
pub const USER_STORAGE_KEY: &str = "upenergy_user";

/// The login state for one client, persisted under [`USER_STORAGE_KEY`].
///
/// There is no credential check: logging in records whoever the form says
/// the user is.
#[derive(Debug)]
pub struct AuthSession<S> {
    user: Option<User>,
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Restore the session persisted under [`USER_STORAGE_KEY`].
    pub fn restore(store: S) -> Self {
        Self::restore_with_key(store, USER_STORAGE_KEY)
    }

    /// Restore the session persisted under `key`.
    ///
    /// An unreadable record is logged and treated as logged out.
    pub fn restore_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cache = Cache::new(store);

        let user = match cache.get::<User>(&key) {
            Ok(user) => user,
            Err(e) => {
                warn!(key = %key, error = %e, "error loading user from storage");
                None
            }
        };

        Self { user, cache, key }
    }

    /// Log in as of now.
    pub fn login(&mut self, form: LoginForm) -> Result<&User, AuthError> {
        self.login_at(form, Utc::now())
    }

    /// Log in with an explicit login time. Replaces any current user.
    pub fn login_at(&mut self, form: LoginForm, now: DateTime<Utc>) -> Result<&User, AuthError> {
        form.validate()?;
        let user = User::from_login(form, now);
        info!(email = %user.email, role = %user.role, "user logged in");
        self.persist(&user);
        Ok(self.user.insert(user))
    }

    /// Log out and forget the stored record.
    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            debug!("user logged out");
        }
        if let Err(e) = self.cache.delete(&self.key) {
            warn!(key = %self.key, error = %e, "failed to remove stored user");
        }
    }

    /// Merge `patch` into the current user and persist it.
    pub fn update_user(&mut self, patch: UserPatch) -> Result<&User, AuthError> {
        let mut user = self.user.take().ok_or(AuthError::NotAuthenticated)?;
        user.apply(patch);
        self.persist(&user);
        Ok(self.user.insert(user))
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the logged-in user is an admin.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Whether the logged-in user is an investor.
    pub fn is_investor(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_investor)
    }

    /// Storage key this session persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self, user: &User) {
        if let Err(e) = self.cache.set(&self.key, user) {
            warn!(key = %self.key, error = %e, "failed to persist user");
        }
    }
}
