//! Session store: credential, identity, role, and the status of the last
//! authentication attempt.
//!
//! DESIGN
//! ======
//! The credential, role, and identity are mirrored synchronously into durable
//! storage under fixed keys so a reload restores the session. Transient fields
//! (`operation_status`, `last_error`, `last_notice`) live only in memory.
//! Fields are private; writes go through the setters below or through
//! `net::auth::authenticate`.
//!
//! Storage failures are logged and otherwise ignored: the in-memory session
//! stays authoritative for the rest of the page lifetime.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::net::auth::AuthError;
use crate::state::notice::Notice;
use crate::util::storage::KeyValueStorage;

pub const CREDENTIAL_KEY: &str = "jwtToken";
pub const ROLE_KEY: &str = "role";
pub const IDENTITY_KEY: &str = "user";

/// Whether an authentication request is outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperationStatus {
    #[default]
    Idle,
    InFlight,
}

/// Permission-level identifier as sent by the server (`0` user,
/// `1` regional representative, `2` federation moderator).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn KeyValueStorage>,
    credential: Option<String>,
    identity: Option<Value>,
    role: Option<RoleId>,
    operation_status: OperationStatus,
    last_error: Option<AuthError>,
    last_notice: Notice,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("identity", &self.identity)
            .field("role", &self.role)
            .field("operation_status", &self.operation_status)
            .field("last_error", &self.last_error)
            .field("last_notice", &self.last_notice)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Empty, unauthenticated session. Does not read `storage`.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            credential: None,
            identity: None,
            role: None,
            operation_status: OperationStatus::Idle,
            last_error: None,
            last_notice: Notice::default(),
        }
    }

    /// Rebuild the session from the keys a previous run left in `storage`.
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let credential = storage.get(CREDENTIAL_KEY).filter(|t| !t.is_empty());
        let role = storage.get(ROLE_KEY).filter(|r| !r.is_empty()).map(RoleId);
        let identity = storage.get(IDENTITY_KEY).and_then(|raw| match serde_json::from_str(&raw) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding unreadable stored identity: {e}");
                None
            }
        });
        Self { credential, identity, role, ..Self::new(storage) }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Value> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<&RoleId> {
        self.role.as_ref()
    }

    #[must_use]
    pub fn operation_status(&self) -> OperationStatus {
        self.operation_status
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&AuthError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn last_notice(&self) -> &Notice {
        &self.last_notice
    }

    pub fn set_credential(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.persist(CREDENTIAL_KEY, Some(&token));
        self.credential = Some(token);
    }

    /// Overwrite the identity; `None` also removes the stored copy.
    pub fn set_identity(&mut self, identity: Option<Value>) {
        match &identity {
            Some(value) => match serde_json::to_string(value) {
                Ok(raw) => self.persist(IDENTITY_KEY, Some(&raw)),
                Err(e) => log::warn!("identity not persisted: {e}"),
            },
            None => self.persist(IDENTITY_KEY, None),
        }
        self.identity = identity;
    }

    pub fn set_role(&mut self, role: RoleId) {
        self.persist(ROLE_KEY, Some(role.as_str()));
        self.role = Some(role);
    }

    /// Drop the credential only. Identity and role are left in place.
    pub fn clear_credential(&mut self) {
        self.persist(CREDENTIAL_KEY, None);
        self.credential = None;
    }

    /// Log out: drop credential, identity, and role from memory and storage.
    pub fn clear(&mut self) {
        self.clear_credential();
        self.persist(IDENTITY_KEY, None);
        self.persist(ROLE_KEY, None);
        self.identity = None;
        self.role = None;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.last_notice = notice;
    }

    pub fn dismiss_notice(&mut self) {
        self.last_notice.visible = false;
    }

    pub fn set_operation_error(&mut self, err: AuthError) {
        self.last_error = Some(err);
    }

    /// Claim the single in-flight slot. Returns `false` if another
    /// authentication is already running.
    pub(crate) fn begin_operation(&mut self) -> bool {
        if self.operation_status == OperationStatus::InFlight {
            return false;
        }
        self.operation_status = OperationStatus::InFlight;
        self.last_error = None;
        true
    }

    pub(crate) fn finish_operation(&mut self) {
        self.operation_status = OperationStatus::Idle;
    }

    fn persist(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(v) => self.storage.set(key, v),
            None => self.storage.remove(key),
        };
        if let Err(e) = result {
            log::warn!("session storage: {e}");
        }
    }
}
