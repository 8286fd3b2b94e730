//! Auth context
//!
//! Wraps the session with login/logout/restore and answers the two questions
//! every screen asks: who is logged in, and may they do this.

use shared::claims::{TokenClaims, decode_claims};
use shared::permission;

use crate::session::{AuthUser, Session, SessionData, SessionStore};
use crate::{ApiClient, ClientResult};

/// Login state shared by every view
#[derive(Debug, Clone)]
pub struct AuthContext {
    api: ApiClient,
    session: Session,
    store: Option<SessionStore>,
}

impl AuthContext {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            store: None,
        }
    }

    /// Persist logins to `store`
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.session.snapshot()) {
            tracing::warn!(path = %store.path().display(), error = %e, "Failed to persist session");
        }
    }

    fn forget(&self) {
        self.session.clear();
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.delete() {
            tracing::warn!(path = %store.path().display(), error = %e, "Failed to delete session file");
        }
    }

    /// `POST /adminUser/login`; on success the session holds the new identity
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthUser> {
        let response = self.api.login(email, password).await?;
        let login = response.user;
        let user = AuthUser {
            id: login.id.clone(),
            email: login.email.clone().or_else(|| Some(email.to_string())),
            name: login.display_name().map(str::to_string),
            role: login.role.clone(),
        };

        self.session.set(login.token, user.clone());
        self.persist();
        tracing::info!(email = %email, role = ?user.role_name(), "Logged in");
        Ok(user)
    }

    pub fn logout(&self) {
        self.forget();
        tracing::info!("Logged out");
    }

    /// Load the persisted session. Expired tokens are discarded.
    pub fn restore(&self) -> Option<AuthUser> {
        let store = self.store.as_ref()?;
        let data: SessionData = match store.load() {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(path = %store.path().display(), error = %e, "Ignoring unreadable session file");
                return None;
            }
        };

        let expired = data
            .token
            .as_deref()
            .and_then(|t| decode_claims(t).ok())
            .is_some_and(|claims| claims.is_expired());
        if expired || !data.is_logged_in() {
            tracing::warn!(expired, "Discarding stored session");
            self.forget();
            return None;
        }

        self.session.replace(data);
        self.session.user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.session.user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Decoded claims of the current token
    pub fn claims(&self) -> Option<TokenClaims> {
        let token = self.session.token()?;
        decode_claims(&token)
            .inspect_err(|e| tracing::warn!(error = %e, "Token payload could not be decoded"))
            .ok()
    }

    pub fn is_super_admin(&self) -> bool {
        let user = self.session.user();
        permission::is_super_admin(
            user.as_ref().and_then(|u| u.role_name()),
            user.as_ref().and_then(|u| u.email.as_deref()),
        )
    }

    /// [`permission::has_permission`] for the logged-in identity
    pub fn has_permission(&self, service: &str, api: Option<&str>, method: Option<&str>) -> bool {
        let user = self.session.user();
        permission::has_permission(
            user.as_ref().and_then(|u| u.role.as_ref()),
            user.as_ref().and_then(|u| u.email.as_deref()),
            service,
            api,
            method,
        )
    }
}
