//! # Server-Side Sessions and Flash Notices
//!
//! Each browser gets a random session id in the `idcard_session` cookie. The
//! session record lives in process memory and carries two things:
//!
//! - `admin_authenticated`: set once the shared admin password is supplied.
//!   There is no logout and no expiry.
//! - pending flash notices: queued by a handler before a redirect and
//!   drained by the next page render.
//!
//! Handlers take a [`Session`] extractor and return it as a response part so
//! a freshly issued cookie reaches the browser.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "idcard_session";

/// Severity of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Danger,
}

impl FlashKind {
    /// CSS-facing name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Per-browser session state.
#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
    pub admin_authenticated: bool,
    pub flashes: Vec<Flash>,
}

/// Thread-safe, cloneable in-memory session table.
///
/// The `RwLock` is `parking_lot` and is never held across `.await`.
///
/// Only sessions holding state have a record: one is created by the first
/// flash or admin unlock, and a non-admin record is dropped once its
/// flashes are drained. Visitors who never trigger a notice cost nothing.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    data: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
}

impl SessionStore {
    /// Create an empty session table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the session named by `jar`, or start a new one.
    ///
    /// Returns the session id and the jar, which carries a `Set-Cookie` for
    /// the new id when one was issued. A new session is not recorded until
    /// something is stored in it.
    pub fn resolve(&self, jar: CookieJar) -> (Uuid, CookieJar) {
        let existing = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<Uuid>().ok())
            .filter(|id| self.data.read().contains_key(id));
        if let Some(id) = existing {
            return (id, jar);
        }

        let id = Uuid::new_v4();
        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        (id, jar.add(cookie))
    }

    /// Queue a flash notice for the session.
    pub fn push_flash(&self, id: &Uuid, kind: FlashKind, message: impl Into<String>) {
        self.data
            .write()
            .entry(*id)
            .or_default()
            .flashes
            .push(Flash {
                kind,
                message: message.into(),
            });
    }

    /// Remove and return every queued flash notice.
    pub fn take_flashes(&self, id: &Uuid) -> Vec<Flash> {
        let mut data = self.data.write();
        let Some(record) = data.get_mut(id) else {
            return Vec::new();
        };
        let flashes = std::mem::take(&mut record.flashes);
        if !record.admin_authenticated {
            data.remove(id);
        }
        flashes
    }

    /// Mark the session as admin-authenticated.
    pub fn mark_admin(&self, id: &Uuid) {
        self.data.write().entry(*id).or_default().admin_authenticated = true;
    }

    /// Whether the session has been admin-authenticated.
    pub fn is_admin(&self, id: &Uuid) -> bool {
        self.data
            .read()
            .get(id)
            .map(|record| record.admin_authenticated)
            .unwrap_or(false)
    }

    /// Return the number of live sessions.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether no session exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The caller's session, resolved from the request cookie.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: SessionStore,
    jar: CookieJar,
}

impl Session {
    /// Session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queue a flash notice for the next rendered page.
    pub fn flash(&self, kind: FlashKind, message: impl Into<String>) {
        self.store.push_flash(&self.id, kind, message);
    }

    /// Drain queued flash notices.
    pub fn take_flashes(&self) -> Vec<Flash> {
        self.store.take_flashes(&self.id)
    }

    /// Unlock the admin listing for this session.
    pub fn mark_admin(&self) {
        self.store.mark_admin(&self.id);
    }

    /// Whether the admin listing is unlocked for this session.
    pub fn is_admin(&self) -> bool {
        self.store.is_admin(&self.id)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let (id, jar) = state.sessions.resolve(jar);
        Ok(Self {
            id,
            store: state.sessions.clone(),
            jar,
        })
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn jar_with(value: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={value}")).unwrap(),
        );
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn resolve_without_cookie_issues_new_session() {
        let store = SessionStore::new();
        let (id, jar) = store.resolve(CookieJar::new());

        assert!(store.is_empty());
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn resolve_reuses_known_session() {
        let store = SessionStore::new();
        let (id, _) = store.resolve(CookieJar::new());
        store.mark_admin(&id);

        let (again, jar) = store.resolve(jar_with(&id.to_string()));
        assert_eq!(again, id);
        assert_eq!(store.len(), 1);
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().value(), id.to_string());
    }

    #[test]
    fn resolve_replaces_unknown_or_garbage_ids() {
        let store = SessionStore::new();
        let (a, _) = store.resolve(jar_with(&Uuid::new_v4().to_string()));
        let (b, _) = store.resolve(jar_with("not-a-uuid"));
        assert_ne!(a, b);
        assert!(store.is_empty());
    }

    #[test]
    fn stateless_visitors_leave_no_record() {
        let store = SessionStore::new();
        for _ in 0..1000 {
            let (id, _) = store.resolve(CookieJar::new());
            assert!(store.take_flashes(&id).is_empty());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn drained_record_is_dropped_unless_admin() {
        let store = SessionStore::new();
        let (visitor, _) = store.resolve(CookieJar::new());
        let (admin, _) = store.resolve(CookieJar::new());
        store.push_flash(&visitor, FlashKind::Success, "done");
        store.mark_admin(&admin);
        store.push_flash(&admin, FlashKind::Danger, "oops");
        assert_eq!(store.len(), 2);

        assert_eq!(store.take_flashes(&visitor).len(), 1);
        assert_eq!(store.take_flashes(&admin).len(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.is_admin(&admin));
    }

    #[test]
    fn flashes_are_drained_once_in_order() {
        let store = SessionStore::new();
        let (id, _) = store.resolve(CookieJar::new());
        store.push_flash(&id, FlashKind::Danger, "first");
        store.push_flash(&id, FlashKind::Success, "second");

        let flashes = store.take_flashes(&id);
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(flashes[1].kind, FlashKind::Success);
        assert!(store.take_flashes(&id).is_empty());
    }

    #[test]
    fn admin_flag_is_per_session() {
        let store = SessionStore::new();
        let (a, _) = store.resolve(CookieJar::new());
        let (b, _) = store.resolve(CookieJar::new());

        store.mark_admin(&a);
        assert!(store.is_admin(&a));
        assert!(!store.is_admin(&b));
    }

    #[test]
    fn flash_kind_names() {
        assert_eq!(FlashKind::Success.as_str(), "success");
        assert_eq!(FlashKind::Danger.as_str(), "danger");
    }
}
