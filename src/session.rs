use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name under which the client identifier is persisted.
pub const SESSION_KEY: &str = "client_id";

/// Storage for the single opaque client identifier.
pub trait SessionStore {
    fn get(&self) -> Option<String>;

    fn set(&mut self, token: &str);

    fn clear(&mut self);

    fn is_active(&self) -> bool {
        self.get().is_some_and(|token| !token.is_empty())
    }
}

/// Session kept in a persistent browser cookie.
///
/// The jar is immutable per request; mutations build a new jar that must be
/// returned with the response (see [`CookieSessionStore::into_jar`]).
#[derive(Debug, Clone)]
pub struct CookieSessionStore {
    jar: CookieJar,
    secure: bool,
}

impl CookieSessionStore {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionStore for CookieSessionStore {
    fn get(&self) -> Option<String> {
        self.jar.get(SESSION_KEY).map(|c| c.value().to_string())
    }

    fn set(&mut self, token: &str) {
        let cookie = Cookie::build((SESSION_KEY, token.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .permanent();
        self.jar = self.jar.clone().add(cookie);
    }

    fn clear(&mut self) {
        self.jar = self.jar.clone().remove(Cookie::build(SESSION_KEY).path("/"));
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
