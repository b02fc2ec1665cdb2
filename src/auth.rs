use tracing::{debug, info};
use url::form_urlencoded;

use crate::client::ApiClient;
use crate::error::AppError;
use crate::session::SessionStore;
use crate::validation::validate_credentials;

pub const LOGIN_PATH: &str = "/";

/// Outcome of checking a protected destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Allow,
    Redirect { from: String },
}

impl Gate {
    /// Login entry point carrying the originally requested destination.
    pub fn login_location(from: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(from.as_bytes()).collect();
        format!("{LOGIN_PATH}?from={encoded}")
    }
}

pub fn guard(store: &impl SessionStore, destination: &str) -> Gate {
    if store.is_active() {
        Gate::Allow
    } else {
        debug!(destination, "no active session, redirecting to login");
        Gate::Redirect {
            from: destination.to_string(),
        }
    }
}

/// Single login attempt; the token is stored only on success.
pub async fn login(
    api: &ApiClient,
    store: &mut impl SessionStore,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    validate_credentials(username, password)?;
    let client_id = api.authenticate(username, password).await?;
    store.set(&client_id);
    info!(username, "login succeeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn test_guard_allows_active_session() {
        let store = MemorySessionStore::with_token("abc");
        assert_eq!(guard(&store, "/landing"), Gate::Allow);
    }

    #[test]
    fn test_guard_redirects_without_session() {
        let mut store = MemorySessionStore::new();
        assert_eq!(
            guard(&store, "/class/4"),
            Gate::Redirect {
                from: "/class/4".to_string()
            }
        );

        store.set("abc");
        assert_eq!(guard(&store, "/class/4"), Gate::Allow);
        store.clear();
        assert!(matches!(guard(&store, "/class/4"), Gate::Redirect { .. }));
    }

    #[test]
    fn test_login_location_encodes_destination() {
        assert_eq!(
            Gate::login_location("/landing?day=tue"),
            "/?from=%2Flanding%3Fday%3Dtue"
        );
    }

    #[tokio::test]
    async fn test_login_validation_skips_network() {
        // An unconfigured client would fail with Config if it were reached.
        let api = ApiClient::new(None);
        let mut store = MemorySessionStore::new();

        let err = login(&api, &mut store, "", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = login(&api, &mut store, "ana", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!store.is_active());
    }

    #[tokio::test]
    async fn test_login_stores_token_once() {
        let mock_server = MockServer::start();
        let auth = mock_server.mock(|when, then| {
            when.method(POST)
                .path("/v1/auth")
                .json_body(json!({"username": "ana", "password": "secret"}));
            then.status(200).json_body(json!({"client_id": "tok-1"}));
        });
        let api = ApiClient::new(Some(&mock_server.base_url()));
        let mut store = MemorySessionStore::new();

        login(&api, &mut store, "ana", "secret").await.unwrap();

        assert!(store.is_active());
        assert_eq!(store.get().as_deref(), Some("tok-1"));
        assert_eq!(guard(&store, "/landing"), Gate::Allow);
        assert_eq!(guard(&store, "/class/3"), Gate::Allow);
        auth.assert();
    }
}
