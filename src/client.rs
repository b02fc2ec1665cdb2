use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::AppError;
use crate::models::{
    AuthFailure, AuthResponse, ClassDetail, ClassDetailResponse, ClassListResponse, ClassRecord,
    Credentials, FailureEnvelope,
};

/// Client for the gym API (`/v1/auth`, `/v1/classes`, `/v1/classes/{id}`).
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Option<Arc<Url>>,
}

impl ApiClient {
    /// A missing or unusable URL is accepted here and reported as
    /// [`AppError::Config`] by the first request.
    pub fn new(api_url: Option<&str>) -> Self {
        let base_url = api_url
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match Url::parse(raw) {
                Ok(url) if !url.cannot_be_a_base() => Some(Arc::new(url)),
                Ok(_) => {
                    warn!(api_url = raw, "API URL cannot be used as a base");
                    None
                }
                Err(err) => {
                    warn!(api_url = raw, error = %err, "invalid API URL");
                    None
                }
            });
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.as_deref().ok_or(AppError::Config)?.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Exchanges credentials for a client identifier.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, AppError> {
        let url = self.endpoint(&["v1", "auth"])?;
        debug!(%url, username, "authenticating");

        let response = self
            .client
            .post(url)
            .json(&Credentials { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let failure: AuthFailure = response.json().await.unwrap_or_default();
            debug!(%status, "authentication rejected");
            return Err(AppError::Application(failure.message));
        }

        let body: AuthResponse = response.json().await?;
        body.client_id
            .filter(|id| !id.is_empty())
            .ok_or(AppError::Application(None))
    }

    /// Classes starting within `[from, to)`; both bounds are ISO instants.
    pub async fn list_classes(
        &self,
        from: &str,
        to: &str,
        client_id: Option<&str>,
    ) -> Result<Vec<ClassRecord>, AppError> {
        let mut url = self.endpoint(&["v1", "classes"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("from", from).append_pair("to", to);
            if let Some(client_id) = client_id {
                query.append_pair("clientId", client_id);
            }
        }

        let body: ClassListResponse = self.fetch_json(url).await?;
        if !body.success {
            return Err(AppError::Application(body.error));
        }
        Ok(body.classes)
    }

    pub async fn class_detail(
        &self,
        id: &str,
        client_id: Option<&str>,
    ) -> Result<ClassDetail, AppError> {
        let mut url = self.endpoint(&["v1", "classes", id])?;
        if let Some(client_id) = client_id {
            url.query_pairs_mut().append_pair("clientId", client_id);
        }

        let body: ClassDetailResponse = self.fetch_json(url).await?;
        if !body.success {
            return Err(AppError::Application(body.error));
        }
        Ok(ClassDetail {
            class: body.class,
            participants: body.participants,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        debug!(%url, "fetching");
        let response = self.client.get(url).send().await?;

        if let Some(status_error) = response.error_for_status_ref().err() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(match serde_json::from_slice::<FailureEnvelope>(&body) {
                Ok(FailureEnvelope {
                    success: false,
                    error,
                }) => AppError::Application(error),
                _ => AppError::Network(status_error),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = ApiClient::new(Some("http://api.example.com"));
        assert_eq!(
            client.endpoint(&["v1", "auth"]).unwrap().as_str(),
            "http://api.example.com/v1/auth"
        );

        let client = ApiClient::new(Some("http://api.example.com/gym/"));
        assert_eq!(
            client.endpoint(&["v1", "classes", "a b"]).unwrap().as_str(),
            "http://api.example.com/gym/v1/classes/a%20b"
        );
    }

    #[test]
    fn test_missing_url_is_config_error() {
        for raw in [None, Some(""), Some("   "), Some("not a url"), Some("mailto:x@y.z")] {
            let client = ApiClient::new(raw);
            assert!(!client.is_configured());
            assert!(matches!(client.endpoint(&["v1"]), Err(AppError::Config)));
        }
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_before_network() {
        let client = ApiClient::new(None);
        let err = client.authenticate("ana", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Config));
    }
}
