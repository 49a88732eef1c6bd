use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// JSON client for the clinic REST backend.
///
/// Session cookies set by the backend are kept and replayed on every request,
/// so a logged-in session carries over to all data-access calls.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.backend_timeout)
            .default_headers(Self::default_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client against an arbitrary base URL with default settings.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let config = AppConfig {
            backend_api_url: base_url.to_string(),
            ..AppConfig::default()
        };
        Self::new(&config)
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        Ok(req.send().await?)
    }

    async fn error_for(response: Response) -> anyhow::Error {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        error!("API error ({}): {}", status, error_text);

        match status.as_u16() {
            401 | 403 => anyhow!("Authentication error: {}", error_text),
            404 => anyhow!("Resource not found: {}", error_text),
            _ => anyhow!("API error ({}): {}", status, error_text),
        }
    }

    /// Performs the request and decodes the JSON body; any non-2xx status is an error.
    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Like [`RestClient::request`] but a 404 yields `Ok(None)`.
    pub async fn request_optional<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Resource {} not found", path);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let data = response.json::<T>().await?;
        Ok(Some(data))
    }

    /// For calls whose success carries no body (e.g. `DELETE`). Returns `false` on 404.
    pub async fn request_no_content(&self, method: Method, path: &str) -> Result<bool> {
        let response = self.send(method, path, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(true)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn trailing_slash_is_trimmed_from_base_url() {
        let client = RestClient::with_base_url("http://localhost:8000/api/").unwrap();
        assert_eq!(client.get_base_url(), "http://localhost:8000/api");
    }

    #[tokio::test]
    async fn not_found_maps_to_none_and_server_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctors/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/doctors/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = RestClient::with_base_url(&server.uri()).unwrap();

        let missing: Option<Value> = client
            .request_optional(Method::GET, "/doctors/missing/", None)
            .await
            .unwrap();
        assert!(missing.is_none());

        let err = client
            .request::<Vec<Value>>(Method::GET, "/doctors/", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn delete_reports_whether_resource_existed() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/appointments/1/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = RestClient::with_base_url(&server.uri()).unwrap();
        assert!(client.request_no_content(Method::DELETE, "/appointments/1/").await.unwrap());
        assert!(!client.request_no_content(Method::DELETE, "/appointments/2/").await.unwrap());
    }
}
