//! HTTP client adapter for the SmartClass API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and a shared `Transport`, and carries
//! no mutable state between calls. Each primitive (`get`, `post`, `put`,
//! `delete`) is split into `build_request`, which produces an `HttpRequest`,
//! and `parse_json` / `check_status`, which consume an `HttpResponse`. Both
//! halves are pure; the transport performs the single round-trip in between.
//! There is no retry.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Thin adapter over a base URL and a `Transport`.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Client backed by `reqwest`, using the configured URL and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(&config.api_url, Arc::new(transport)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<HttpRequest, TransportError> {
        let (headers, body) = match body {
            Some(body) => {
                let json =
                    serde_json::to_string(body).map_err(|e| TransportError::Encode(e.to_string()))?;
                (
                    vec![("content-type".to_string(), "application/json".to_string())],
                    Some(json),
                )
            }
            None => (Vec::new(), None),
        };
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers,
            body,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let request = self.build_request::<()>(HttpMethod::Get, path, query, None)?;
        parse_json(self.transport.execute(request).await?)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(HttpMethod::Post, path, &[], Some(body))?;
        parse_json(self.transport.execute(request).await?)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(HttpMethod::Put, path, &[], Some(body))?;
        parse_json(self.transport.execute(request).await?)
    }

    /// PUT whose response body is not needed; any 2xx counts as success.
    pub async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), TransportError> {
        let request = self.build_request(HttpMethod::Put, path, &[], Some(body))?;
        self.send(request).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), TransportError> {
        let request = self.build_request::<()>(HttpMethod::Delete, path, &[], None)?;
        self.send(request).await.map(|_| ())
    }

    /// Execute a prebuilt request, accepting any 2xx response whatever its body.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.transport.execute(request).await?;
        check_status(&response)?;
        Ok(response)
    }
}

/// Map non-2xx status codes to `TransportError::Status`.
pub fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status, then deserialize the body into `T`.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, TransportError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000", Arc::new(ScriptedTransport::default()))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_with_query() {
        let req = client()
            .build_request::<()>(HttpMethod::Get, "/api/posts", &[("excluded", "true")], None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url(), "http://localhost:3000/api/posts?excluded=true");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_post_sets_json_body_and_header() {
        let body = serde_json::json!({ "title": "Intro" });
        let req = client()
            .build_request(HttpMethod::Post, "/api/posts", &[], Some(&body))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let sent: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["title"], "Intro");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/", Arc::new(ScriptedTransport::default()));
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn parse_json_rejects_non_success_status() {
        let err = parse_json::<serde_json::Value>(response(500, "boom")).unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[test]
    fn parse_json_reports_shape_mismatch() {
        let err = parse_json::<Vec<String>>(response(200, r#"{"posts":[]}"#)).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn check_status_accepts_no_content() {
        assert!(check_status(&response(204, "")).is_ok());
    }

    #[tokio::test]
    async fn get_sends_one_request_and_decodes() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_json(200, r#"["a","b"]"#);
        let client = ApiClient::new("http://api", transport.clone());

        let values: Vec<String> = client.get("/api/things", &[]).await.unwrap();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, "http://api/api/things");
    }

    #[tokio::test]
    async fn put_unit_ignores_response_body() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_json(200, "not json");
        transport.push_json(409, "conflict");
        let client = ApiClient::new("http://api", transport.clone());

        let body = serde_json::json!({ "excluded": true });
        client.put_unit("/api/posts/1", &body).await.unwrap();
        let err = client.put_unit("/api/posts/1", &body).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 409, .. }));

        let sent = transport.requests();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"excluded":true}"#));
    }

    #[tokio::test]
    async fn unreachable_server_is_reported_once() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_unreachable();
        let client = ApiClient::new("http://api", transport.clone());

        let err = client.delete("/api/posts/1").await.unwrap_err();
        assert!(matches!(err, TransportError::Unreachable(_)));
        assert_eq!(transport.requests().len(), 1);
    }
}
