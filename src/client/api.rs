//! # Student API Client
//!
//! Thin HTTP wrapper over the four student endpoints. The base address is
//! an explicit value passed in at construction.

use std::time::Duration;

use reqwest::{Response, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::model::{StudentPayload, StudentRecord};

use super::errors::{ClientError, ClientResult};
use super::StudentGateway;

/// Shape of server error bodies; only `message` is read
#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for `/students`
#[derive(Debug, Clone)]
pub struct StudentApi {
    http: reqwest::Client,
    base_url: Url,
}

impl StudentApi {
    /// Build a client for the API at `config.api_base_url`
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = parse_base_url(&config.api_base_url).map_err(|reason| {
            ClientError::InvalidBaseUrl {
                url: config.api_base_url.clone(),
                reason,
            }
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/students` or `<base>/students/<id>`
    fn endpoint(&self, id: Option<&str>) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: "cannot be a base".to_string(),
                })?;
            segments.pop_if_empty().push("students");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Every record, as returned by the service
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> ClientResult<Vec<StudentRecord>> {
        let url = self.endpoint(None)?;
        debug!(%url, "fetching students");
        let response = ensure_success(self.http.get(url).send().await?).await?;
        decode(response).await
    }

    /// Create a record; returns it with its assigned id
    #[instrument(skip(self, payload), fields(student_id = %payload.student_id))]
    pub async fn create(&self, payload: &StudentPayload) -> ClientResult<StudentRecord> {
        let url = self.endpoint(None)?;
        debug!(%url, "creating student");
        let response = ensure_success(self.http.post(url).json(payload).send().await?).await?;
        decode(response).await
    }

    /// Replace record `id`
    #[instrument(skip(self, payload), fields(student_id = %payload.student_id))]
    pub async fn update(&self, id: &str, payload: &StudentPayload) -> ClientResult<StudentRecord> {
        let url = self.endpoint(Some(require_id(id)?))?;
        debug!(%url, "updating student");
        let response = ensure_success(self.http.put(url).json(payload).send().await?).await?;
        decode(response).await
    }

    /// Delete record `id`
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(Some(require_id(id)?))?;
        debug!(%url, "deleting student");
        ensure_success(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}

impl StudentGateway for StudentApi {
    async fn fetch_all(&self) -> ClientResult<Vec<StudentRecord>> {
        StudentApi::fetch_all(self).await
    }

    async fn create(&self, payload: &StudentPayload) -> ClientResult<StudentRecord> {
        StudentApi::create(self, payload).await
    }

    async fn update(&self, id: &str, payload: &StudentPayload) -> ClientResult<StudentRecord> {
        StudentApi::update(self, id, payload).await
    }

    async fn remove(&self, id: &str) -> ClientResult<()> {
        StudentApi::remove(self, id).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, String> {
    if raw.trim().is_empty() {
        return Err("address is empty".to_string());
    }
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err("cannot be a base".to_string());
    }
    Ok(url)
}

fn require_id(id: &str) -> ClientResult<&str> {
    if id.is_empty() {
        return Err(ClientError::MissingId);
    }
    Ok(id)
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ServerMessage>()
        .await
        .ok()
        .and_then(|body| body.message);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> StudentApi {
        StudentApi::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let api = api("http://localhost:3000");
        assert_eq!(
            api.endpoint(None).unwrap().as_str(),
            "http://localhost:3000/students"
        );
        assert_eq!(
            api.endpoint(Some("abc")).unwrap().as_str(),
            "http://localhost:3000/students/abc"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = api("http://example.com/api/");
        assert_eq!(
            api.endpoint(Some("abc")).unwrap().as_str(),
            "http://example.com/api/students/abc"
        );
    }

    #[test]
    fn test_endpoint_escapes_id() {
        let api = api("http://localhost:3000");
        assert_eq!(
            api.endpoint(Some("a/b")).unwrap().as_str(),
            "http://localhost:3000/students/a%2Fb"
        );
    }

    #[test]
    fn test_invalid_base_urls_rejected() {
        for base in ["", "   ", "not a url", "ftp://example.com", "mailto:someone@example.com"] {
            let result = StudentApi::new(&ClientConfig::new(base));
            assert!(
                matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
                "{base} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_id_rejected_before_request() {
        let api = api("http://127.0.0.1:9");
        assert!(matches!(api.remove("").await, Err(ClientError::MissingId)));
        assert!(matches!(
            api.update("", &StudentPayload::default()).await,
            Err(ClientError::MissingId)
        ));
    }
}
