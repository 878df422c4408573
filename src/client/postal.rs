//! # Postal Code Lookup
//!
//! Resolves a Brazilian CEP into street, neighborhood, city and state.
//! The lookup service answers an unknown code with HTTP 200 and an
//! `erro` flag, which surfaces here as [`LookupOutcome::NotFound`].

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::errors::PostalLookupError;

/// Default public lookup service
pub const DEFAULT_LOOKUP_URL: &str = "https://viacep.com.br";

/// Address parts returned for a postal code. Empty strings mean the
/// service had no value for that part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(PostalAddress),
    NotFound,
}

/// Resolves postal codes into address parts
pub trait PostalCodeLookup: Send + Sync {
    fn lookup(
        &self,
        zipcode: &str,
    ) -> impl Future<Output = Result<LookupOutcome, PostalLookupError>> + Send;
}

/// Strip everything but digits; a lookup needs exactly 8
pub fn normalize_zipcode(raw: &str) -> Result<String, PostalLookupError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 8 {
        return Err(PostalLookupError::InvalidZipcode(raw.to_string()));
    }
    Ok(digits)
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    /// `true` or `"true"` depending on service version
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            _ => false,
        }
    }

    fn into_outcome(self) -> LookupOutcome {
        if self.is_error() {
            return LookupOutcome::NotFound;
        }
        LookupOutcome::Found(PostalAddress {
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        })
    }
}

/// HTTP lookup against a ViaCEP-compatible service
#[derive(Debug, Clone)]
pub struct ViaCepLookup {
    http: reqwest::Client,
    base_url: Url,
}

impl ViaCepLookup {
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, PostalLookupError> {
        let parsed = Url::parse(base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| PostalLookupError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) address".to_string(),
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: parsed,
        })
    }

    /// `<base>/ws/<cep>/json/`
    fn endpoint(&self, cep: &str) -> Result<Url, PostalLookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PostalLookupError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["ws", cep, "json", ""]);
        Ok(url)
    }
}

impl PostalCodeLookup for ViaCepLookup {
    #[instrument(skip(self))]
    async fn lookup(&self, zipcode: &str) -> Result<LookupOutcome, PostalLookupError> {
        let cep = normalize_zipcode(zipcode)?;
        let url = self.endpoint(&cep)?;
        debug!(%url, "looking up postal code");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Ok(LookupOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(PostalLookupError::Status(status.as_u16()));
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| PostalLookupError::Decode(e.to_string()))?;
        Ok(body.into_outcome())
    }
}
