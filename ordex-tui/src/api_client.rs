//! REST client for the Supabase (PostgREST) backend.

use crate::config::TuiConfig;
use ordex_core::ServiceOrder;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

const ORDERS_TABLE: &str = "ordens_servico";
const MARKERS_TABLE: &str = "marcadores_ordem_servico";

/// Structured error body PostgREST returns on failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Remote error: {message}")]
    Remote {
        message: String,
        code: Option<String>,
    },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// Parameters for the main order query, already in PostgREST operator form
/// (`gte.2024-06-03`, `eq.Finalizada`, `ilike.*maria*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub select: String,
    pub predicates: Vec<(String, String)>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl ApiClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(&config.supabase_anon_key)
            .map_err(|_| ApiClientError::Config("anon key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.supabase_anon_key))
            .map_err(|_| ApiClientError::Config("anon key is not a valid header value".into()))?;
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Fetch the order rows matching a built query.
    pub async fn fetch_orders(&self, query: &OrderQuery) -> Result<Vec<ServiceOrder>, ApiClientError> {
        let mut params: Vec<(String, String)> =
            vec![("select".to_string(), query.select.clone())];
        params.extend(query.predicates.iter().cloned());
        self.select(ORDERS_TABLE, &params).await
    }

    /// Fetch the tag names attached to one order, oldest first.
    pub async fn fetch_markers(&self, order_id: i64) -> Result<Vec<String>, ApiClientError> {
        #[derive(Deserialize)]
        struct MarkerRow {
            descricao: Option<String>,
        }

        let params = [
            ("select".to_string(), "descricao".to_string()),
            ("id_ordem_servico".to_string(), format!("eq.{}", order_id)),
            ("order".to_string(), "id".to_string()),
        ];
        let rows: Vec<MarkerRow> = self.select(MARKERS_TABLE, &params).await?;
        Ok(rows.into_iter().filter_map(|r| r.descricao).collect())
    }

    async fn select<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiClientError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .query(params)
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let text = response.text().await?;
            if let Ok(remote) = serde_json::from_str::<RemoteError>(&text) {
                tracing::error!(
                    status = status.as_u16(),
                    code = remote.code.as_deref().unwrap_or(""),
                    details = remote.details.as_deref().unwrap_or(""),
                    hint = remote.hint.as_deref().unwrap_or(""),
                    "remote request failed"
                );
                return Err(ApiClientError::Remote {
                    message: remote.message,
                    code: remote.code,
                });
            }
            Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuiConfig;

    fn config() -> TuiConfig {
        TuiConfig {
            supabase_url: "https://example.supabase.co/".to_string(),
            supabase_anon_key: "anon-key".to_string(),
            ..TuiConfig::offline_defaults()
        }
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let api = ApiClient::new(&config()).unwrap();
        assert_eq!(api.base_url, "https://example.supabase.co");
    }

    #[test]
    fn test_new_rejects_non_ascii_key() {
        let mut config = config();
        config.supabase_anon_key = "chave\ncom-quebra".to_string();
        assert!(matches!(
            ApiClient::new(&config),
            Err(ApiClientError::Config(_))
        ));
    }

    #[test]
    fn test_remote_error_body_deserializes() {
        let body = r#"{"message":"permission denied","code":"42501","details":null,"hint":null}"#;
        let remote: RemoteError = serde_json::from_str(body).unwrap();
        assert_eq!(remote.message, "permission denied");
        assert_eq!(remote.code.as_deref(), Some("42501"));
    }
}
