use crate::error::ServiceError;
use crate::justwatch::api;
use crate::traits::TitleCatalog;
use async_trait::async_trait;
use reelport_config::{AuthToken, JustWatchConfig};
use reelport_models::{ListKind, ResolvedTitle, TitleKind};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const GRAPHQL_URL: &str = "https://apis.justwatch.com/graphql";

// The API fronts the consumer web app; a browser UA avoids bot filtering
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Authenticated client for the JustWatch GraphQL endpoint.
///
/// Holds the read-only bearer token for the process lifetime; one POST per
/// query or mutation, with an explicit per-call timeout.
pub struct JustWatchClient {
    http: Client,
    auth_header: String,
    country: String,
    language: String,
}

impl JustWatchClient {
    pub fn new(token: &AuthToken, config: &JustWatchConfig) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            auth_header: token.header_value().to_string(),
            country: config.country.clone(),
            language: config.language.clone(),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// POST one GraphQL document. 401/403 map to `ServiceError::Auth`,
    /// other non-success statuses and GraphQL-level errors to `Api`.
    pub(crate) async fn post_graphql(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Value, ServiceError> {
        let payload = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .http
            .post(GRAPHQL_URL)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", &self.language)
            .header("Origin", "https://www.justwatch.com")
            .header(
                "Referer",
                format!(
                    "https://www.justwatch.com/{}/watchlist",
                    self.country.to_lowercase()
                ),
            )
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ServiceError::Auth {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api(format!("HTTP {}: {}", status, body)));
        }

        let body: Value = response.json().await?;

        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                let message = errors[0]
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown GraphQL error");
                debug!("GraphQL error payload: {}", errors[0]);
                return Err(ServiceError::Api(message.to_string()));
            }
        }

        Ok(body)
    }
}

#[async_trait]
impl TitleCatalog for JustWatchClient {
    async fn lookup_title(
        &self,
        title: &str,
        kind: TitleKind,
        year: Option<u32>,
    ) -> Result<Option<ResolvedTitle>, ServiceError> {
        api::search_title(self, title, kind, year).await
    }

    async fn set_in_list(&self, list: ListKind, title_id: &str) -> Result<(), ServiceError> {
        match list {
            ListKind::Watchlist => api::set_in_watchlist(self, title_id).await,
            ListKind::Seenlist => api::set_in_seenlist(self, title_id).await,
        }
    }
}
