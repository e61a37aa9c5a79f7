//! Supabase REST API Client
//!
//! HTTP client for the Supabase data service, speaking PostgREST wire
//! semantics: filters as query parameters, upserts via `Prefer:
//! resolution=merge-duplicates`, updates via PATCH with filters.
//!
//! Requests are single-shot: no retries, no backoff, no local queueing.
//! The caller decides how to react to a failure.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// PostgREST error code for "zero rows returned for a single-object request".
/// Treated as "not found" rather than a failure.
const PGRST_NO_ROWS: &str = "PGRST116";

/// Supabase REST API client
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
}

/// Configuration for the Supabase client
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL (e.g., "https://xyzcompany.supabase.co")
    pub url: String,
    /// Anon (public) API key, sent as `apikey` and bearer token
    pub anon_key: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Ordering clause for a select
#[derive(Debug, Clone, Copy)]
pub struct Order<'a> {
    pub column: &'a str,
    pub descending: bool,
}

impl<'a> Order<'a> {
    /// Newest-first ordering on the given column
    pub fn desc(column: &'a str) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    fn to_param(self) -> String {
        if self.descending {
            format!("{}.desc", self.column)
        } else {
            format!("{}.asc", self.column)
        }
    }
}

/// Build an equality filter value (`eq.<value>`)
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

impl SupabaseClient {
    /// Create a new Supabase client with the given configuration
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(SupabaseError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    fn query_params(
        filters: &[(&str, String)],
        order: Option<Order<'_>>,
        limit: Option<usize>,
    ) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for (column, filter) in filters {
            params.push((column.to_string(), filter.clone()));
        }
        if let Some(order) = order {
            params.push(("order".to_string(), order.to_param()));
        }
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Select rows from a table
    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, String)],
        order: Option<Order<'_>>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, SupabaseError> {
        let params = Self::query_params(filters, order, limit);

        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .query(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            response.json().await.map_err(SupabaseError::Request)
        } else {
            Err(api_error(response).await)
        }
    }

    /// Select a single row from a table, normalizing "no rows" to `None`
    ///
    /// Uses PostgREST's single-object representation; a `PGRST116` error
    /// (zero rows) is not a failure.
    pub async fn select_single(
        &self,
        table: &str,
        filters: &[(&str, String)],
        order: Option<Order<'_>>,
    ) -> Result<Option<Value>, SupabaseError> {
        let params = Self::query_params(filters, order, Some(1));

        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .header("Accept", "application/vnd.pgrst.object+json")
            .query(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            let row = response.json().await.map_err(SupabaseError::Request)?;
            return Ok(Some(row));
        }

        match api_error(response).await {
            SupabaseError::Api { code: Some(code), .. } if code == PGRST_NO_ROWS => Ok(None),
            err => Err(err),
        }
    }

    /// Insert-or-update a row, keyed by the table's uniqueness constraint
    pub async fn upsert(&self, table: &str, row: &Value) -> Result<(), SupabaseError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Update rows matching the filters with the given fields
    pub async fn update(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &Value,
    ) -> Result<(), SupabaseError> {
        let params: Vec<(String, String)> = filters
            .iter()
            .map(|(column, filter)| (column.to_string(), filter.clone()))
            .collect();

        let response = self
            .client
            .patch(self.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .header("Prefer", "return=minimal")
            .query(&params)
            .json(patch)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> SupabaseError {
    if e.is_timeout() {
        SupabaseError::Timeout
    } else if e.is_connect() {
        SupabaseError::Unavailable
    } else {
        SupabaseError::Request(e)
    }
}

/// Build an API error from a non-success response, parsing the PostgREST
/// error body when present.
async fn api_error(response: reqwest::Response) -> SupabaseError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    match serde_json::from_str::<PostgrestErrorBody>(&text) {
        Ok(body) => SupabaseError::Api {
            status,
            code: body.code,
            message: body.message.unwrap_or(text),
        },
        Err(_) => SupabaseError::Api {
            status,
            code: None,
            message: text,
        },
    }
}

/// PostgREST error body shape
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Errors that can occur when talking to Supabase
#[derive(Error, Debug)]
pub enum SupabaseError {
    #[error("Supabase unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SupabaseConfig::default();
        assert_eq!(config.url, "http://localhost:54321");
        assert_eq!(config.request_timeout_ms, 10_000);
        assert!(config.anon_key.is_empty());
    }

    #[test]
    fn test_table_url() {
        let client = SupabaseClient::new(SupabaseConfig {
            url: "https://example.supabase.co".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.table_url("challenges"),
            "https://example.supabase.co/rest/v1/challenges"
        );
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq("active"), "eq.active");
        assert_eq!(eq(7), "eq.7");
    }

    #[test]
    fn test_query_params() {
        let params = SupabaseClient::query_params(
            &[("user_id", eq("u-1")), ("status", eq("active"))],
            Some(Order::desc("created_at")),
            Some(5),
        );

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("user_id".to_string(), "eq.u-1".to_string()),
                ("status".to_string(), "eq.active".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_param() {
        assert_eq!(Order::desc("created_at").to_param(), "created_at.desc");
        let asc = Order {
            column: "id",
            descending: false,
        };
        assert_eq!(asc.to_param(), "id.asc");
    }

    #[test]
    fn test_error_body_parse() {
        let body: PostgrestErrorBody = serde_json::from_str(
            r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned","details":null}"#,
        )
        .unwrap();
        assert_eq!(body.code.as_deref(), Some("PGRST116"));
        assert!(body.message.unwrap().contains("no) rows"));
    }
}
