//! Destination for finished inquiries: the `projects` table behind Supabase REST.

use futures::future::LocalBoxFuture;
use gloo_console::error;
use gloo_net::http::Request;
use thiserror::Error;

use crate::config;
use crate::contact::lead::LeadSubmission;

pub const PROJECTS_TABLE: &str = "projects";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("record sink is not configured")]
    NotConfigured,
    #[error("network error: {0}")]
    Network(String),
    #[error("insert rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Durable destination for finished inquiries.
#[cfg_attr(test, mockall::automock)]
pub trait LeadSink {
    fn insert(&self, record: LeadSubmission) -> LocalBoxFuture<'static, Result<(), SinkError>>;
}

/// Inserts rows through the Supabase REST interface.
#[derive(Clone, Debug, PartialEq)]
pub struct SupabaseSink {
    base_url: String,
    anon_key: String,
}

impl SupabaseSink {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::get_supabase_url(), config::get_supabase_anon_key())
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.anon_key.is_empty()
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), PROJECTS_TABLE)
    }
}

impl LeadSink for SupabaseSink {
    fn insert(&self, record: LeadSubmission) -> LocalBoxFuture<'static, Result<(), SinkError>> {
        let configured = self.is_configured();
        let url = self.table_url();
        let key = self.anon_key.clone();

        Box::pin(async move {
            if !configured {
                return Err(SinkError::NotConfigured);
            }

            let response = Request::post(&url)
                .header("apikey", &key)
                .header("Authorization", &format!("Bearer {}", key))
                .header("Content-Type", "application/json")
                .header("Prefer", "return=minimal")
                .json(&[record])
                .map_err(|e| SinkError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| {
                    error!("Network error while inserting lead:", e.to_string());
                    SinkError::Network(e.to_string())
                })?;

            if response.ok() {
                Ok(())
            } else {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Err(SinkError::Rejected { status, body })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_ignores_trailing_slash() {
        let sink = SupabaseSink::new("https://abc.supabase.co/", "anon");
        assert_eq!(sink.table_url(), "https://abc.supabase.co/rest/v1/projects");
        assert!(sink.is_configured());
    }

    #[test]
    fn missing_key_is_not_configured() {
        let sink = SupabaseSink::new("https://abc.supabase.co", "");
        assert!(!sink.is_configured());
        let result = futures::executor::block_on(sink.insert(crate::contact::fakes::valid_record()));
        assert_eq!(result, Err(SinkError::NotConfigured));
    }
}
