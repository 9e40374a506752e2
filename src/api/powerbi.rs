use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::api::models::{ConfigStatus, QueryRequest, QueryResponse, SchemaEnvelope};
use crate::chat::dispatcher::{QueryBackend, QueryReply};

const QUERY_NATURAL_PATH: &str = "/api/powerbi/query-natural";
const CONFIG_PATH: &str = "/api/config";
const LOCAL_SCHEMA_PATH: &str = "/api/powerbi/local-schema";

fn build_endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// HTTP binding to the analytics backend.
pub struct PowerBiBackend {
    client: reqwest::Client,
    base_url: String,
}

impl PowerBiBackend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QueryBackend for PowerBiBackend {
    async fn query(&self, question: &str) -> Result<QueryReply> {
        let resp = self
            .client
            .post(build_endpoint(&self.base_url, QUERY_NATURAL_PATH))
            .json(&QueryRequest { question })
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Backend error {}: {}", status, text));
        }

        let body: QueryResponse = resp.json().await?;
        Ok(body.into_reply())
    }
}

pub async fn fetch_config_status(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<ConfigStatus> {
    let resp = client
        .get(build_endpoint(base_url, CONFIG_PATH))
        .send()
        .await
        .map_err(|e| anyhow!("Network error: {}", e))?;
    if !resp.status().is_success() {
        return Err(anyhow!("Backend error {}", resp.status()));
    }
    Ok(resp.json().await?)
}

pub async fn fetch_local_schema(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<SchemaEnvelope> {
    let resp = client
        .get(build_endpoint(base_url, LOCAL_SCHEMA_PATH))
        .send()
        .await
        .map_err(|e| anyhow!("Network error: {}", e))?;
    if !resp.status().is_success() {
        return Err(anyhow!("Backend error {}", resp.status()));
    }
    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_doubled_slash() {
        assert_eq!(
            build_endpoint("http://localhost:8000/", QUERY_NATURAL_PATH),
            "http://localhost:8000/api/powerbi/query-natural"
        );
        assert_eq!(
            build_endpoint("http://localhost:8000", CONFIG_PATH),
            "http://localhost:8000/api/config"
        );
    }
}
