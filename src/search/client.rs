//! Elasticsearch HTTP client / Elasticsearch HTTP客户端

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::config::ElasticsearchConfig;
use super::types::{SearchRequest, SearchResponse};
use super::SearchBackend;

/// Thin client over the cluster's REST API / 集群REST API的轻量客户端
///
/// The inner `reqwest::Client` owns the connection pool and is safe to share
/// across request handlers; cloning the struct is cheap.
#[derive(Debug, Clone)]
pub struct EsClient {
    base_url: String,
    client: Client,
}

impl EsClient {
    pub fn new(config: &ElasticsearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl SearchBackend for EsClient {
    async fn search(&self, index: &str, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/{}/_search", self.base_url, index);

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("Elasticsearch request failed: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            // 错误响应体里通常带原因，一并带回
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Elasticsearch returned {}: {}",
                status,
                body
            ));
        }

        resp.json::<SearchResponse>()
            .await
            .map_err(|e| anyhow!("Malformed Elasticsearch response: {}", e))
    }

    async fn ping(&self) -> Result<()> {
        let resp = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| anyhow!("Elasticsearch ping failed: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("Elasticsearch ping returned {}", status));
        }
        Ok(())
    }
}
