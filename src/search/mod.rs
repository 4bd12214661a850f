//! Search module - the Elasticsearch boundary / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - Search module only exposes primitive operations: search, ping
//! - Core compiles queries and controls pagination; call direction is
//!   Core → Search (unidirectional) / 调用方向
//! - Response-shape differences between backend versions are normalized
//!   here and nowhere else / 响应结构差异只在这一层抹平

pub mod client;
pub mod types;

pub use client::EsClient;
pub use types::{SearchRequest, SearchResponse, TotalCount};

use async_trait::async_trait;

/// What the query executor needs from a search backend / 查询执行器依赖的后端能力
///
/// Implemented by [`EsClient`] in production and by in-memory stubs in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute one search against the named index / 在指定索引上执行一次查询
    async fn search(&self, index: &str, request: &SearchRequest)
        -> anyhow::Result<SearchResponse>;

    /// Connectivity probe for the readiness endpoint / 就绪探测
    async fn ping(&self) -> anyhow::Result<()>;
}
