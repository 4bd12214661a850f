//! Wire types of the search backend / 搜索后端的报文类型

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One compiled search call / 一次编译完成的查询
///
/// Serializes directly into the `_search` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Compiled query document / 编译后的查询文档
    pub query: Value,
    /// Offset of the first hit / 起始偏移
    pub from: u64,
    /// Page size / 每页数量
    pub size: u32,
    /// Sort document, `[{field: order}]` / 排序文档
    pub sort: Value,
}

/// Top-level `_search` response / 查询响应
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsEnvelope,
}

/// `hits` envelope: total count plus the page of hits / 命中封套
#[derive(Debug, Clone, Deserialize)]
pub struct HitsEnvelope {
    pub total: TotalCount,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total count in either backend shape / 两种形态的总数
///
/// Older clusters report `"total": 42`, newer ones
/// `"total": {"value": 42, "relation": "eq"}`. Both deserialize here and
/// normalize through [`TotalCount::value`]; nothing downstream sees the
/// difference.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TotalCount {
    Bare(u64),
    Tracked { value: u64 },
}

impl TotalCount {
    /// The single normalized count / 归一化后的总数
    pub fn value(&self) -> u64 {
        match self {
            TotalCount::Bare(value) => *value,
            TotalCount::Tracked { value } => *value,
        }
    }
}

/// One hit; the stored document rides in `_source` / 单条命中
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl SearchResponse {
    /// Normalized total / 归一化总数
    pub fn total(&self) -> u64 {
        self.hits.total.value()
    }

    /// Stored documents in backend order / 按后端顺序取出文档
    pub fn records(self) -> Vec<Value> {
        self.hits.hits.into_iter().map(|hit| hit.source).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_total() {
        let raw = json!({
            "hits": {
                "total": 42,
                "hits": [{ "_source": { "vin": "1FA6P8CF5H5100001" } }]
            }
        });
        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.total(), 42);
    }

    #[test]
    fn test_tracked_total() {
        let raw = json!({
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": []
            }
        });
        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.total(), 42);
    }

    #[test]
    fn test_both_shapes_agree() {
        let bare: SearchResponse =
            serde_json::from_value(json!({ "hits": { "total": 7, "hits": [] } })).unwrap();
        let tracked: SearchResponse =
            serde_json::from_value(json!({ "hits": { "total": { "value": 7 }, "hits": [] } }))
                .unwrap();
        assert_eq!(bare.total(), tracked.total());
    }

    #[test]
    fn test_records_keep_backend_order() {
        let raw = json!({
            "hits": {
                "total": 2,
                "hits": [
                    { "_source": { "vin": "AAA" } },
                    { "_source": { "vin": "BBB" } }
                ]
            }
        });
        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        let records = response.records();
        assert_eq!(records[0]["vin"], "AAA");
        assert_eq!(records[1]["vin"], "BBB");
    }

    #[test]
    fn test_request_body_shape() {
        let request = SearchRequest {
            query: json!({ "match_all": {} }),
            from: 40,
            size: 20,
            sort: json!([{ "vin": "asc" }]),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "query": { "match_all": {} },
                "from": 40,
                "size": 20,
                "sort": [{ "vin": "asc" }],
            })
        );
    }
}
