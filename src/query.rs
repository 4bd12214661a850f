//! Filter normalization and query compilation / 筛选参数解析与查询编译
//!
//! Raw query-string parameters become a typed [`VinFilters`] struct, the
//! struct becomes a list of [`Predicate`]s, and the list compiles into the
//! Elasticsearch query document. Parsing is the only fallible step; the
//! predicate build and the compilation are pure.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;

/// Raw parameters of the top-level listing / 全量列表的原始参数
///
/// Everything arrives as an optional string; coercion happens in
/// [`VinFilters::from_query`], never in the handler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVinsQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub year_min: Option<String>,
    pub year_max: Option<String>,
    pub body_class: Option<String>,
    pub mileage_min: Option<String>,
    pub mileage_max: Option<String>,
    pub value_min: Option<String>,
    pub value_max: Option<String>,
    pub vin: Option<String>,
    pub condition_description: Option<String>,
    pub registered_state: Option<String>,
    pub exterior_color: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Raw parameters of the scoped listing / 按车辆列表的原始参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstancesQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// An inclusive numeric range, either bound optional / 含边界的数值区间
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl NumericRange {
    /// 两端都缺省时不生成谓词
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Fully-typed, validated filter set / 校验后的筛选条件
#[derive(Debug, Clone, Default)]
pub struct VinFilters {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub body_class: Option<String>,
    pub vin: Option<String>,
    pub condition_description: Option<String>,
    pub registered_state: Option<String>,
    pub exterior_color: Option<String>,
    pub year: NumericRange,
    pub mileage: NumericRange,
    pub estimated_value: NumericRange,
}

/// Absent and empty both mean "no filter" / 缺省与空串都视为未筛选
fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse one range bound / 解析单个区间边界
fn parse_bound(param: &str, value: &Option<String>) -> Result<Option<i64>, ApiError> {
    match value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::InvalidFilterValue(format!("{} must be an integer", param))),
        None => Ok(None),
    }
}

impl VinFilters {
    /// Coerce raw parameters into typed filters / 把原始参数转为类型化筛选
    pub fn from_query(q: &ListVinsQuery) -> Result<Self, ApiError> {
        Ok(Self {
            manufacturer: present(&q.manufacturer),
            model: present(&q.model),
            body_class: present(&q.body_class),
            vin: present(&q.vin),
            condition_description: present(&q.condition_description),
            registered_state: present(&q.registered_state),
            exterior_color: present(&q.exterior_color),
            year: NumericRange {
                min: parse_bound("yearMin", &q.year_min)?,
                max: parse_bound("yearMax", &q.year_max)?,
            },
            mileage: NumericRange {
                min: parse_bound("mileageMin", &q.mileage_min)?,
                max: parse_bound("mileageMax", &q.mileage_max)?,
            },
            estimated_value: NumericRange {
                min: parse_bound("valueMin", &q.value_min)?,
                max: parse_bound("valueMax", &q.value_max)?,
            },
        })
    }

    /// Build the predicate list / 生成谓词列表
    ///
    /// Substring predicates carry the lower-cased value; range predicates are
    /// emitted only when at least one bound is set.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        let substrings = [
            ("manufacturer", &self.manufacturer),
            ("model", &self.model),
            ("body_class", &self.body_class),
            ("vin", &self.vin),
            ("condition_description", &self.condition_description),
            ("registered_state", &self.registered_state),
            ("exterior_color", &self.exterior_color),
        ];
        for (field, value) in substrings {
            if let Some(value) = value {
                predicates.push(Predicate::Substring {
                    field,
                    value: value.to_lowercase(),
                });
            }
        }

        let ranges = [
            ("year", self.year),
            ("mileage", self.mileage),
            ("estimated_value", self.estimated_value),
        ];
        for (field, range) in ranges {
            if !range.is_unbounded() {
                predicates.push(Predicate::Range {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        predicates
    }
}

/// One compiled filter condition / 单个编译后的筛选条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match on a keyword field / 精确匹配
    Term { field: &'static str, value: String },
    /// Case-insensitive substring match / 不区分大小写的子串匹配
    Substring { field: &'static str, value: String },
    /// Inclusive numeric range, absent bound = unconstrained / 数值区间
    Range {
        field: &'static str,
        min: Option<i64>,
        max: Option<i64>,
    },
}

/// `{kind: {field: body}}` — field names are only known at runtime,
/// so the nesting is built by hand instead of with `json!`.
fn keyed(kind: &str, field: &str, body: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(field.to_string(), body);
    let mut outer = Map::new();
    outer.insert(kind.to_string(), Value::Object(inner));
    Value::Object(outer)
}

impl Predicate {
    /// Compile to one Elasticsearch clause / 编译为单个ES子句
    pub fn to_clause(&self) -> Value {
        match self {
            Predicate::Term { field, value } => keyed("term", field, json!(value)),
            Predicate::Substring { field, value } => keyed(
                "wildcard",
                field,
                json!({
                    "value": format!("*{}*", value),
                    "case_insensitive": true,
                }),
            ),
            Predicate::Range { field, min, max } => {
                let mut bounds = Map::new();
                if let Some(min) = min {
                    bounds.insert("gte".to_string(), json!(min));
                }
                if let Some(max) = max {
                    bounds.insert("lte".to_string(), json!(max));
                }
                keyed("range", field, Value::Object(bounds))
            }
        }
    }
}

/// Compile the predicate list into one boolean query / 编译为布尔查询
///
/// Conjunction only; an empty list matches every document.
pub fn compile(predicates: &[Predicate]) -> Value {
    if predicates.is_empty() {
        return json!({ "match_all": {} });
    }

    let must: Vec<Value> = predicates.iter().map(Predicate::to_clause).collect();
    json!({ "bool": { "must": must } })
}

/// Sort direction / 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Resolved sort of the top-level listing / 全量列表的排序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    /// Fixed sort of the scoped listing, for deterministic pagination
    /// 按车辆列表固定按VIN升序
    pub fn by_vin() -> Self {
        Self {
            field: "vin".to_string(),
            order: SortOrder::Asc,
        }
    }

    /// Resolve sortBy/sortOrder parameters / 解析排序参数
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, ApiError> {
        let field = sort_by
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("vin")
            .to_string();

        let order = match sort_order.map(str::trim).filter(|s| !s.is_empty()) {
            None => SortOrder::Asc,
            Some(raw) if raw.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            Some(raw) if raw.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            Some(raw) => {
                return Err(ApiError::InvalidFilterValue(format!(
                    "sortOrder must be asc or desc, got: {}",
                    raw
                )))
            }
        };

        Ok(Self { field, order })
    }

    /// `[{field: order}]` as the backend expects / 后端期望的排序文档
    pub fn to_value(&self) -> Value {
        let mut entry = Map::new();
        entry.insert(self.field.clone(), json!(self.order.as_str()));
        Value::Array(vec![Value::Object(entry)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_compile_to_match_all() {
        let filters = VinFilters::from_query(&ListVinsQuery::default()).unwrap();
        let predicates = filters.predicates();
        assert!(predicates.is_empty());
        assert_eq!(compile(&predicates), json!({ "match_all": {} }));
    }

    #[test]
    fn test_substring_filter_lowercases_and_wraps() {
        let q = ListVinsQuery {
            manufacturer: Some("Ford".to_string()),
            ..Default::default()
        };
        let predicates = VinFilters::from_query(&q).unwrap().predicates();
        assert_eq!(predicates.len(), 1);

        let compiled = compile(&predicates);
        assert_eq!(
            compiled,
            json!({
                "bool": {
                    "must": [{
                        "wildcard": {
                            "manufacturer": {
                                "value": "*ford*",
                                "case_insensitive": true,
                            }
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_empty_string_emits_no_predicate() {
        let q = ListVinsQuery {
            manufacturer: Some(String::new()),
            model: Some("Mustang".to_string()),
            ..Default::default()
        };
        let predicates = VinFilters::from_query(&q).unwrap().predicates();
        assert_eq!(predicates.len(), 1);
        assert!(matches!(
            &predicates[0],
            Predicate::Substring { field: "model", .. }
        ));
    }

    #[test]
    fn test_range_only_carries_present_bounds() {
        let q = ListVinsQuery {
            year_min: Some("1990".to_string()),
            ..Default::default()
        };
        let predicates = VinFilters::from_query(&q).unwrap().predicates();
        assert_eq!(
            compile(&predicates),
            json!({
                "bool": {
                    "must": [{ "range": { "year": { "gte": 1990 } } }]
                }
            })
        );

        let q = ListVinsQuery {
            mileage_min: Some("1000".to_string()),
            mileage_max: Some("50000".to_string()),
            ..Default::default()
        };
        let predicates = VinFilters::from_query(&q).unwrap().predicates();
        assert_eq!(
            compile(&predicates),
            json!({
                "bool": {
                    "must": [{ "range": { "mileage": { "gte": 1000, "lte": 50000 } } }]
                }
            })
        );
    }

    #[test]
    fn test_zero_bound_is_present() {
        let q = ListVinsQuery {
            value_min: Some("0".to_string()),
            ..Default::default()
        };
        let predicates = VinFilters::from_query(&q).unwrap().predicates();
        assert_eq!(
            compile(&predicates),
            json!({
                "bool": {
                    "must": [{ "range": { "estimated_value": { "gte": 0 } } }]
                }
            })
        );
    }

    #[test]
    fn test_unparsable_bound_is_client_error() {
        let q = ListVinsQuery {
            year_min: Some("nineteen90".to_string()),
            ..Default::default()
        };
        match VinFilters::from_query(&q) {
            Err(ApiError::InvalidFilterValue(msg)) => {
                assert!(msg.contains("yearMin"));
            }
            other => panic!("expected InvalidFilterValue, got {:?}", other),
        }
    }

    #[test]
    fn test_conjunction_keeps_declaration_order() {
        let q = ListVinsQuery {
            manufacturer: Some("ford".to_string()),
            exterior_color: Some("Blue".to_string()),
            year_min: Some("1967".to_string()),
            year_max: Some("1970".to_string()),
            ..Default::default()
        };
        let predicates = VinFilters::from_query(&q).unwrap().predicates();
        assert_eq!(predicates.len(), 3);
        assert!(matches!(
            &predicates[0],
            Predicate::Substring { field: "manufacturer", .. }
        ));
        assert!(matches!(
            &predicates[1],
            Predicate::Substring { field: "exterior_color", value } if value == "blue"
        ));
        assert!(matches!(
            &predicates[2],
            Predicate::Range { field: "year", min: Some(1967), max: Some(1970) }
        ));
    }

    #[test]
    fn test_term_predicate_compiles_to_exact_match() {
        let predicate = Predicate::Term {
            field: "vehicle_id",
            value: "nhtsa-ford-mustang-1967".to_string(),
        };
        assert_eq!(
            predicate.to_clause(),
            json!({ "term": { "vehicle_id": "nhtsa-ford-mustang-1967" } })
        );
    }

    #[test]
    fn test_sort_spec_defaults_and_validation() {
        let sort = SortSpec::resolve(None, None).unwrap();
        assert_eq!(sort, SortSpec::by_vin());
        assert_eq!(sort.to_value(), json!([{ "vin": "asc" }]));

        let sort = SortSpec::resolve(Some("year"), Some("DESC")).unwrap();
        assert_eq!(sort.to_value(), json!([{ "year": "desc" }]));

        assert!(matches!(
            SortSpec::resolve(None, Some("sideways")),
            Err(ApiError::InvalidFilterValue(_))
        ));
    }
}
