//! Response wire shapes / 响应报文结构

use serde::Serialize;
use serde_json::Value;

use crate::pagination::PageRequest;

/// A VIN document as stored in the index / 索引中的VIN文档
///
/// The service passes fields through unmodified (vin, manufacturer, model,
/// year, body_class, mileage, estimated_value, condition_description,
/// registered_state, exterior_color, vehicle_id, ...), so it stays an opaque
/// JSON document rather than a typed entity.
pub type VinRecord = Value;

/// Pagination metadata of the top-level listing / 全量列表的分页信息
#[derive(Debug, Clone, Serialize)]
pub struct ListPagination {
    pub page: u32,
    pub size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl ListPagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            size: request.size,
            total_pages: request.total_pages(total),
            has_more: request.has_more(total),
        }
    }
}

/// Pagination metadata of the scoped listing / 按车辆列表的分页信息
///
/// Same numbers as [`ListPagination`]; only the size key differs on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct InstancesPagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl InstancesPagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            page_size: request.size,
            total_pages: request.total_pages(total),
            has_more: request.has_more(total),
        }
    }
}

/// `GET /vins` response / 全量列表响应
#[derive(Debug, Clone, Serialize)]
pub struct VinListResponse {
    pub total: u64,
    pub instances: Vec<VinRecord>,
    pub pagination: ListPagination,
}

/// `GET /vehicles/:vehicle_id/instances` response / 按车辆列表响应
#[derive(Debug, Clone, Serialize)]
pub struct VehicleInstancesResponse {
    pub vehicle_id: String,
    /// Total VINs for this vehicle, independent of the requested page
    pub instance_count: u64,
    pub instances: Vec<VinRecord>,
    pub pagination: InstancesPagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_pagination_wire_keys() {
        let request = PageRequest { page: 2, size: 20 };
        let value = serde_json::to_value(ListPagination::new(request, 45)).unwrap();
        assert_eq!(
            value,
            json!({ "page": 2, "size": 20, "totalPages": 3, "hasMore": true })
        );
    }

    #[test]
    fn test_instances_pagination_wire_keys() {
        let request = PageRequest { page: 3, size: 20 };
        let value = serde_json::to_value(InstancesPagination::new(request, 45)).unwrap();
        assert_eq!(
            value,
            json!({ "page": 3, "pageSize": 20, "totalPages": 3, "hasMore": false })
        );
    }
}
