//! Query executor / 查询执行器
//!
//! Orchestrates parameter validation, query compilation and result
//! normalization against the live index. This is the only layer that talks
//! to the backend and the only place backend failures are mapped to API
//! errors.

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{
    InstancesPagination, ListPagination, VehicleInstancesResponse, VinListResponse,
};
use crate::pagination::PageRequest;
use crate::query::{compile, InstancesQuery, ListVinsQuery, Predicate, SortSpec, VinFilters};
use crate::search::{SearchBackend, SearchRequest};

/// Read-only query service over the VIN index / VIN索引的只读查询服务
#[derive(Clone)]
pub struct VinService {
    backend: Arc<dyn SearchBackend>,
    index: String,
}

impl VinService {
    pub fn new(backend: Arc<dyn SearchBackend>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
        }
    }

    /// Top-level listing: filterable, sortable, pageable / 全量列表
    ///
    /// Zero matches is a valid empty page here; with no identifier scoping
    /// there is nothing exceptional about finding nothing.
    pub async fn list_vins(&self, q: &ListVinsQuery) -> Result<VinListResponse, ApiError> {
        let page = PageRequest::resolve(q.page.as_deref(), q.size.as_deref(), "size")?;
        let sort = SortSpec::resolve(q.sort_by.as_deref(), q.sort_order.as_deref())?;
        let filters = VinFilters::from_query(q)?;

        let request = SearchRequest {
            query: compile(&filters.predicates()),
            from: page.offset(),
            size: page.size,
            sort: sort.to_value(),
        };

        let response = self.backend.search(&self.index, &request).await?;
        let total = response.total();

        Ok(VinListResponse {
            total,
            instances: response.records(),
            pagination: ListPagination::new(page, total),
        })
    }

    /// Scoped listing: all VINs of one vehicle specification / 按车辆列表
    ///
    /// Sorted by VIN ascending, always, so pages stay stable between
    /// requests. Zero matches is a 404: for a known-shaped identifier the
    /// absence of any VIN is a client-facing miss, not an empty page.
    pub async fn vehicle_instances(
        &self,
        vehicle_id: &str,
        q: &InstancesQuery,
    ) -> Result<VehicleInstancesResponse, ApiError> {
        let page = PageRequest::resolve(q.page.as_deref(), q.page_size.as_deref(), "pageSize")?;

        let predicate = Predicate::Term {
            field: "vehicle_id",
            value: vehicle_id.to_string(),
        };

        let request = SearchRequest {
            query: predicate.to_clause(),
            from: page.offset(),
            size: page.size,
            sort: SortSpec::by_vin().to_value(),
        };

        let response = self.backend.search(&self.index, &request).await?;
        let total = response.total();

        if total == 0 {
            return Err(ApiError::NotFound(vehicle_id.to_string()));
        }

        Ok(VehicleInstancesResponse {
            vehicle_id: vehicle_id.to_string(),
            instance_count: total,
            instances: response.records(),
            pagination: InstancesPagination::new(page, total),
        })
    }
}
