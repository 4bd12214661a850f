//! VIN listing handlers / VIN列表接口
//!
//! Thin glue over [`VinService`]: extract raw parameters, delegate, let
//! [`ApiError`] render the contract bodies.

use axum::extract::{Path, Query, State};
use axum::Json;
use std::sync::Arc;

use vins_api::error::ApiError;
use vins_api::models::{VehicleInstancesResponse, VinListResponse};
use vins_api::query::{InstancesQuery, ListVinsQuery};

use crate::state::AppState;

/// GET /api/vins/v1/vins
///
/// Query parameters:
///   - page: Page number (1-indexed, default: 1)
///   - size: Results per page (default: 20, max: 100)
///   - manufacturer / model / bodyClass / vin / conditionDescription /
///     registeredState / exteriorColor: case-insensitive substring filters
///   - yearMin / yearMax / mileageMin / mileageMax / valueMin / valueMax:
///     inclusive numeric bounds
///   - sortBy: Field to sort by (default: vin)
///   - sortOrder: asc/desc (default: asc)
pub async fn list_vins(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListVinsQuery>,
) -> Result<Json<VinListResponse>, ApiError> {
    Ok(Json(state.vins.list_vins(&q).await?))
}

/// GET /api/vins/v1/vehicles/:vehicle_id/instances
///
/// Path parameters:
///   - vehicle_id: Vehicle specification ID (e.g. nhtsa-ford-mustang-1967)
///
/// Query parameters:
///   - page: Page number (1-indexed, default: 1)
///   - pageSize: Results per page (default: 20, max: 100)
///
/// 404 when the vehicle has no VIN instances at all.
pub async fn vehicle_instances(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
    Query(q): Query<InstancesQuery>,
) -> Result<Json<VehicleInstancesResponse>, ApiError> {
    Ok(Json(state.vins.vehicle_instances(&vehicle_id, &q).await?))
}
