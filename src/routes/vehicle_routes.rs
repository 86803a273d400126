use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Lectura pública; escritura solo para admins
pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_vehicle))
        .route("/:id", put(update_vehicle).delete(delete_vehicle))
        .route_layer(from_fn(admin_only_middleware))
        .route_layer(from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .merge(admin_routes)
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let Path(id) = path?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Path(id) = path?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
