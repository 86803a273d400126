use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::middleware::auth::auth_middleware;
use crate::models::auth::Principal;
use crate::models::booking::{BookingListItem, BookingWithVehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Todas las rutas de reservas requieren cliente o admin autenticado
pub fn create_booking_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:booking_id", put(update_booking))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<BookingWithVehicle>>), AppError> {
    let Json(request) = payload?;
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(&principal, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<Vec<BookingListItem>>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list(&principal).await?;
    Ok(Json(response))
}

async fn update_booking(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateBookingStatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BookingWithVehicle>>, AppError> {
    let Path(booking_id) = path?;
    let Json(request) = payload?;
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update_status(&principal, booking_id, request).await?;
    Ok(Json(response))
}
