use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::{NewVehicle, Vehicle, VehiclePatch};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;
        let new_vehicle = NewVehicle::from(request);

        // Verificar que la matrícula no exista
        if self
            .repository
            .registration_exists(&new_vehicle.registration_number)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Registration number '{}' is already registered",
                new_vehicle.registration_number
            )));
        }

        let vehicle = self.repository.create(&new_vehicle).await?;
        tracing::info!("🚗 Vehículo {} creado ({})", vehicle.id, vehicle.registration_number);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle created successfully",
        ))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Vehicle>>, AppError> {
        let vehicles = self.repository.list_all().await?;

        let message = if vehicles.is_empty() {
            "No vehicles found"
        } else {
            "Vehicles retrieved successfully"
        };

        Ok(ApiResponse::success_with_message(vehicles, message))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle retrieved successfully",
        ))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let patch = VehiclePatch::from(request);
        if patch.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let vehicle = self
            .repository
            .update(id, &patch)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle updated successfully",
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete_unbooked(id).await? {
            return Err(not_found_error("Vehicle", id));
        }

        tracing::info!("🗑️ Vehículo {} eliminado", id);
        Ok(ApiResponse::message_only("Vehicle deleted successfully"))
    }
}
