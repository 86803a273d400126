use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::vehicle::{NewVehicle, VehiclePatch, VehicleType};

fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("positive_price"));
    }
    Ok(())
}

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 200))]
    pub vehicle_name: String,

    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    #[validate(length(min = 1, max = 50))]
    pub registration_number: String,

    #[validate(custom = "validate_positive_price")]
    pub daily_rent_price: Decimal,
}

// Request para actualizar un vehículo: solo cambian los campos enviados
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 200))]
    pub vehicle_name: Option<String>,

    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,

    #[validate(length(min = 1, max = 50))]
    pub registration_number: Option<String>,

    #[validate(custom = "validate_positive_price")]
    pub daily_rent_price: Option<Decimal>,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            vehicle_name: request.vehicle_name.trim().to_string(),
            vehicle_type: request.vehicle_type,
            registration_number: request.registration_number.trim().to_string(),
            daily_rent_price: request.daily_rent_price,
        }
    }
}

impl From<UpdateVehicleRequest> for VehiclePatch {
    fn from(request: UpdateVehicleRequest) -> Self {
        Self {
            vehicle_name: request.vehicle_name.map(|n| n.trim().to_string()),
            vehicle_type: request.vehicle_type,
            registration_number: request.registration_number.map(|r| r.trim().to_string()),
            daily_rent_price: request.daily_rent_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_fails_validation() {
        let request: CreateVehicleRequest = serde_json::from_str(
            r#"{"vehicle_name": "Civic", "type": "car", "registration_number": "XY-1", "daily_rent_price": "-5"}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_partial_update_only_fills_sent_fields() {
        let request: UpdateVehicleRequest =
            serde_json::from_str(r#"{"daily_rent_price": "75.50"}"#).unwrap();
        assert!(request.validate().is_ok());

        let patch = VehiclePatch::from(request);
        assert_eq!(patch.daily_rent_price, Some(Decimal::new(7550, 2)));
        assert!(patch.vehicle_name.is_none());
        assert!(patch.vehicle_type.is_none());
    }

    #[test]
    fn test_availability_is_not_part_of_the_update() {
        let request: UpdateVehicleRequest =
            serde_json::from_str(r#"{"availability_status": "available"}"#).unwrap();
        assert!(VehiclePatch::from(request).is_empty());
    }
}
