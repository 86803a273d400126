//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Van,
    #[sqlx(rename = "SUV")]
    #[serde(rename = "SUV")]
    Suv,
}

/// Disponibilidad del vehículo - mapea al ENUM availability_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "availability_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Booked,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Booked => "booked",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub vehicle_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lo que el motor de reservas necesita leer de un vehículo
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct VehicleAvailability {
    pub id: i32,
    pub vehicle_name: String,
    pub daily_rent_price: Decimal,
    pub availability_status: AvailabilityStatus,
}

impl VehicleAvailability {
    pub fn is_available(&self) -> bool {
        self.availability_status == AvailabilityStatus::Available
    }
}

/// Datos para registrar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
}

/// Cambios parciales de un vehículo: solo cambian los campos presentes.
///
/// No incluye la disponibilidad: ese campo solo lo escribe el motor de reservas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub vehicle_name: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub registration_number: Option<String>,
    pub daily_rent_price: Option<Decimal>,
}

impl VehiclePatch {
    pub fn is_empty(&self) -> bool {
        self.vehicle_name.is_none()
            && self.vehicle_type.is_none()
            && self.registration_number.is_none()
            && self.daily_rent_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_uses_original_labels() {
        assert_eq!(serde_json::to_string(&VehicleType::Suv).unwrap(), "\"SUV\"");
        assert_eq!(serde_json::to_string(&VehicleType::Van).unwrap(), "\"van\"");
        let parsed: VehicleType = serde_json::from_str("\"bike\"").unwrap();
        assert_eq!(parsed, VehicleType::Bike);
    }

    #[test]
    fn test_empty_patch() {
        assert!(VehiclePatch::default().is_empty());
        let patch = VehiclePatch {
            daily_rent_price: Some(Decimal::new(4500, 2)),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
