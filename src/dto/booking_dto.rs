use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Si falta se usa el usuario autenticado
    #[validate(range(min = 1))]
    pub customer_id: Option<i32>,

    #[validate(range(min = 1))]
    pub vehicle_id: i32,

    pub rent_start_date: NaiveDate,

    pub rent_end_date: NaiveDate,
}

// Request para cambiar el estado de una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingStatusRequest {
    #[validate(length(min = 1, max = 20))]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_parses_iso_dates() {
        let request: CreateBookingRequest = serde_json::from_str(
            r#"{"vehicle_id": 3, "rent_start_date": "2025-01-10", "rent_end_date": "2025-01-15"}"#,
        )
        .unwrap();
        assert!(request.customer_id.is_none());
        assert_eq!(request.rent_start_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_non_positive_ids() {
        let request: CreateBookingRequest = serde_json::from_str(
            r#"{"customer_id": 0, "vehicle_id": 3, "rent_start_date": "2025-01-10", "rent_end_date": "2025-01-15"}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }
}
