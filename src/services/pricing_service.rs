//! Cálculo de precios de alquiler
//!
//! Función pura: tarifa diaria × número de días del rango.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

/// Número de días facturables entre dos fechas.
///
/// Un rango vacío o invertido es un error de validación, nunca un precio cero.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
    let days = (end - start).num_days();
    if days <= 0 {
        return Err(AppError::Validation(format!(
            "rent_end_date ({}) must be after rent_start_date ({})",
            end, start
        )));
    }
    Ok(days)
}

/// `días × tarifa diaria`
pub fn calculate_total_price(
    daily_rate: Decimal,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Decimal> {
    if daily_rate <= Decimal::ZERO {
        return Err(AppError::Validation(
            "daily_rent_price must be positive".to_string(),
        ));
    }

    let days = rental_days(start, end)?;
    daily_rate
        .checked_mul(Decimal::from(days))
        .ok_or_else(|| AppError::Validation("total price overflows".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + chrono::Duration::days(offset)
    }

    #[test]
    fn test_three_days_at_fifty() {
        let price = calculate_total_price(Decimal::from(50), day(0), day(3)).unwrap();
        assert_eq!(price, Decimal::from(150));
    }

    #[test]
    fn test_same_day_is_validation_error() {
        let result = calculate_total_price(Decimal::from(50), day(0), day(0));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_inverted_range_is_validation_error() {
        let result = calculate_total_price(Decimal::from(50), day(5), day(2));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_fractional_rate_keeps_precision() {
        let price = calculate_total_price(Decimal::new(4999, 2), day(0), day(2)).unwrap();
        assert_eq!(price, Decimal::new(9998, 2));
    }

    #[test]
    fn test_range_across_month_boundary() {
        let start = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(rental_days(start, end).unwrap(), 3);
    }

    #[test]
    fn test_non_positive_rate_is_rejected() {
        let result = calculate_total_price(Decimal::ZERO, day(0), day(1));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
