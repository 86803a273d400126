pub mod api_response;
pub mod booking_dto;
pub mod vehicle_dto;
