pub mod booking_controller;
pub mod vehicle_controller;
