pub mod aggregate_service;
pub mod calendar_service;
pub mod trade_service;
