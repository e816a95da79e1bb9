pub mod copy_rates;
pub mod error;
pub mod rates;
pub mod request;
pub mod room_types;
