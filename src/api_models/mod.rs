pub mod copy_rates;
pub mod rate;
pub mod room_type;
