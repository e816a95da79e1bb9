pub mod rate_reader;
pub mod rate_writer;
pub mod room_types;
