//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. All profiles share a single file.

pub mod file_io;
pub mod profiles;

pub use file_io::{read_json, write_json_atomic};
pub use profiles::ProfileStore;
