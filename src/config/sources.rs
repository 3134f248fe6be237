//! Config sources, lowest precedence first: global file, explicit file, environment.

pub mod environment;
pub mod explicit_file;
pub mod global_file;
