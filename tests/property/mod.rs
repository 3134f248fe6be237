//! Property-based tests for the record model

mod round_trip;
