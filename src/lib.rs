//! varsync: GitLab CI/CD variable transfer
//!
//! Fetches a project's or group's CI/CD variables into a portable JSON listing and
//! replays such a listing against another project or group:
//!
//! ```text
//! varsync --project old/app export | varsync --project new/app import
//! ```
//!
//! Commands run through a small dispatcher: each operation declares the inputs it
//! needs by name, and a provider registry produces them from the run's scope and
//! the input stream.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod model;
pub mod remote;
