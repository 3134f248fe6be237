//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{TransferError, WiringError};

/// Map domain/service errors to a string for CLI output, with a hint line when
/// there is an obvious fix.
pub fn map_error(e: &TransferError) -> String {
    match hint(e) {
        Some(hint) => format!("error: {}\nhint: {}", e, hint),
        None => format!("error: {}", e),
    }
}

fn hint(e: &TransferError) -> Option<&'static str> {
    match e {
        TransferError::Validation { field, .. } => match field.as_str() {
            "token" => Some("pass --token or set VARSYNC_GITLAB__TOKEN"),
            "base_url" => Some("pass --url or set VARSYNC_GITLAB__BASE_URL"),
            "group" | "group/project" => Some("pass --group or set VARSYNC_GITLAB__GROUP"),
            "stdin" => Some("pipe a listing in, e.g. varsync export | varsync import"),
            _ => None,
        },
        TransferError::Remote { status: 401, .. } => Some("check that the token is valid"),
        TransferError::Remote { status: 403, .. } => {
            Some("the token needs Maintainer access to read or write CI/CD variables")
        }
        TransferError::Remote { status: 404, .. } => Some("check the project or group path"),
        TransferError::Wiring(WiringError::MissingProvider(_)) => {
            Some("this is a bug: an operation requires an input nothing provides")
        }
        _ => None,
    }
}
