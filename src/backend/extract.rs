/**
 * Request Extraction Helpers
 *
 * Identifiers arrive as path segments. A segment that is not a UUID is a
 * malformed request (400), not a missing resource.
 */

use uuid::Uuid;

use crate::backend::error::BackendError;

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid data format. Please try again.";

/// Parse a resource identifier from a path segment
pub fn parse_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        tracing::debug!(id = %raw, "Rejected malformed identifier");
        BackendError::bad_request(INVALID_FORMAT_MESSAGE)
    })
}
