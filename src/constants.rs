/// Maximum request body the admin gate will buffer while looking for a token (1MB)
pub const MAX_GATED_BODY_BYTES: usize = 1_048_576;

/// Name of the body field and query parameter that may carry a token
pub const TOKEN_FIELD: &str = "token";

// =============================================================================
// Error Messages
// =============================================================================

/// No token found in body, query or Authorization header
pub const ERR_MISSING_TOKEN: &str = "You must be authorized to hit this endpoint.";

/// Token failed signature or expiry verification
pub const ERR_INVALID_TOKEN: &str = "Invalid token.";

/// Token verified but does not carry the admin claim
pub const ERR_NOT_ADMIN: &str = "Invalid request credentials";

/// Build the "missing property" message for resource payloads
pub fn missing_property(field: &str) -> String {
    format!("You are missing the {} property.", field)
}

/// Build the update/delete miss message
pub fn no_resource(id: i64) -> String {
    format!("No resource with an id of {} was found.", id)
}
