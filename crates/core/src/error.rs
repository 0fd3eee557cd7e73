use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller's user id is present but not a usable identifier.
    #[error("Bad user id: {0}")]
    BadUser(DbId),

    /// A tree was referenced that has not finished growing yet.
    #[error("Tree {0} is not completed")]
    NotCompleted(DbId),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reject ids that cannot name a row (BIGSERIAL starts at 1).
pub fn require_positive_id(field: &str, id: Option<DbId>) -> Result<DbId, CoreError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(CoreError::Validation(format!(
            "{field} must be a positive integer, got {id}"
        ))),
        None => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn positive_id_passes() {
        assert_eq!(require_positive_id("placeId", Some(7)).unwrap(), 7);
    }

    #[test]
    fn missing_id_is_rejected() {
        assert_matches!(
            require_positive_id("placeId", None),
            Err(CoreError::Validation(msg)) if msg == "placeId is required"
        );
    }

    #[test]
    fn zero_and_negative_ids_are_rejected() {
        assert_matches!(require_positive_id("storyId", Some(0)), Err(CoreError::Validation(_)));
        assert_matches!(require_positive_id("storyId", Some(-3)), Err(CoreError::Validation(_)));
    }
}
