use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    /// A write would have produced a duplicate or out-of-order version
    /// number. Only reachable through a locking bug; the write is refused.
    #[error("version sequence violated for prompt {prompt_id} at version {version_number}")]
    ConcurrencyInvariantViolation { prompt_id: Uuid, version_number: i64 },
}

impl ServiceError {
    pub fn prompt_not_found(prompt_id: Uuid) -> Self {
        Self::NotFound {
            entity: "prompt",
            id: prompt_id.to_string(),
        }
    }

    pub fn version_not_found(version_id: Uuid) -> Self {
        Self::NotFound {
            entity: "version",
            id: version_id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Parses an identifier received from outside the core.
///
/// Empty and malformed ids are validation failures rather than lookups that
/// miss, so callers can tell bad input apart from a missing record.
pub fn parse_id(kind: &str, raw: &str) -> Result<Uuid, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{kind}_id must not be empty")));
    }
    Uuid::parse_str(trimmed)
        .map_err(|_| ServiceError::validation(format!("{kind}_id is not a valid id: {trimmed}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_is_a_validation_error() {
        let err = parse_id("version", "  ").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg == "version_id must not be empty"));
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        let err = parse_id("prompt", "not-a-uuid").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("prompt", &id.to_string()).unwrap(), id);
    }
}
