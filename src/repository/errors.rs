use thiserror::Error;

/// SQLSTATE raised by PostgreSQL on a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found in database: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid {entity} id '{id}': {source}")]
    InvalidId {
        entity: &'static str,
        id: String,
        #[source]
        source: uuid::Error,
    },

    #[error("reference violation: {0}")]
    ReferenceViolation(String),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn check_reference_violation(err: &sqlx::Error) -> Option<String> {
        if let sqlx::Error::Database(db_err) = err {
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                return Some(db_err.message().to_string());
            }
        }
        None
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match StoreError::check_reference_violation(&err) {
            Some(message) => StoreError::ReferenceViolation(message),
            None => StoreError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sqlx_errors_map_to_database() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = StoreError::not_found("engine", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "engine not found in database: abc");
    }
}
