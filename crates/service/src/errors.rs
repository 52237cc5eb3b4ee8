use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Message suitable for showing to the end user, without the error-kind prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Model(models::errors::ModelError::Validation(msg)) => msg.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn user_message_strips_kind_prefix() {
        let e = ServiceError::not_found("Warehouse");
        assert_eq!(e.to_string(), "not found: Warehouse not found");
        assert_eq!(e.user_message(), "Warehouse not found");
        assert!(e.is_not_found());

        let e: ServiceError = ModelError::Validation("Capacity must be greater than 0".into()).into();
        assert_eq!(e.user_message(), "Capacity must be greater than 0");
        assert!(!e.is_not_found());
    }
}
