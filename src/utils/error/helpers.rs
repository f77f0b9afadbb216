//! Helper functions for creating and classifying errors

use super::types::SecurityError;

impl SecurityError {
    pub fn unknown_entity<S: Into<String>>(message: S) -> Self {
        Self::UnknownEntity(message.into())
    }

    pub fn entity_exists<S: Into<String>>(message: S) -> Self {
        Self::EntityExists(message.into())
    }

    pub fn access_control<S: Into<String>>(message: S) -> Self {
        Self::AccessControl(message.into())
    }

    pub fn data_backend<S: Into<String>>(message: S) -> Self {
        Self::DataBackend(message.into())
    }

    pub fn password_mismatch<S: Into<String>>(message: S) -> Self {
        Self::PasswordMismatch(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn is_unknown_entity(&self) -> bool {
        matches!(self, Self::UnknownEntity(_))
    }

    pub fn is_entity_exists(&self) -> bool {
        matches!(self, Self::EntityExists(_))
    }

    pub fn is_access_control(&self) -> bool {
        matches!(self, Self::AccessControl(_))
    }

    pub fn is_data_backend(&self) -> bool {
        matches!(self, Self::DataBackend(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Stable machine-readable code, used in audit logs and CLI exit output
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "UNKNOWN_ENTITY",
            Self::EntityExists(_) => "ENTITY_EXISTS",
            Self::AccessControl(_) => "ACCESS_CONTROL",
            Self::DataBackend(_) => "DATA_BACKEND",
            Self::PasswordMismatch(_) => "PASSWORD_MISMATCH",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Crypto(_) => "CRYPTO_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Yaml(_) => "YAML_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
