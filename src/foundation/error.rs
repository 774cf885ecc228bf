use crate::schema::validate::SchemaErrors;

/// Convenience result type used across the crate.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by card APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Malformed layout document. Fatal for the card being rendered.
    #[error("validation error: {0}")]
    Validation(SchemaErrors),

    /// Image, icon or font that could not be found or fetched.
    ///
    /// Callers treat this as a soft failure: the affected layer is omitted.
    #[error("resource unavailable: {0}")]
    Resource(String),

    /// A derived shape computation that cannot be carried out for a layer.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value for a single root-level problem.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(SchemaErrors::single(msg))
    }

    /// Build a [`CardError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`CardError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for failures that only omit part of a card.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::Resource(_) | Self::Geometry(_))
    }
}

impl From<SchemaErrors> for CardError {
    fn from(value: SchemaErrors) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
