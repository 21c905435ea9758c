/// Convenience result type used across motionset.
pub type MotionsetResult<T> = Result<T, MotionsetError>;

/// Top-level error taxonomy used by dataset APIs.
#[derive(thiserror::Error, Debug)]
pub enum MotionsetError {
    /// Invalid renderer or dataset configuration. Raised at construction
    /// time only; configuration validation is input-independent.
    #[error("config error: {0}")]
    Config(String),

    /// A scene tag record failed to parse, or the tag file does not line up
    /// with the scene path list. No partial dataset is produced.
    #[error("malformed tag record: {0}")]
    MalformedTagRecord(String),

    /// A scene file could not be decoded. Aborts the whole iteration.
    #[error("corrupt scene: {0}")]
    CorruptScene(String),

    /// A caller-supplied predicate failed. Predicates are assumed total and
    /// pure; a failure aborts iteration.
    #[error("predicate error: {0}")]
    Predicate(String),

    /// The feature producer violated its contract or reported a failure.
    #[error("feature producer error: {0}")]
    Producer(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionsetError {
    /// Build a [`MotionsetError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MotionsetError::MalformedTagRecord`] value.
    pub fn malformed_tag_record(msg: impl Into<String>) -> Self {
        Self::MalformedTagRecord(msg.into())
    }

    /// Build a [`MotionsetError::CorruptScene`] value.
    pub fn corrupt_scene(msg: impl Into<String>) -> Self {
        Self::CorruptScene(msg.into())
    }

    /// Build a [`MotionsetError::Predicate`] value.
    pub fn predicate(msg: impl Into<String>) -> Self {
        Self::Predicate(msg.into())
    }

    /// Build a [`MotionsetError::Producer`] value.
    pub fn producer(msg: impl Into<String>) -> Self {
        Self::Producer(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
