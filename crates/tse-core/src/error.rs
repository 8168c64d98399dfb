use crate::entity::EntityId;

/// Alias for `Result<T, SaveError>`.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while reading, editing, or writing a save.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// A grid array could not be decoded.
    #[error("cannot parse {field}: {reason}")]
    Parse {
        /// The grid field that failed (`heights`, `moisture`, `water_depths`).
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A required path is absent from the snapshot document.
    #[error("snapshot is missing {0}")]
    MissingField(String),

    /// An entity record does not have the shape the editor expects.
    #[error("entity {id} is malformed: {reason}")]
    InvalidEntity {
        /// The offending entity.
        id: EntityId,
        /// What was missing or mistyped.
        reason: String,
    },

    /// An edit-session action was attempted in a state that does not allow it.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// The attempted action (`commit`, `discard`, `edit`).
        action: &'static str,
        /// The session state at the time.
        state: String,
    },

    /// The requested entity is not held by the index.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// A committed entity is not the one currently selected.
    #[error("edited entity {edited} does not match selection {selected}")]
    IdMismatch {
        /// The id held by the session.
        selected: EntityId,
        /// The id carried by the edited entity.
        edited: EntityId,
    },

    /// A field path does not resolve on the given entity.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A field exists but holds a value of the wrong type.
    #[error("field {path} is not a {expected}")]
    FieldType {
        /// The field path.
        path: String,
        /// The expected JSON type.
        expected: &'static str,
    },

    /// Serializing or deserializing a JSON fragment failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
