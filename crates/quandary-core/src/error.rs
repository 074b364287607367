use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Error type for schema declaration, state construction, and model evaluation.
pub enum ModelError {
    #[error("{kind} '{name}' is already registered")]
    SchemaConflict { kind: &'static str, name: String },

    #[error("attribute '{attribute}' has not been declared")]
    UnknownAttribute { attribute: String },

    #[error("object class '{class}' has not been declared")]
    UnknownClass { class: String },

    #[error("enumerated attribute '{attribute}' must declare at least one value")]
    EmptyEnumeration { attribute: String },

    #[error("object of class '{class}' is missing a value for '{attribute}'")]
    MissingField { class: String, attribute: String },

    #[error("class '{class}' does not declare attribute '{attribute}'")]
    UnknownField { class: String, attribute: String },

    #[error("attribute '{attribute}' supplied more than once for class '{class}'")]
    DuplicateField { class: String, attribute: String },

    #[error("attribute '{attribute}' expects {expected}, got {found}")]
    TypeMismatch {
        attribute: String,
        expected: String,
        found: String,
    },

    #[error("attribute '{attribute}' of class '{class}' was read before being set")]
    UnsetAttribute { class: String, attribute: String },

    #[error("state has no object of class '{class}'")]
    MissingObject { class: String },

    #[error("state holds {count} objects of class '{class}'")]
    UnexpectedObjects { class: String, count: usize },

    #[error("unknown action '{action}'")]
    UnknownAction { action: String },

    #[error("invalid probability in {context}: {value}")]
    InvalidProbability { context: String, value: f64 },

    #[error(
        "probabilities for {context} from state {state} must sum to 1.0 within {tolerance}, got {sum}"
    )]
    Normalization {
        context: String,
        state: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("{context} produced an empty distribution")]
    EmptyDistribution { context: String },

    #[error("domain is missing its {component}")]
    MissingComponent { component: &'static str },
}
