use isograph_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using IsographError
pub type Result<T> = std::result::Result<T, IsographError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every `IsographError` is classified into one of these kinds. Each kind maps
/// to a stable `ERR_*` code used in log events and by callers that need to
/// branch on the failure class without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Registration
    NoDefaultVocabulary,
    AlreadyDefined,
    UnknownModelType,

    // Cross-store access
    TypeMismatch,
    NotFound,
    NoMethod,
    NoAssociationTarget,

    // Input
    InvalidInput,
    InvalidConfig,

    // Persistence / IO
    Persistence,
    Migration,
    ChecksumMismatch,
    Serialization,
    Io,

    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NoDefaultVocabulary => "ERR_NO_DEFAULT_VOCABULARY",
            ExErrorKind::AlreadyDefined => "ERR_ISOMORPHISM_ALREADY_DEFINED",
            ExErrorKind::UnknownModelType => "ERR_UNKNOWN_MODEL_TYPE",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NoMethod => "ERR_NO_METHOD",
            ExErrorKind::NoAssociationTarget => "ERR_NO_ASSOCIATION_TARGET",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::ChecksumMismatch => "ERR_CHECKSUM_MISMATCH",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing layer knew.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Attach the model identity involved (a subject IRI or `Model#id`)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for registration and cross-store access
///
/// Nothing in this crate retries or recovers: every variant reaches the
/// caller as it was raised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsographError {
    // ===== Registration =====
    /// The graph class has no default vocabulary to mint the foreign-key predicate from
    #[error("A default vocabulary must be set. (graph class {graph_class})")]
    NoDefaultVocabulary { graph_class: String },

    /// The foreign-key property (or reverse accessor) is already taken
    #[error("An isomorphism with {relational} has already been established or the property {property} is already in use.")]
    IsomorphismAlreadyDefined { relational: String, property: String },

    /// A model symbol did not resolve in the registry
    #[error("Cannot convert :{symbol} to a valid model class")]
    UnknownModelType { symbol: String },

    /// A class with this name was registered twice
    #[error("Model class {name} is already registered")]
    DuplicateModel { name: String },

    // ===== Cross-store access =====
    /// A cross-store setter received a model of the wrong type
    #[error("Expected a model of type {expected}, but was of type {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Primary-key lookup found nothing (raised by relational stores)
    #[error("Couldn't find {model} with 'id'={id}")]
    RecordNotFound { model: String, id: i64 },

    /// Accessor or attribute is not installed on the model's class
    #[error("undefined method `{method}' for {model}")]
    NoMethod { model: String, method: String },

    /// Delegated attribute access through a link that is currently null
    #[error("cannot delegate `{attribute}' on {model}: `{role}' is nil")]
    NoAssociationTarget {
        model: String,
        role: String,
        attribute: String,
    },

    /// Attribute is not part of the class schema
    #[error("Unknown attribute {attribute} for {model}")]
    UnknownAttribute { model: String, attribute: String },

    /// Value does not fit the declared attribute type
    #[error("Invalid value for {attribute}: expected {expected}, got {actual}")]
    InvalidValue {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// A string could not be used as an IRI
    #[error("Invalid IRI {iri}: {reason}")]
    InvalidIri { iri: String, reason: String },

    /// Schema configuration could not be parsed or applied
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===== Persistence =====
    /// Underlying store failure
    #[error("Persistence error in {op}: {message}")]
    Persistence { op: String, message: String },

    /// A migration failed to apply
    #[error("Migration {migration_id} failed: {reason}")]
    Migration { migration_id: String, reason: String },

    /// An applied migration no longer matches its embedded SQL
    #[error("Checksum mismatch for migration {migration_id}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        migration_id: String,
        expected: String,
        actual: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO error in {op}: {message}")]
    Io { op: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<IsographError> for ExError {
    fn from(err: IsographError) -> Self {
        let message = err.to_string();
        match err {
            IsographError::NoDefaultVocabulary { graph_class } => {
                ExError::new(ExErrorKind::NoDefaultVocabulary)
                    .with_op("define_isomorphism")
                    .with_entity_id(graph_class)
                    .with_message(message)
            }

            IsographError::IsomorphismAlreadyDefined { relational, .. } => {
                ExError::new(ExErrorKind::AlreadyDefined)
                    .with_op("define_isomorphism")
                    .with_entity_id(relational)
                    .with_message(message)
            }

            IsographError::UnknownModelType { symbol } => {
                ExError::new(ExErrorKind::UnknownModelType)
                    .with_entity_id(symbol)
                    .with_message(message)
            }

            IsographError::DuplicateModel { name } => ExError::new(ExErrorKind::AlreadyDefined)
                .with_op("register_model")
                .with_entity_id(name)
                .with_message(message),

            IsographError::TypeMismatch { .. } => {
                ExError::new(ExErrorKind::TypeMismatch).with_message(message)
            }

            IsographError::RecordNotFound { model, id } => ExError::new(ExErrorKind::NotFound)
                .with_op("find")
                .with_entity_id(format!("{}#{}", model, id))
                .with_message(message),

            IsographError::NoMethod { model, .. } => ExError::new(ExErrorKind::NoMethod)
                .with_entity_id(model)
                .with_message(message),

            IsographError::NoAssociationTarget { model, .. } => {
                ExError::new(ExErrorKind::NoAssociationTarget)
                    .with_op("delegate")
                    .with_entity_id(model)
                    .with_message(message)
            }

            IsographError::UnknownAttribute { model, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(model)
                    .with_message(message)
            }

            IsographError::InvalidValue { .. } | IsographError::InvalidIri { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            IsographError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            IsographError::Persistence { op, .. } => ExError::new(ExErrorKind::Persistence)
                .with_op(op)
                .with_message(message),

            IsographError::Migration { migration_id, .. } => ExError::new(ExErrorKind::Migration)
                .with_op("migration")
                .with_entity_id(migration_id)
                .with_message(message),

            IsographError::ChecksumMismatch { migration_id, .. } => {
                ExError::new(ExErrorKind::ChecksumMismatch)
                    .with_op("migration_checksum")
                    .with_entity_id(migration_id)
                    .with_message(message)
            }

            IsographError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            IsographError::Io { op, .. } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_message(message),

            IsographError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for IsographError {
    fn from(err: serde_json::Error) -> Self {
        IsographError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for IsographError {
    fn from(err: toml::de::Error) -> Self {
        IsographError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for IsographError {
    fn from(err: std::io::Error) -> Self {
        IsographError::Io {
            op: "io".to_string(),
            message: err.to_string(),
        }
    }
}
