use pagekit_core_types::{RequestId, TraceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using PageKitError
pub type Result<T> = std::result::Result<T, PageKitError>;

/// A single violated rule, addressed by a dotted field path
///
/// Paths are relative to the entity being validated, e.g.
/// `payload.items[2].header` or `components[0].order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (HTTP layer, CLI) can
/// match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PkErrorKind {
    /// Page, version, component or nested item absent
    NotFound,
    /// Payload or invariant violation; carries the full violation list
    ValidationFailed,
    /// id or order collision
    DuplicateKey,
    /// Removal would empty an accordion or a link group
    MinimumCardinalityViolation,
    /// Attempt to change a component's kind after creation
    KindImmutable,
    /// Malformed request that never reached validation (bad JSON, bad flag)
    InvalidInput,

    // Integration
    Serialization,
    Persistence,
    Concurrency,

    // Internal
    Internal,
}

impl PkErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            PkErrorKind::NotFound => "ERR_NOT_FOUND",
            PkErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            PkErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            PkErrorKind::MinimumCardinalityViolation => "ERR_MINIMUM_CARDINALITY",
            PkErrorKind::KindImmutable => "ERR_KIND_IMMUTABLE",
            PkErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            PkErrorKind::Serialization => "ERR_SERIALIZATION",
            PkErrorKind::Persistence => "ERR_PERSISTENCE",
            PkErrorKind::Concurrency => "ERR_CONCURRENCY",
            PkErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Store and engine surface this type. It carries the classification plus
/// enough context (ids, violations) for a caller to render a precise message.
#[derive(Debug, Clone)]
pub struct PkError {
    kind: PkErrorKind,
    op: Option<String>,
    page_id: Option<String>,
    entity_id: Option<String>,
    version_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    violations: Vec<FieldViolation>,
    source: Option<Box<PkError>>,
}

impl PkError {
    /// Create a new error with the specified kind
    pub fn new(kind: PkErrorKind) -> Self {
        Self {
            kind,
            op: None,
            page_id: None,
            entity_id: None,
            version_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            violations: Vec::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add page ID context
    pub fn with_page_id(mut self, id: impl Into<String>) -> Self {
        self.page_id = Some(id.into());
        self
    }

    /// Add entity ID context (component, accordion item, link)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add version ID context
    pub fn with_version_id(mut self, id: impl Into<String>) -> Self {
        self.version_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the violated rules of a failed validation
    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: PkError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> PkErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
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

    /// Violated rules; empty unless kind is `ValidationFailed`
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn source_error(&self) -> Option<&PkError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for PkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(page_id) = &self.page_id {
            write!(f, " (page_id: {})", page_id)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(version_id) = &self.version_id {
            write!(f, " (version_id: {})", version_id)?;
        }
        if !self.violations.is_empty() {
            write!(f, " [{}]", join_violations(&self.violations))?;
        }
        Ok(())
    }
}

impl std::error::Error for PkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for pagekit core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageKitError {
    // ===== Lookup =====
    #[error("Page not found: {page_id}")]
    PageNotFound { page_id: String },

    /// Version absent, or present but owned by a different page
    #[error("Version {version_id} not found for page {page_id}")]
    VersionNotFound { page_id: String, version_id: String },

    #[error("Component {component_id} not found in page {page_id}")]
    ComponentNotFound {
        page_id: String,
        component_id: String,
    },

    #[error("Accordion item {item_id} not found in component {component_id}")]
    AccordionItemNotFound {
        component_id: String,
        item_id: String,
    },

    #[error("Link {link_id} not found in component {component_id}")]
    LinkNotFound {
        component_id: String,
        link_id: String,
    },

    /// Reorder request names ids that are not on the page
    #[error("Unknown component ids in page {page_id}: {ids:?}")]
    UnknownComponentIds { page_id: String, ids: Vec<String> },

    // ===== Validation =====
    /// One or more rules failed; nothing was applied
    #[error("Validation failed for {entity_id}: {}", join_violations(.violations))]
    ValidationFailed {
        entity_id: String,
        violations: Vec<FieldViolation>,
    },

    #[error("Component kind is immutable: {component_id} is {current}, patch requested {requested}")]
    KindImmutable {
        component_id: String,
        current: String,
        requested: String,
    },

    /// Nested operation addressed a component of the wrong kind
    #[error("Component {component_id} is {actual}, expected {expected}")]
    KindMismatch {
        component_id: String,
        expected: String,
        actual: String,
    },

    // ===== Keys =====
    #[error("Duplicate component id {component_id} in page {page_id}")]
    DuplicateComponentId {
        page_id: String,
        component_id: String,
    },

    #[error("Duplicate order {order} in page {page_id}: already held by {holder_id}")]
    DuplicateComponentOrder {
        page_id: String,
        order: u32,
        holder_id: String,
    },

    /// Accordion item or link id collides within its owning component
    #[error("Duplicate item id {item_id} in component {component_id}")]
    DuplicateItemId {
        component_id: String,
        item_id: String,
    },

    // ===== Cardinality =====
    #[error("Cannot remove the last entry of {collection} in component {component_id}")]
    MinimumCardinalityViolation {
        component_id: String,
        collection: String,
    },

    // ===== Generic =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PageKitError {
    /// Canonical kind of this error without building a full `PkError`
    pub fn kind(&self) -> PkErrorKind {
        match self {
            PageKitError::PageNotFound { .. }
            | PageKitError::VersionNotFound { .. }
            | PageKitError::ComponentNotFound { .. }
            | PageKitError::AccordionItemNotFound { .. }
            | PageKitError::LinkNotFound { .. }
            | PageKitError::UnknownComponentIds { .. } => PkErrorKind::NotFound,
            PageKitError::ValidationFailed { .. } | PageKitError::KindMismatch { .. } => {
                PkErrorKind::ValidationFailed
            }
            PageKitError::KindImmutable { .. } => PkErrorKind::KindImmutable,
            PageKitError::DuplicateComponentId { .. }
            | PageKitError::DuplicateComponentOrder { .. }
            | PageKitError::DuplicateItemId { .. } => PkErrorKind::DuplicateKey,
            PageKitError::MinimumCardinalityViolation { .. } => {
                PkErrorKind::MinimumCardinalityViolation
            }
            PageKitError::Serialization { .. } => PkErrorKind::Serialization,
            PageKitError::Internal { .. } => PkErrorKind::Internal,
        }
    }
}

/// Conversion from PageKitError to PkError
///
/// Keeps the structured context (ids, violations) that callers need to
/// render messages, and the domain message as human text.
impl From<PageKitError> for PkError {
    fn from(err: PageKitError) -> Self {
        let base = PkError::new(err.kind()).with_message(err.to_string());
        match err {
            PageKitError::PageNotFound { page_id } => base.with_page_id(page_id),
            PageKitError::VersionNotFound {
                page_id,
                version_id,
            } => base.with_page_id(page_id).with_version_id(version_id),
            PageKitError::ComponentNotFound {
                page_id,
                component_id,
            }
            | PageKitError::DuplicateComponentId {
                page_id,
                component_id,
            } => base.with_page_id(page_id).with_entity_id(component_id),
            PageKitError::AccordionItemNotFound { component_id, .. }
            | PageKitError::DuplicateItemId { component_id, .. }
            | PageKitError::LinkNotFound { component_id, .. } => base.with_entity_id(component_id),
            PageKitError::UnknownComponentIds { page_id, .. } => base.with_page_id(page_id),
            PageKitError::ValidationFailed {
                entity_id,
                violations,
            } => base.with_entity_id(entity_id).with_violations(violations),
            PageKitError::KindImmutable { component_id, .. }
            | PageKitError::KindMismatch { component_id, .. }
            | PageKitError::MinimumCardinalityViolation { component_id, .. } => {
                base.with_entity_id(component_id)
            }
            PageKitError::DuplicateComponentOrder {
                page_id, holder_id, ..
            } => base.with_page_id(page_id).with_entity_id(holder_id),
            PageKitError::Serialization { .. } | PageKitError::Internal { .. } => base,
        }
    }
}

/// Conversion from serde_json::Error to PageKitError
impl From<serde_json::Error> for PageKitError {
    fn from(err: serde_json::Error) -> Self {
        PageKitError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_unique() {
        let kinds = [
            PkErrorKind::NotFound,
            PkErrorKind::ValidationFailed,
            PkErrorKind::DuplicateKey,
            PkErrorKind::MinimumCardinalityViolation,
            PkErrorKind::KindImmutable,
            PkErrorKind::InvalidInput,
            PkErrorKind::Serialization,
            PkErrorKind::Persistence,
            PkErrorKind::Concurrency,
            PkErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_validation_failed_carries_violations() {
        let err = PageKitError::ValidationFailed {
            entity_id: "c1".to_string(),
            violations: vec![
                FieldViolation::new("payload.title", "must not be empty"),
                FieldViolation::new("payload.image.url", "is not a valid URL"),
            ],
        };

        let pk: PkError = err.into();
        assert_eq!(pk.kind(), PkErrorKind::ValidationFailed);
        assert_eq!(pk.entity_id(), Some("c1"));
        assert_eq!(pk.violations().len(), 2);
        assert!(pk.to_string().contains("payload.title: must not be empty"));
    }

    #[test]
    fn test_duplicate_order_maps_to_duplicate_key() {
        let err = PageKitError::DuplicateComponentOrder {
            page_id: "p1".to_string(),
            order: 2,
            holder_id: "c2".to_string(),
        };
        let pk = PkError::from(err);
        assert_eq!(pk.code(), "ERR_DUPLICATE_KEY");
        assert_eq!(pk.page_id(), Some("p1"));
        assert_eq!(pk.entity_id(), Some("c2"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error;

        let inner = PkError::new(PkErrorKind::Persistence).with_message("disk full");
        let outer = PkError::new(PkErrorKind::Internal).with_source(inner);
        assert!(outer.source().is_some());
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(PkErrorKind::Persistence)
        );
    }
}
