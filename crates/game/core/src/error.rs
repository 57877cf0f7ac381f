//! Common error infrastructure for delve-core.
//!
//! This module provides shared types and traits used across all error types in delve-core.
//! Domain-specific errors (e.g., [`OracleError`](crate::env::OracleError),
//! [`ConfigurationError`](crate::engine::ConfigurationError)) are defined in their
//! respective modules alongside the code that raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure family has its own error type with specific variants
//! - **Rich Context**: Errors carry dungeon, floor and event cursor for content debugging
//! - **Severity Classification**: Errors are categorized for caller-side handling
//! - **No Retries**: Nothing in the engine retries; severity only informs the caller

/// Severity level of an error, used for categorization and reporting.
///
/// - **Validation**: Invalid caller input that should be rejected without retry
/// - **Fatal**: Broken dungeon or master data; the run cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty party, ally id out of range
    Validation,

    /// Fatal error - content is inconsistent, the run is aborted.
    ///
    /// Examples: dungeon without floors, missing master data id
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the failure points at content rather than caller input.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
///
/// Context is captured at the point of error creation and pins the failure to
/// a position in the run so content authors can find the broken record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Dungeon being explored (if known).
    pub dungeon_id: Option<u32>,

    /// Floor number, 1-based (if known).
    pub floor_number: Option<u32>,

    /// Event index within the floor (if known).
    pub event_index: Option<u32>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates an empty error context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dungeon_id: None,
            floor_number: None,
            event_index: None,
            message: None,
        }
    }

    /// Attaches a dungeon to this context (builder pattern).
    #[must_use]
    pub const fn with_dungeon(mut self, dungeon_id: u32) -> Self {
        self.dungeon_id = Some(dungeon_id);
        self
    }

    /// Attaches a run cursor to this context (builder pattern).
    #[must_use]
    pub const fn with_cursor(mut self, floor_number: u32, event_index: u32) -> Self {
        self.floor_number = Some(floor_number);
        self.event_index = Some(event_index);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all delve-core errors.
///
/// This trait provides a uniform interface for error classification and context
/// retrieval across all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who must fix the problem, caller or content author
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
