//! Domain-level constants.
//!
//! These constants define storage naming conventions.

// =============================================================================
// Storage naming
// =============================================================================

/// Suffix appended to the lowercased entity name to form its table name.
///
/// Pluralization is deliberately naive: `Person` becomes `persons`.
pub const TABLE_NAME_SUFFIX: &str = "s";
