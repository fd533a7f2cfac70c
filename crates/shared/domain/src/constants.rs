//! Domain-level constants.
//!
//! These constants define the fixed data the service starts with.

// =============================================================================
// Seed Data
// =============================================================================

/// Users inserted on every startup, as `(login, first_name, last_name)`.
///
/// Names are stored exactly as written here, accents included.
pub const SEED_USERS: [(&str, &str, &str); 4] = [
    ("smaldini", "Stéphane", "Maldini"),
    ("sdeleuze", "Sébastien", "Deleuze"),
    ("jlong", "Joshua", "Long"),
    ("bclozel", "Brian", "Clozel"),
];
