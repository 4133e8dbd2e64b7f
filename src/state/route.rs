//! Route State - Location fragment for deep-linking.
//!
//! The one external input the presentation layer reads: a location fragment
//! ("#formulacion-y-evaluacion") captured at startup, used by the showcase
//! to preselect a tab. Stored as a signal so late consumers still see it.
//!
//! # API
//!
//! - `set_fragment(raw)` - Record the fragment (leading '#' stripped)
//! - `fragment()` - Current fragment, if any
//! - `title_slug(title)` - Normalize a tab title for fragment matching
//! - `reset_route_state()` - Clear (for testing)

use spark_signals::{signal, Signal};

thread_local! {
    static FRAGMENT: Signal<Option<String>> = signal(None);
}

/// Record the location fragment. A leading `#` is stripped; an empty
/// fragment clears the stored value.
pub fn set_fragment(raw: &str) {
    let trimmed = raw.trim_start_matches('#');
    let value = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    };
    FRAGMENT.with(|fragment| fragment.set(value));
}

/// The current fragment, if one was recorded.
pub fn fragment() -> Option<String> {
    FRAGMENT.with(|fragment| fragment.get())
}

/// Normalize a tab title to its fragment form: lowercased, spaces replaced
/// with hyphens. `"Extensión y Capacitación"` becomes
/// `"extensión-y-capacitación"`.
pub fn title_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Reset route state (for testing).
pub fn reset_route_state() {
    FRAGMENT.with(|fragment| fragment.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_route_state();
    }

    #[test]
    fn test_fragment_strips_hash() {
        setup();

        set_fragment("#proveedores");
        assert_eq!(fragment().as_deref(), Some("proveedores"));
    }

    #[test]
    fn test_empty_fragment_clears() {
        setup();

        set_fragment("#proveedores");
        set_fragment("#");
        assert_eq!(fragment(), None);
    }

    #[test]
    fn test_title_slug_normalizes_case_and_spaces() {
        setup();

        assert_eq!(title_slug("Extension y Capacitacion"), "extension-y-capacitacion");
        assert_eq!(title_slug("Proveedores"), "proveedores");
    }
}
