//! Component types - Props, cleanup, and shared visual values.
//!
//! Props support static values, signals, and getters for reactivity.
//! Components return handle structs that own their timers and effects;
//! every handle exposes `unmount()` and also cleans up on Drop.

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::{Attr, Rgba};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by component internals.
///
/// Call this to tear down effects and release timers.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Selection callback carrying the selected item's name.
///
/// Rc<dyn Fn> so callbacks can be cloned into closures without ownership
/// issues - the standard pattern for event callbacks captured in closures.
pub type SelectCallback = Rc<dyn Fn(&str)>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// This enables reactive props while maintaining type safety. Components
/// read governing props inside their config effect, so a `Signal` or
/// `Getter` prop re-runs the effect - cancelling and recreating the
/// component's timers - whenever it changes.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(value) => value.clone(),
            PropValue::Signal(signal) => signal.get(),
            PropValue::Getter(getter) => getter(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Text Style - Styling hook
// =============================================================================

/// Styling hook for text output: foreground color plus attribute flags.
///
/// Purely presentational; never consulted by the state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub fg: Option<Rgba>,
    pub attrs: Attr,
}

impl TextStyle {
    pub const fn new(fg: Rgba, attrs: Attr) -> Self {
        Self {
            fg: Some(fg),
            attrs,
        }
    }
}

// =============================================================================
// Slide Visual - Per-item layering
// =============================================================================

/// Presentational layering for one item in a rotating sequence.
///
/// The active item is fully opaque and top-most; every other item is
/// transparent and below. Transitions between these values are the host
/// renderer's business, not the state machine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideVisual {
    /// 0-255, 255 = fully opaque.
    pub opacity: u8,
    pub z_index: i32,
}

impl SlideVisual {
    pub const ACTIVE: Self = Self {
        opacity: 255,
        z_index: 10,
    };

    pub const INACTIVE: Self = Self {
        opacity: 0,
        z_index: 0,
    };
}

/// Layering for a sequence of `count` items with the cursor at `current`.
pub fn slide_visuals(count: usize, current: usize) -> Vec<SlideVisual> {
    (0..count)
        .map(|index| {
            if index == current {
                SlideVisual::ACTIVE
            } else {
                SlideVisual::INACTIVE
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_prop_value_variants() {
        let fixed: PropValue<u64> = 150u64.into();
        assert_eq!(fixed.get(), 150);

        let reactive = signal(1u64);
        let prop: PropValue<u64> = reactive.clone().into();
        assert_eq!(prop.get(), 1);
        reactive.set(2);
        assert_eq!(prop.get(), 2);

        let computed = PropValue::Getter(Rc::new(|| 7u64));
        assert_eq!(computed.get(), 7);
    }

    #[test]
    fn test_slide_visuals_layering() {
        let visuals = slide_visuals(3, 1);
        assert_eq!(visuals[0], SlideVisual::INACTIVE);
        assert_eq!(visuals[1], SlideVisual::ACTIVE);
        assert_eq!(visuals[2], SlideVisual::INACTIVE);
    }

    #[test]
    fn test_slide_visuals_empty_sequence() {
        assert!(slide_visuals(0, 0).is_empty());
    }
}
