//! Auto-Advancing Presenter - Image carousel.
//!
//! Holds a cyclic cursor over a sequence of display items and advances it
//! by one position modulo the length on a fixed interval. Manual selection
//! via [`Carousel::go_to`] overrides the cursor immediately but does NOT
//! reschedule the interval: the next automatic advance still fires on the
//! original cadence. (The media variant deliberately differs - its
//! watchdog is rescheduled on every cursor change.)
//!
//! Layering is exposed through [`Carousel::visuals`]: the active item is
//! opaque and top-most, every other item transparent and below. The
//! opacity/scale transition between those values is the host renderer's
//! business.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::components::types::{slide_visuals, Cleanup, PropValue, SlideVisual};
use crate::state::timers::{self, TimerHandle};

// =============================================================================
// Props
// =============================================================================

/// Configuration for [`carousel`].
pub struct CarouselProps {
    /// Display items (image URLs). Empty sequence degrades to a static
    /// fallback with no cursor timer.
    pub images: PropValue<Vec<String>>,
    /// Units between automatic advances (default 5000).
    pub auto_play_interval: PropValue<u64>,
}

impl Default for CarouselProps {
    fn default() -> Self {
        Self {
            images: PropValue::Static(Vec::new()),
            auto_play_interval: PropValue::Static(5000),
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Handle returned by [`carousel`].
pub struct Carousel {
    /// Index of the active item. Always in `[0, len - 1]` for non-empty
    /// sequences.
    pub current: Signal<usize>,
    count: Signal<usize>,
    timer: Rc<RefCell<Option<TimerHandle>>>,
    stop_config: Option<Cleanup>,
    stop_clamp: Option<Cleanup>,
}

impl Carousel {
    /// Jump to an item immediately. Out-of-range indices are ignored.
    ///
    /// The auto-advance interval is not reset; it keeps firing on its
    /// original schedule.
    pub fn go_to(&self, index: usize) {
        if index < self.count.get() {
            self.current.set(index);
        }
    }

    /// Number of items in the current sequence.
    pub fn len(&self) -> usize {
        self.count.get()
    }

    pub fn is_empty(&self) -> bool {
        self.count.get() == 0
    }

    /// Per-item layering for the current cursor position.
    pub fn visuals(&self) -> Vec<SlideVisual> {
        slide_visuals(self.count.get(), self.current.get())
    }

    /// Tear down: stops the config effect and cancels the interval.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_config.take() {
            stop();
        }
        if let Some(stop) = self.stop_clamp.take() {
            stop();
        }
        if let Some(handle) = self.timer.borrow_mut().take() {
            handle.cancel();
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount an auto-advancing image presenter.
pub fn carousel(props: CarouselProps) -> Carousel {
    let current = signal(0usize);
    let count = signal(0usize);
    let timer: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

    let CarouselProps {
        images,
        auto_play_interval,
    } = props;

    // Config effect: sequence or cadence changes cancel and recreate the
    // interval. The cursor is deliberately not read here, so cursor moves
    // never reschedule the interval.
    let current_for_effect = current.clone();
    let count_for_effect = count.clone();
    let timer_for_effect = timer.clone();
    let stop_config = effect(move || {
        let len = images.get().len();
        let interval = auto_play_interval.get();

        if let Some(handle) = timer_for_effect.borrow_mut().take() {
            handle.cancel();
        }

        count_for_effect.set(len);
        if len == 0 {
            return;
        }

        let cursor = current_for_effect.clone();
        let handle = timers::set_interval(interval, move || {
            cursor.set((cursor.get() + 1) % len);
        });
        *timer_for_effect.borrow_mut() = Some(handle);
    });

    // Clamp effect: a cursor left out of range by a sequence change snaps
    // back to 0 without touching the interval.
    let current_for_clamp = current.clone();
    let count_for_clamp = count.clone();
    let stop_clamp = effect(move || {
        let len = count_for_clamp.get();
        let cursor = current_for_clamp.get();
        if cursor != 0 && cursor >= len {
            current_for_clamp.set(0);
        }
    });

    Carousel {
        current,
        count,
        timer,
        stop_config: Some(Box::new(stop_config)),
        stop_clamp: Some(Box::new(stop_clamp)),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timers::{advance, pending_timers, reset_timers};

    fn setup() {
        reset_timers();
    }

    fn urls(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("img-{index}.jpg")).collect()
    }

    fn props(count: usize, interval: u64) -> CarouselProps {
        CarouselProps {
            images: PropValue::Static(urls(count)),
            auto_play_interval: PropValue::Static(interval),
        }
    }

    #[test]
    fn test_advances_modulo_length() {
        setup();

        let presenter = carousel(props(3, 5000));
        assert_eq!(presenter.current.get(), 0);

        advance(5000);
        assert_eq!(presenter.current.get(), 1);
        advance(5000);
        assert_eq!(presenter.current.get(), 2);
        advance(5000);
        assert_eq!(presenter.current.get(), 0);

        presenter.unmount();
    }

    #[test]
    fn test_manual_jump_keeps_original_schedule() {
        setup();

        let presenter = carousel(props(4, 5000));
        advance(4000);
        presenter.go_to(2);
        assert_eq!(presenter.current.get(), 2);

        // The interval still fires at t=5000, 1000 units after the jump.
        advance(1000);
        assert_eq!(presenter.current.get(), 3);

        presenter.unmount();
    }

    #[test]
    fn test_out_of_range_jump_is_ignored() {
        setup();

        let presenter = carousel(props(3, 5000));
        presenter.go_to(7);
        assert_eq!(presenter.current.get(), 0);

        presenter.unmount();
    }

    #[test]
    fn test_visual_layering_tracks_cursor() {
        setup();

        let presenter = carousel(props(3, 5000));
        advance(5000);

        let visuals = presenter.visuals();
        assert_eq!(visuals[1], SlideVisual::ACTIVE);
        assert_eq!(visuals[0], SlideVisual::INACTIVE);
        assert_eq!(visuals[2], SlideVisual::INACTIVE);

        presenter.unmount();
    }

    #[test]
    fn test_empty_sequence_is_static() {
        setup();

        let presenter = carousel(CarouselProps::default());
        assert_eq!(pending_timers(), 0);
        assert!(presenter.is_empty());
        assert!(presenter.visuals().is_empty());

        advance(60_000);
        assert_eq!(presenter.current.get(), 0);

        presenter.unmount();
    }

    #[test]
    fn test_sequence_change_clamps_cursor_and_restarts() {
        setup();

        let images = spark_signals::signal(urls(5));
        let presenter = carousel(CarouselProps {
            images: images.clone().into(),
            auto_play_interval: PropValue::Static(5000),
        });

        advance(20_000);
        assert_eq!(presenter.current.get(), 4);

        // Shrinking the sequence below the cursor resets it to 0.
        images.set(urls(2));
        assert_eq!(presenter.current.get(), 0);
        advance(5000);
        assert_eq!(presenter.current.get(), 1);

        presenter.unmount();
    }

    #[test]
    fn test_unmount_cancels_interval() {
        setup();

        let presenter = carousel(props(3, 5000));
        assert_eq!(pending_timers(), 1);

        presenter.unmount();
        assert_eq!(pending_timers(), 0);
    }
}
