//! Timer Service - Single-threaded cooperative timers on a virtual clock.
//!
//! Every animated component schedules its work here instead of spawning
//! threads. The host loop owns real time and feeds it in via [`advance`];
//! due callbacks run synchronously, in (deadline, registration) order, with
//! the clock set to each callback's own deadline while it runs.
//!
//! Handles returned by [`set_timeout`] / [`set_interval`] must be cancelled
//! by whoever scheduled them: before re-scheduling the same logical timer,
//! and unconditionally on component teardown. Nothing is cancelled
//! implicitly.
//!
//! # API
//!
//! - `set_timeout(delay, fn)` - One-shot timer, returns a [`TimerHandle`]
//! - `set_interval(period, fn)` - Repeating timer
//! - `advance(elapsed)` - Move the clock forward and run due callbacks
//! - `now()` - Current virtual time
//! - `pending_timers()` - Number of scheduled timers
//! - `reset_timers()` - Clear everything (for testing)
//!
//! # Example
//!
//! ```ignore
//! use vitrina::state::timers;
//!
//! let handle = timers::set_timeout(500, || println!("fired"));
//!
//! timers::advance(499); // nothing yet
//! timers::advance(1);   // prints "fired"
//!
//! // A handle that may still be pending must be cancelled on teardown:
//! let ticker = timers::set_interval(1000, || println!("tick"));
//! ticker.cancel();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

// =============================================================================
// TYPES
// =============================================================================

/// Handle to a scheduled timer.
///
/// Cancelling consumes the handle; a fired one-shot timer makes cancel a
/// no-op. Handles are not Clone: exactly one owner is responsible for the
/// timer's lifetime.
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
}

impl TimerHandle {
    /// Cancel the timer. Safe to call after a one-shot has already fired.
    pub fn cancel(self) {
        TIMERS.with(|timers| {
            timers.borrow_mut().retain(|entry| entry.id != self.id);
        });
    }

    /// Whether the timer is still scheduled.
    pub fn is_active(&self) -> bool {
        TIMERS.with(|timers| timers.borrow().iter().any(|entry| entry.id == self.id))
    }
}

enum TimerKind {
    Once(Box<dyn FnOnce()>),
    Repeating(Rc<RefCell<dyn FnMut()>>),
}

struct TimerEntry {
    id: u64,
    deadline: u64,
    period: Option<u64>,
    /// Tie-breaker: equal deadlines fire in registration order.
    seq: u64,
    kind: TimerKind,
}

// =============================================================================
// REGISTRY
// =============================================================================

thread_local! {
    /// All scheduled timers, unordered; due selection sorts by (deadline, seq).
    static TIMERS: RefCell<Vec<TimerEntry>> = RefCell::new(Vec::new());

    /// Virtual clock in time units (milliseconds for the real-time demo).
    static CLOCK: Cell<u64> = const { Cell::new(0) };

    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
    static NEXT_SEQ: Cell<u64> = const { Cell::new(0) };
}

fn next_id() -> u64 {
    NEXT_ID.with(|id| {
        let value = id.get();
        id.set(value + 1);
        value
    })
}

fn next_seq() -> u64 {
    NEXT_SEQ.with(|seq| {
        let value = seq.get();
        seq.set(value + 1);
        value
    })
}

fn schedule(delay: u64, period: Option<u64>, kind: TimerKind) -> TimerHandle {
    let id = next_id();
    let seq = next_seq();
    let deadline = now().saturating_add(delay);
    TIMERS.with(|timers| {
        timers.borrow_mut().push(TimerEntry {
            id,
            deadline,
            period,
            seq,
            kind,
        });
    });
    TimerHandle { id }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Schedule a one-shot timer `delay` units from now.
pub fn set_timeout(delay: u64, callback: impl FnOnce() + 'static) -> TimerHandle {
    schedule(delay, None, TimerKind::Once(Box::new(callback)))
}

/// Schedule a repeating timer firing every `period` units.
///
/// A zero period is clamped to 1: it would otherwise never let
/// [`advance`] finish a pass.
pub fn set_interval(period: u64, callback: impl FnMut() + 'static) -> TimerHandle {
    let period = period.max(1);
    schedule(
        period,
        Some(period),
        TimerKind::Repeating(Rc::new(RefCell::new(callback))),
    )
}

/// Current virtual time.
pub fn now() -> u64 {
    CLOCK.with(|clock| clock.get())
}

/// Number of timers currently scheduled.
pub fn pending_timers() -> usize {
    TIMERS.with(|timers| timers.borrow().len())
}

/// Move the clock forward by `elapsed` units, running every callback whose
/// deadline falls inside the window.
///
/// Callbacks run with the registry borrow released, so they may freely
/// schedule or cancel timers; a timer scheduled during the pass still fires
/// in the same pass if its deadline lands inside the window.
pub fn advance(elapsed: u64) {
    let target = now().saturating_add(elapsed);

    loop {
        let due = TIMERS.with(|timers| {
            timers
                .borrow()
                .iter()
                .filter(|entry| entry.deadline <= target)
                .min_by_key(|entry| (entry.deadline, entry.seq))
                .map(|entry| (entry.id, entry.deadline))
        });
        let Some((id, deadline)) = due else { break };

        // Callbacks observe their own deadline as the current time.
        CLOCK.with(|clock| clock.set(deadline));

        let callback = TIMERS.with(|timers| {
            let mut timers = timers.borrow_mut();
            let position = timers.iter().position(|entry| entry.id == id)?;
            match timers[position].period {
                None => {
                    let entry = timers.remove(position);
                    match entry.kind {
                        TimerKind::Once(callback) => Some(DueCallback::Once(callback)),
                        TimerKind::Repeating(_) => None,
                    }
                }
                Some(period) => {
                    let entry = &mut timers[position];
                    entry.deadline = deadline.saturating_add(period);
                    entry.seq = next_seq();
                    match &entry.kind {
                        TimerKind::Repeating(callback) => {
                            Some(DueCallback::Repeating(callback.clone()))
                        }
                        TimerKind::Once(_) => None,
                    }
                }
            }
        });

        match callback {
            Some(DueCallback::Once(callback)) => callback(),
            Some(DueCallback::Repeating(callback)) => (callback.borrow_mut())(),
            None => {}
        }
    }

    CLOCK.with(|clock| clock.set(target));
}

enum DueCallback {
    Once(Box<dyn FnOnce()>),
    Repeating(Rc<RefCell<dyn FnMut()>>),
}

/// Reset the timer service (for testing).
///
/// Drops all scheduled timers and rewinds the clock to zero.
pub fn reset_timers() {
    TIMERS.with(|timers| timers.borrow_mut().clear());
    CLOCK.with(|clock| clock.set(0));
    NEXT_ID.with(|id| id.set(1));
    NEXT_SEQ.with(|seq| seq.set(0));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_timers();
    }

    #[test]
    fn test_timeout_fires_once_at_deadline() {
        setup();

        let fired = Rc::new(Cell::new(0u32));
        let fired_clone = fired.clone();
        set_timeout(500, move || fired_clone.set(fired_clone.get() + 1));

        advance(499);
        assert_eq!(fired.get(), 0);

        advance(1);
        assert_eq!(fired.get(), 1);
        assert_eq!(pending_timers(), 0);

        // Long after: still exactly once.
        advance(10_000);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_interval_repeats() {
        setup();

        let ticks = Rc::new(Cell::new(0u32));
        let ticks_clone = ticks.clone();
        let handle = set_interval(100, move || ticks_clone.set(ticks_clone.get() + 1));

        advance(350);
        assert_eq!(ticks.get(), 3);

        handle.cancel();
        advance(1000);
        assert_eq!(ticks.get(), 3);
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_equal_deadlines_fire_in_registration_order() {
        setup();

        let order = Rc::new(RefCell::new(Vec::new()));
        let first = order.clone();
        let second = order.clone();
        set_timeout(100, move || first.borrow_mut().push("first"));
        set_timeout(100, move || second.borrow_mut().push("second"));

        advance(100);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_cancel_before_deadline() {
        setup();

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        let handle = set_timeout(100, move || fired_clone.set(true));

        assert!(handle.is_active());
        handle.cancel();

        advance(1000);
        assert!(!fired.get());
    }

    #[test]
    fn test_callback_scheduled_timer_fires_in_same_pass() {
        setup();

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        set_timeout(100, move || {
            let inner = fired_clone.clone();
            set_timeout(50, move || inner.set(true));
        });

        // 100 + 50 lands inside the window, so the chained timer fires too.
        advance(200);
        assert!(fired.get());
        assert_eq!(now(), 200);
    }

    #[test]
    fn test_callback_observes_its_own_deadline() {
        setup();

        let seen = Rc::new(Cell::new(0u64));
        let seen_clone = seen.clone();
        set_timeout(300, move || seen_clone.set(now()));

        advance(1000);
        assert_eq!(seen.get(), 300);
        assert_eq!(now(), 1000);
    }

    #[test]
    fn test_interval_cancelled_from_its_own_callback() {
        setup();

        let ticks = Rc::new(Cell::new(0u32));
        let handle_slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

        let ticks_clone = ticks.clone();
        let slot_clone = handle_slot.clone();
        let handle = set_interval(100, move || {
            ticks_clone.set(ticks_clone.get() + 1);
            if ticks_clone.get() == 2 {
                if let Some(handle) = slot_clone.borrow_mut().take() {
                    handle.cancel();
                }
            }
        });
        *handle_slot.borrow_mut() = Some(handle);

        advance(1000);
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn test_zero_period_interval_is_clamped() {
        setup();

        let ticks = Rc::new(Cell::new(0u32));
        let ticks_clone = ticks.clone();
        let handle = set_interval(0, move || ticks_clone.set(ticks_clone.get() + 1));

        advance(10);
        assert_eq!(ticks.get(), 10);
        handle.cancel();
    }

    #[test]
    fn test_reset_clears_registry_and_clock() {
        setup();

        set_timeout(100, || {});
        advance(50);
        assert_eq!(now(), 50);
        assert_eq!(pending_timers(), 1);

        reset_timers();
        assert_eq!(now(), 0);
        assert_eq!(pending_timers(), 0);
    }
}
