//! Word-Cycle Typist - Phrase typing/deleting animation.
//!
//! Cycles through a list of phrases, typing and deleting one character per
//! tick on independently configurable cadences, with a fixed pause after
//! each completed phrase. With looping disabled the final phrase is
//! terminal: the session finishes, the step timer stops, and the caret
//! stops blinking.
//!
//! The whole animation is one tagged state ([`TypingSession`]) updated
//! atomically per tick - no distributed mutable flags. Governing props are
//! read inside a config effect, so changing any of them (word list, rates,
//! pause, loop flag) cancels and recreates every timer.
//!
//! # Example
//!
//! ```ignore
//! use vitrina::components::{typewriter, TypewriterProps};
//! use vitrina::state::timers;
//!
//! let typist = typewriter(TypewriterProps {
//!     words: vec!["Eco".into(), "Verde".into()].into(),
//!     ..Default::default()
//! });
//!
//! timers::advance(450); // drive the animation
//! println!("{}", typist.text.get()); // "Eco"
//!
//! typist.unmount(); // cancels step + blink timers
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::components::types::{Cleanup, PropValue, TextStyle};
use crate::state::timers::{self, TimerHandle};

/// Caret blink half-period, in time units.
pub const CARET_BLINK_PERIOD: u64 = 530;

// =============================================================================
// Props
// =============================================================================

/// Configuration for [`typewriter`].
pub struct TypewriterProps {
    /// Phrases to cycle through. Empty list degrades to a static empty
    /// render with no timers.
    pub words: PropValue<Vec<String>>,
    /// Units between typed characters (default 150).
    pub typing_speed: PropValue<u64>,
    /// Units between deleted characters (default 75).
    pub deleting_speed: PropValue<u64>,
    /// Pause after a phrase completes, before deleting (default 2000).
    pub pause_duration: PropValue<u64>,
    /// Cycle forever (default). When false, the last phrase is terminal.
    pub loop_words: PropValue<bool>,
    /// Styling hook for the visible text.
    pub style: TextStyle,
    /// Styling hook for the caret glyph.
    pub caret_style: TextStyle,
}

impl Default for TypewriterProps {
    fn default() -> Self {
        Self {
            words: PropValue::Static(Vec::new()),
            typing_speed: PropValue::Static(150),
            deleting_speed: PropValue::Static(75),
            pause_duration: PropValue::Static(2000),
            loop_words: PropValue::Static(true),
            style: TextStyle::default(),
            caret_style: TextStyle::default(),
        }
    }
}

// =============================================================================
// Typing Session - the state machine
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypingPhase {
    Typing,
    Pausing,
    Deleting,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
struct TypingSession {
    word_index: usize,
    visible: String,
    phase: TypingPhase,
}

#[derive(Debug, Clone, PartialEq)]
struct TypistConfig {
    words: Vec<String>,
    typing_speed: u64,
    deleting_speed: u64,
    pause_duration: u64,
    loop_words: bool,
}

impl TypingSession {
    fn new() -> Self {
        Self {
            word_index: 0,
            visible: String::new(),
            phase: TypingPhase::Typing,
        }
    }

    /// Resolve zero-time transitions: a completed phrase moves to Pausing
    /// (or Finished when terminal); an emptied phrase advances the index
    /// cyclically and resumes Typing.
    fn normalize(&mut self, words: &[String], loop_words: bool) {
        match self.phase {
            TypingPhase::Typing => {
                if self.visible == words[self.word_index] {
                    if !loop_words && self.word_index + 1 == words.len() {
                        self.phase = TypingPhase::Finished;
                    } else {
                        self.phase = TypingPhase::Pausing;
                    }
                }
            }
            TypingPhase::Deleting if self.visible.is_empty() => {
                self.word_index = (self.word_index + 1) % words.len();
                self.phase = TypingPhase::Typing;
                // The next word may itself be empty.
                self.normalize(words, loop_words);
            }
            _ => {}
        }
    }

    /// Delay before the next tick; None once finished.
    fn next_delay(&self, config: &TypistConfig) -> Option<u64> {
        match self.phase {
            // Zero cadences are clamped: they would spin the scheduler.
            TypingPhase::Typing => Some(config.typing_speed.max(1)),
            TypingPhase::Pausing => Some(config.pause_duration.max(1)),
            TypingPhase::Deleting => Some(config.deleting_speed.max(1)),
            TypingPhase::Finished => None,
        }
    }

    /// Apply one tick: append or remove exactly one character, or end the
    /// post-phrase pause.
    fn tick(&mut self, words: &[String], loop_words: bool) {
        match self.phase {
            TypingPhase::Typing => {
                let full = &words[self.word_index];
                // `visible` is always a char-boundary prefix of `full`.
                if let Some(next) = full.get(self.visible.len()..).and_then(|rest| rest.chars().next()) {
                    self.visible.push(next);
                }
            }
            TypingPhase::Pausing => self.phase = TypingPhase::Deleting,
            TypingPhase::Deleting => {
                self.visible.pop();
            }
            TypingPhase::Finished => {}
        }
        self.normalize(words, loop_words);
    }
}

// =============================================================================
// Component
// =============================================================================

struct TypistInner {
    text: Signal<String>,
    caret_visible: Signal<bool>,
    finished: Signal<bool>,
    session: RefCell<TypingSession>,
    config: RefCell<TypistConfig>,
    step_timer: RefCell<Option<TimerHandle>>,
    blink_timer: RefCell<Option<TimerHandle>>,
}

impl TypistInner {
    fn cancel_timers(&self) {
        if let Some(handle) = self.step_timer.borrow_mut().take() {
            handle.cancel();
        }
        if let Some(handle) = self.blink_timer.borrow_mut().take() {
            handle.cancel();
        }
    }
}

/// Handle returned by [`typewriter`].
///
/// Owns the step and blink timers; `unmount()` (or Drop) cancels both.
pub struct Typewriter {
    /// The accumulated visible substring.
    pub text: Signal<String>,
    /// Caret glyph phase; forced hidden once finished.
    pub caret_visible: Signal<bool>,
    /// True only when looping is disabled and the last phrase completed.
    pub finished: Signal<bool>,
    pub style: TextStyle,
    pub caret_style: TextStyle,
    inner: Rc<TypistInner>,
    stop_config: Option<Cleanup>,
}

impl Typewriter {
    /// Tear down the component: stops the config effect and cancels all
    /// timers unconditionally.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_config.take() {
            stop();
        }
        self.inner.cancel_timers();
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount a word-cycle typist.
pub fn typewriter(props: TypewriterProps) -> Typewriter {
    let text = signal(String::new());
    let caret_visible = signal(true);
    let finished = signal(false);

    let inner = Rc::new(TypistInner {
        text: text.clone(),
        caret_visible: caret_visible.clone(),
        finished: finished.clone(),
        session: RefCell::new(TypingSession::new()),
        config: RefCell::new(TypistConfig {
            words: Vec::new(),
            typing_speed: 150,
            deleting_speed: 75,
            pause_duration: 2000,
            loop_words: true,
        }),
        step_timer: RefCell::new(None),
        blink_timer: RefCell::new(None),
    });

    let TypewriterProps {
        words,
        typing_speed,
        deleting_speed,
        pause_duration,
        loop_words,
        style,
        caret_style,
    } = props;

    // Config effect: reads every governing prop so a reactive prop change
    // re-runs it, cancelling and recreating all timers.
    let inner_for_effect = inner.clone();
    let stop_config = effect(move || {
        *inner_for_effect.config.borrow_mut() = TypistConfig {
            words: words.get(),
            typing_speed: typing_speed.get(),
            deleting_speed: deleting_speed.get(),
            pause_duration: pause_duration.get(),
            loop_words: loop_words.get(),
        };
        restart(&inner_for_effect);
    });

    Typewriter {
        text,
        caret_visible,
        finished,
        style,
        caret_style,
        inner,
        stop_config: Some(Box::new(stop_config)),
    }
}

/// Reset the session and reschedule from scratch.
fn restart(inner: &Rc<TypistInner>) {
    inner.cancel_timers();

    let empty = {
        let config = inner.config.borrow();
        let mut session = inner.session.borrow_mut();
        *session = TypingSession::new();
        if config.words.is_empty() {
            true
        } else {
            session.normalize(&config.words, config.loop_words);
            false
        }
    };

    inner.text.set(String::new());
    inner.finished.set(false);
    inner.caret_visible.set(true);

    // Empty phrase list: static fallback, no timers.
    if empty {
        return;
    }

    let caret = inner.caret_visible.clone();
    let blink = timers::set_interval(CARET_BLINK_PERIOD, move || {
        caret.set(!caret.get());
    });
    *inner.blink_timer.borrow_mut() = Some(blink);

    arm(inner);
}

/// Schedule the next tick, or finish the session when none remains.
fn arm(inner: &Rc<TypistInner>) {
    let delay = {
        let config = inner.config.borrow();
        let session = inner.session.borrow();
        session.next_delay(&config)
    };

    match delay {
        Some(delay) => {
            let inner_for_tick = inner.clone();
            let handle = timers::set_timeout(delay, move || step(&inner_for_tick));
            *inner.step_timer.borrow_mut() = Some(handle);
        }
        None => finish(inner),
    }
}

fn step(inner: &Rc<TypistInner>) {
    let visible = {
        let config = inner.config.borrow();
        let mut session = inner.session.borrow_mut();
        session.tick(&config.words, config.loop_words);
        session.visible.clone()
    };
    inner.text.set(visible);
    arm(inner);
}

/// Terminal state: suppress further timers and hide the caret.
fn finish(inner: &Rc<TypistInner>) {
    if let Some(handle) = inner.blink_timer.borrow_mut().take() {
        handle.cancel();
    }
    inner.caret_visible.set(false);
    inner.finished.set(true);
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

    fn props(words: &[&str]) -> TypewriterProps {
        TypewriterProps {
            words: PropValue::Static(words.iter().map(|w| w.to_string()).collect()),
            typing_speed: PropValue::Static(100),
            deleting_speed: PropValue::Static(50),
            pause_duration: PropValue::Static(200),
            ..Default::default()
        }
    }

    #[test]
    fn test_cadence_sequence_matches_reference() {
        setup();

        let typist = typewriter(props(&["Eco", "Verde"]));
        assert_eq!(typist.text.get(), "");

        for (at, expected) in [
            (100, "E"),
            (200, "Ec"),
            (300, "Eco"),
            // 200-unit pause before deleting
            (550, "Ec"),
            (600, "E"),
            (650, ""),
            (750, "V"),
            (850, "Ve"),
        ] {
            let elapsed = at - timers::now();
            advance(elapsed);
            assert_eq!(typist.text.get(), expected, "at t={at}");
        }

        typist.unmount();
    }

    #[test]
    fn test_cycles_back_to_first_word() {
        setup();

        let typist = typewriter(props(&["Eco", "Verde"]));
        // Type "Eco" (300), pause (200), delete (150), type "Verde" (500),
        // pause (200), delete (250), then the first char of "Eco" again.
        advance(300 + 200 + 150 + 500 + 200 + 250 + 100);
        assert_eq!(typist.text.get(), "E");

        typist.unmount();
    }

    #[test]
    fn test_visible_never_exceeds_current_phrase() {
        setup();

        let words = ["Eco", "Verde"];
        let typist = typewriter(props(&words));
        for _ in 0..200 {
            advance(25);
            let visible = typist.text.get();
            assert!(words.iter().any(|word| word.starts_with(&visible)));
            assert!(visible.chars().count() <= 5);
        }

        typist.unmount();
    }

    #[test]
    fn test_delete_reaches_empty_before_next_word() {
        setup();

        let typist = typewriter(props(&["ab", "cd"]));
        // "ab" typed at 200, pause until 400, deletes at 450 and 500.
        advance(500);
        assert_eq!(typist.text.get(), "");
        // Next tick types the first char of the *next* word.
        advance(100);
        assert_eq!(typist.text.get(), "c");

        typist.unmount();
    }

    #[test]
    fn test_no_loop_finishes_and_stops_all_timers() {
        setup();

        let mut config = props(&["Hi"]);
        config.loop_words = PropValue::Static(false);
        let typist = typewriter(config);

        advance(200);
        assert_eq!(typist.text.get(), "Hi");
        assert!(typist.finished.get());
        assert!(!typist.caret_visible.get());
        assert_eq!(pending_timers(), 0);

        // Nothing ever fires again.
        advance(60_000);
        assert_eq!(typist.text.get(), "Hi");
        assert!(!typist.caret_visible.get());

        typist.unmount();
    }

    #[test]
    fn test_caret_blinks_on_fixed_interval() {
        setup();

        let typist = typewriter(props(&["Eco"]));
        assert!(typist.caret_visible.get());

        advance(CARET_BLINK_PERIOD);
        assert!(!typist.caret_visible.get());
        advance(CARET_BLINK_PERIOD);
        assert!(typist.caret_visible.get());

        typist.unmount();
    }

    #[test]
    fn test_empty_word_list_is_static() {
        setup();

        let typist = typewriter(TypewriterProps::default());
        assert_eq!(pending_timers(), 0);

        advance(10_000);
        assert_eq!(typist.text.get(), "");

        typist.unmount();
    }

    #[test]
    fn test_reactive_words_change_recreates_timers() {
        setup();

        let words = spark_signals::signal(vec!["Eco".to_string()]);
        let typist = typewriter(TypewriterProps {
            words: words.clone().into(),
            typing_speed: PropValue::Static(100),
            ..Default::default()
        });

        advance(250);
        assert_eq!(typist.text.get(), "Ec");

        // New word list: session resets, timers are recreated.
        words.set(vec!["Verde".to_string()]);
        assert_eq!(typist.text.get(), "");
        advance(100);
        assert_eq!(typist.text.get(), "V");

        typist.unmount();
    }

    #[test]
    fn test_unmount_cancels_timers() {
        setup();

        let typist = typewriter(props(&["Eco"]));
        assert!(pending_timers() > 0);

        typist.unmount();
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_session_handles_empty_phrase() {
        setup();

        // A single empty phrase with looping: pauses and re-pauses without
        // ever pushing characters, and never finishes.
        let typist = typewriter(TypewriterProps {
            words: PropValue::Static(vec![String::new()]),
            pause_duration: PropValue::Static(200),
            ..Default::default()
        });

        advance(1000);
        assert_eq!(typist.text.get(), "");
        assert!(!typist.finished.get());

        typist.unmount();
    }
}
