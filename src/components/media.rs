//! Media Presenter - Video rotation with readiness coupling.
//!
//! Extends the carousel pattern with media playback: on every cursor
//! change the newly active element is muted and commanded to play, the
//! outgoing elements are paused and rewound after a short grace delay, and
//! a watchdog forces advancement after a maximum-duration ceiling so a
//! misbehaving element can never stall the rotation. A natural "ended"
//! signal from the active element beats the watchdog and advances
//! immediately.
//!
//! Playback start failures are retried once (re-mute + replay); a second
//! failure is logged and swallowed - the rotation continues on the
//! watchdog schedule and no error surfaces.
//!
//! Unlike [`carousel`](crate::components::carousel::carousel), every
//! cursor change here cancels and reschedules both the grace timer and the
//! watchdog.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::components::types::{slide_visuals, Cleanup, SlideVisual};
use crate::error::PlaybackError;
use crate::state::timers::{self, TimerHandle};

// =============================================================================
// Media Element
// =============================================================================

/// Playback handle for one sequence entry.
///
/// The presenter owns one element per video URL (an indexed ownership
/// array sized to the sequence); no element reference escapes it.
pub trait MediaElement {
    /// Start or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback.
    fn pause(&mut self);

    /// Seek back to the start.
    fn rewind(&mut self);

    /// Mute or unmute. The presenter always mutes before playing to
    /// satisfy autoplay policies.
    fn set_muted(&mut self, muted: bool);
}

// =============================================================================
// Props
// =============================================================================

/// Configuration for [`media_presenter`].
pub struct MediaPresenterProps {
    /// Fallback image shown until the first successful play, and the
    /// entire render when the sequence is empty.
    pub poster: String,
    /// Video URLs, one media element each.
    pub videos: Vec<String>,
    /// Watchdog ceiling in seconds (default 15). The watchdog fires at
    /// `max_duration_secs * 1000` units after a cursor change.
    pub max_duration_secs: u64,
    /// Units to wait after a cursor change before pausing and rewinding
    /// the non-active elements (default 1500, just past the visual
    /// transition).
    pub grace_delay: u64,
}

impl Default for MediaPresenterProps {
    fn default() -> Self {
        Self {
            poster: String::new(),
            videos: Vec::new(),
            max_duration_secs: 15,
            grace_delay: 1500,
        }
    }
}

// =============================================================================
// Component
// =============================================================================

struct PresenterInner {
    current: Signal<usize>,
    loaded: Signal<bool>,
    elements: RefCell<Vec<Box<dyn MediaElement>>>,
    grace_timer: RefCell<Option<TimerHandle>>,
    watchdog_timer: RefCell<Option<TimerHandle>>,
    max_duration_secs: u64,
    grace_delay: u64,
}

impl PresenterInner {
    fn cancel_timers(&self) {
        if let Some(handle) = self.grace_timer.borrow_mut().take() {
            handle.cancel();
        }
        if let Some(handle) = self.watchdog_timer.borrow_mut().take() {
            handle.cancel();
        }
    }
}

/// Handle returned by [`media_presenter`].
pub struct MediaPresenter {
    /// Index of the active video.
    pub current: Signal<usize>,
    /// True after the first successful playback start.
    pub loaded: Signal<bool>,
    /// Fallback image URL.
    pub poster: String,
    videos: Vec<String>,
    inner: Rc<PresenterInner>,
    stop_effect: Option<Cleanup>,
}

impl MediaPresenter {
    /// Natural-end signal from the element at `index`.
    ///
    /// For multi-item sequences an ended signal from the *active* element
    /// cancels the watchdog and advances immediately; signals from
    /// non-active elements are ignored (ghost events during transitions).
    /// A single-item sequence rewinds and replays in place - the cursor
    /// never moves.
    pub fn ended(&self, index: usize) {
        let count = self.videos.len();
        if count == 0 {
            return;
        }

        if count == 1 {
            let mut elements = self.inner.elements.borrow_mut();
            if let Some(element) = elements.get_mut(0) {
                element.rewind();
                if let Err(error) = element.play() {
                    tracing::warn!(error = %error, "replay after natural end failed");
                }
            }
            return;
        }

        if index == self.inner.current.get() {
            if let Some(handle) = self.inner.watchdog_timer.borrow_mut().take() {
                handle.cancel();
            }
            advance_cursor(&self.inner, count);
        }
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn videos(&self) -> &[String] {
        &self.videos
    }

    /// Per-item layering for the current cursor position.
    pub fn visuals(&self) -> Vec<SlideVisual> {
        slide_visuals(self.videos.len(), self.inner.current.get())
    }

    /// Tear down: stops the cursor effect and cancels the grace and
    /// watchdog timers unconditionally.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        self.inner.cancel_timers();
    }
}

impl Drop for MediaPresenter {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount a media-rotation presenter.
///
/// `make_element` is called once per video URL to build the indexed
/// ownership array of playback handles.
pub fn media_presenter(
    props: MediaPresenterProps,
    mut make_element: impl FnMut(&str) -> Box<dyn MediaElement>,
) -> MediaPresenter {
    let MediaPresenterProps {
        poster,
        videos,
        max_duration_secs,
        grace_delay,
    } = props;

    let current = signal(0usize);
    let loaded = signal(false);

    let elements: Vec<Box<dyn MediaElement>> =
        videos.iter().map(|url| make_element(url)).collect();

    let inner = Rc::new(PresenterInner {
        current: current.clone(),
        loaded: loaded.clone(),
        elements: RefCell::new(elements),
        grace_timer: RefCell::new(None),
        watchdog_timer: RefCell::new(None),
        max_duration_secs,
        grace_delay,
    });

    // Cursor effect: runs at mount and on every cursor change.
    let inner_for_effect = inner.clone();
    let count = videos.len();
    let stop_effect = effect(move || {
        let index = inner_for_effect.current.get();
        activate(&inner_for_effect, index, count);
    });

    MediaPresenter {
        current,
        loaded,
        poster,
        videos,
        inner,
        stop_effect: Some(Box::new(stop_effect)),
    }
}

/// Respond to the cursor landing on `index`: start playback, schedule the
/// grace pause for the others, and reset the watchdog.
fn activate(inner: &Rc<PresenterInner>, index: usize, count: usize) {
    if count == 0 {
        return;
    }

    start_playback(inner, index);

    if let Some(handle) = inner.grace_timer.borrow_mut().take() {
        handle.cancel();
    }
    let inner_for_grace = inner.clone();
    let grace = timers::set_timeout(inner.grace_delay, move || {
        let mut elements = inner_for_grace.elements.borrow_mut();
        for (other, element) in elements.iter_mut().enumerate() {
            if other != index {
                element.pause();
                element.rewind();
            }
        }
    });
    *inner.grace_timer.borrow_mut() = Some(grace);

    if let Some(handle) = inner.watchdog_timer.borrow_mut().take() {
        handle.cancel();
    }
    // Single-item sequences self-loop on natural end; no ceiling needed.
    if count > 1 {
        let inner_for_watchdog = inner.clone();
        let watchdog = timers::set_timeout(inner.max_duration_secs * 1000, move || {
            inner_for_watchdog.watchdog_timer.borrow_mut().take();
            advance_cursor(&inner_for_watchdog, count);
        });
        *inner.watchdog_timer.borrow_mut() = Some(watchdog);
    }
}

/// Mute + play, retrying once on failure; the final failure is logged and
/// swallowed so the rotation continues on the watchdog schedule.
fn start_playback(inner: &Rc<PresenterInner>, index: usize) {
    let success = {
        let mut elements = inner.elements.borrow_mut();
        let Some(element) = elements.get_mut(index) else {
            return;
        };
        element.set_muted(true);
        match element.play() {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(index, error = %error, "playback start rejected, retrying muted");
                element.set_muted(true);
                match element.play() {
                    Ok(()) => true,
                    Err(error) => {
                        tracing::error!(index, error = %error, "playback retry failed");
                        false
                    }
                }
            }
        }
    };

    // Write-only: reading `loaded` here would subscribe the cursor effect
    // to its own side effect.
    if success {
        inner.loaded.set(true);
    }
}

fn advance_cursor(inner: &Rc<PresenterInner>, count: usize) {
    inner.current.set((inner.current.get() + 1) % count);
}

// =============================================================================
// TESTS
// =============================================================================
