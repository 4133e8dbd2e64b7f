//! # vitrina
//!
//! Reactive presentation components for a promotional display.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity. Components are headless: each one owns its
//! timers and exposes signals (visible text, caret phase, cursor index,
//! per-item layering) that a host renderer reads and draws however it
//! likes. A terminal demo lives in `demos/promo.rs`.
//!
//! ## Architecture
//!
//! Timing is cooperative and deterministic. The timer service in
//! [`state::timers`] owns a virtual clock; the host loop calls
//! `timers::advance(elapsed)` and due callbacks fire in deadline order.
//! Components schedule their animation ticks there and cancel them on
//! config changes and on unmount, so no timer outlives its component.
//!
//! ## Modules
//!
//! - [`types`] - Core types (RGBA colors, text attribute flags)
//! - [`components`] - Typewriter, carousel, media presenter, showcase, map
//! - [`state`] - Timer service and route-fragment store
//! - [`geo`] - Boundary dataset fetch and region extraction
//! - [`error`] - Playback and map error types
//!
//! ## Example
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
//! loop {
//!     timers::advance(frame_elapsed_ms);
//!     draw(&typist.text.get());
//! }
//! ```

pub mod components;
pub mod error;
pub mod geo;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use components::{
    carousel, icon_glyph, media_presenter, region_map, region_map_from, showcase,
    slide_visuals, typewriter, Carousel, CarouselProps, Cleanup, MediaElement,
    MediaPresenter, MediaPresenterProps, PropValue, RegionMap, RegionMapProps,
    SelectCallback, SelectionFeedback, ServiceEntry, Showcase, ShowcaseProps,
    SlideVisual, TextStyle, Typewriter, TypewriterProps, CARET_BLINK_PERIOD,
    DEFAULT_GLYPH,
};

pub use error::{MapError, PlaybackError};

pub use geo::{fetch_boundaries, parse_boundaries, Region, UNKNOWN_REGION};

pub use state::{
    advance, fragment, now, pending_timers, reset_route_state, reset_timers,
    set_fragment, set_interval, set_timeout, title_slug, TimerHandle,
};
