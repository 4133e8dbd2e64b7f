//! State Module - Runtime state shared by the presentation components.
//!
//! - **Timers** - Single-threaded cooperative timer service on a virtual clock
//! - **Route** - Location fragment for deep-linking into the showcase

pub mod route;
pub mod timers;

pub use route::{fragment, reset_route_state, set_fragment, title_slug};
pub use timers::{
    advance, now, pending_timers, reset_timers, set_interval, set_timeout, TimerHandle,
};
