//! Presentation components.
//!
//! Each component is a function taking a props struct and returning a
//! handle that owns the component's timers and effects. Handles expose
//! reactive signals the host renderer reads, plus `unmount()`; handles
//! that hold timers also cancel them on Drop.

pub mod carousel;
pub mod media;
pub mod region_map;
pub mod showcase;
pub mod types;
pub mod typewriter;

pub use carousel::{carousel, Carousel, CarouselProps};
pub use media::{media_presenter, MediaElement, MediaPresenter, MediaPresenterProps};
pub use region_map::{
    region_map, region_map_from, RegionMap, RegionMapProps, SelectionFeedback,
};
pub use showcase::{icon_glyph, showcase, ServiceEntry, Showcase, ShowcaseProps, DEFAULT_GLYPH};
pub use types::{
    slide_visuals, Cleanup, PropValue, SelectCallback, SlideVisual, TextStyle,
};
pub use typewriter::{typewriter, Typewriter, TypewriterProps, CARET_BLINK_PERIOD};
