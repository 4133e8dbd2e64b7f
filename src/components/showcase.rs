//! Tabbed Showcase - Service tabs with a rotating image panel.
//!
//! One tab per service entry. The active tab drives a per-tab image
//! rotation: a tab change resets the image cursor to 0 and restarts the
//! rotation interval (unlike the plain carousel, which keeps its schedule
//! on manual jumps). Images resolve through a fallback chain: the tab's
//! own list, then the shared list, then the single default image.
//!
//! Deep-linking: at mount the stored location fragment is matched against
//! lowercased, hyphenated tab titles to preselect a tab. No match leaves
//! tab 0 active.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::components::types::{slide_visuals, Cleanup, SlideVisual};
use crate::state::route;
use crate::state::timers::{self, TimerHandle};

// =============================================================================
// Icons
// =============================================================================

/// Glyph shown when a service names an icon this layer doesn't know.
pub const DEFAULT_GLYPH: &str = "•";

/// Resolve an icon identifier to a terminal glyph. Unknown identifiers
/// fall back to [`DEFAULT_GLYPH`].
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "seedling" => "🌱",
        "flask" => "⚗",
        "map" => "🗺",
        "graduation" => "🎓",
        "handshake" => "🤝",
        "chart" => "📈",
        _ => DEFAULT_GLYPH,
    }
}

// =============================================================================
// Props
// =============================================================================

/// One tab of the showcase.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceEntry {
    pub title: String,
    pub short_desc: String,
    pub full_desc: String,
    /// Icon identifier, resolved via [`icon_glyph`].
    pub icon: String,
    /// Tab-specific images; `None` falls through to the shared list.
    pub images: Option<Vec<String>>,
}

/// Configuration for [`showcase`].
pub struct ShowcaseProps {
    pub services: Vec<ServiceEntry>,
    /// Last resort of the image fallback chain.
    pub default_image: String,
    /// Shared images used by tabs without their own list.
    pub images: Option<Vec<String>>,
    /// Units between image advances on the active tab (default 4000).
    pub rotation_interval: u64,
}

impl Default for ShowcaseProps {
    fn default() -> Self {
        Self {
            services: Vec::new(),
            default_image: String::new(),
            images: None,
            rotation_interval: 4000,
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Handle returned by [`showcase`].
pub struct Showcase {
    /// Index of the selected tab.
    pub active_tab: Signal<usize>,
    /// Cursor into the active tab's resolved image list. Reset to 0 on
    /// every tab change.
    pub image_cursor: Signal<usize>,
    services: Rc<Vec<ServiceEntry>>,
    default_image: String,
    shared_images: Option<Vec<String>>,
    timer: Rc<RefCell<Option<TimerHandle>>>,
    stop_tab_effect: Option<Cleanup>,
}

impl Showcase {
    /// Select a tab. Out-of-range indices are ignored. A tab change
    /// resets the image cursor and restarts the rotation interval.
    pub fn select(&self, index: usize) {
        if index < self.services.len() {
            self.active_tab.set(index);
        }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }

    /// The selected service, if any tabs exist.
    pub fn active_service(&self) -> Option<&ServiceEntry> {
        self.services.get(self.active_tab.get())
    }

    /// The resolved image list for the active tab: tab images, else the
    /// shared list, else the default image alone. Empty lists fall
    /// through the same as missing ones.
    pub fn current_images(&self) -> Vec<String> {
        resolve_images(
            self.services.get(self.active_tab.get()),
            self.shared_images.as_ref(),
            &self.default_image,
        )
    }

    /// Per-image layering for the active tab.
    pub fn visuals(&self) -> Vec<SlideVisual> {
        slide_visuals(self.current_images().len(), self.image_cursor.get())
    }

    /// Glyph for the selected tab's icon.
    pub fn active_glyph(&self) -> &'static str {
        self.active_service()
            .map(|service| icon_glyph(&service.icon))
            .unwrap_or(DEFAULT_GLYPH)
    }

    /// Tear down: stops the tab effect and cancels the rotation interval.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_tab_effect.take() {
            stop();
        }
        if let Some(handle) = self.timer.borrow_mut().take() {
            handle.cancel();
        }
    }
}

impl Drop for Showcase {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn resolve_images(
    service: Option<&ServiceEntry>,
    shared: Option<&Vec<String>>,
    default_image: &str,
) -> Vec<String> {
    if let Some(own) = service.and_then(|entry| entry.images.as_ref()) {
        if !own.is_empty() {
            return own.clone();
        }
    }
    if let Some(shared) = shared {
        if !shared.is_empty() {
            return shared.clone();
        }
    }
    vec![default_image.to_string()]
}

/// Mount a tabbed showcase.
///
/// Reads the location fragment once to preselect a deep-linked tab.
pub fn showcase(props: ShowcaseProps) -> Showcase {
    let ShowcaseProps {
        services,
        default_image,
        images,
        rotation_interval,
    } = props;
    let services = Rc::new(services);

    // Deep-link: fragment vs lowercased hyphenated title.
    let initial_tab = route::fragment()
        .and_then(|fragment| {
            let wanted = fragment.to_lowercase();
            services
                .iter()
                .position(|service| route::title_slug(&service.title) == wanted)
        })
        .unwrap_or(0);

    let active_tab = signal(initial_tab);
    let image_cursor = signal(0usize);
    let timer: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

    // Tab effect: every tab change resets the cursor and restarts the
    // rotation over that tab's resolved image list.
    let services_for_effect = services.clone();
    let shared_for_effect = images.clone();
    let default_for_effect = default_image.clone();
    let cursor_for_effect = image_cursor.clone();
    let tab_for_effect = active_tab.clone();
    let timer_for_effect = timer.clone();
    let stop_tab_effect = effect(move || {
        let tab = tab_for_effect.get();

        if let Some(handle) = timer_for_effect.borrow_mut().take() {
            handle.cancel();
        }
        cursor_for_effect.set(0);

        if services_for_effect.is_empty() {
            return;
        }
        let count = resolve_images(
            services_for_effect.get(tab),
            shared_for_effect.as_ref(),
            &default_for_effect,
        )
        .len();
        if count <= 1 {
            return;
        }

        let cursor = cursor_for_effect.clone();
        let handle = timers::set_interval(rotation_interval, move || {
            cursor.set((cursor.get() + 1) % count);
        });
        *timer_for_effect.borrow_mut() = Some(handle);
    });

    Showcase {
        active_tab,
        image_cursor,
        services,
        default_image,
        shared_images: images,
        timer,
        stop_tab_effect: Some(Box::new(stop_tab_effect)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
