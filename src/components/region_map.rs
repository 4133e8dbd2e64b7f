//! Region Map - Clickable administrative-boundary map.
//!
//! Backed by a remote GeoJSON boundary dataset (see [`crate::geo`]).
//! Hovering a region drives a tooltip signal; selecting one records it,
//! optionally emits a user-facing notice, and invokes the host callback.
//! A failed fetch is logged and degrades the map to an empty region list;
//! nothing in this component is a fatal path.
//!
//! [`region_map_from`] builds the same component from pre-parsed regions
//! and is the deterministic path used by tests and offline hosts.

use spark_signals::{signal, Signal};

use crate::components::types::SelectCallback;
use crate::geo::{self, Region};

// =============================================================================
// Props
// =============================================================================

/// What a selection does beyond recording it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFeedback {
    /// Emit a user-facing notice through [`RegionMap::notice`].
    Notify,
    /// Record the selection only.
    Silent,
}

/// Configuration for [`region_map`].
pub struct RegionMapProps {
    /// GeoJSON FeatureCollection URL.
    pub source_url: String,
    /// Region names rendered with the highlight style.
    pub highlights: Vec<String>,
    pub feedback: SelectionFeedback,
    /// Invoked with the region name on every selection.
    pub on_select: Option<SelectCallback>,
}

impl Default for RegionMapProps {
    fn default() -> Self {
        Self {
            source_url: String::new(),
            highlights: Vec::new(),
            feedback: SelectionFeedback::Notify,
            on_select: None,
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Handle returned by [`region_map`]. Holds no timers or effects; state
/// lives in plain signals the host renderer reads.
pub struct RegionMap {
    /// Name of the hovered region, for tooltip rendering.
    pub tooltip: Signal<Option<String>>,
    /// Name of the most recently selected region.
    pub last_selected: Signal<Option<String>>,
    /// User-facing notice emitted in [`SelectionFeedback::Notify`] mode.
    pub notice: Signal<Option<String>>,
    regions: Vec<Region>,
    highlights: Vec<String>,
    feedback: SelectionFeedback,
    on_select: Option<SelectCallback>,
}

impl RegionMap {
    /// Hover a region by index, or clear the tooltip with `None`.
    /// Out-of-range indices clear it too.
    pub fn hover(&self, index: Option<usize>) {
        let name = index
            .and_then(|index| self.regions.get(index))
            .map(|region| region.name.clone());
        self.tooltip.set(name);
    }

    /// Select a region by index. Out-of-range indices are ignored.
    pub fn select(&self, index: usize) {
        let Some(region) = self.regions.get(index) else {
            return;
        };
        self.last_selected.set(Some(region.name.clone()));
        if self.feedback == SelectionFeedback::Notify {
            self.notice
                .set(Some(format!("Región seleccionada: {}", region.name)));
        }
        if let Some(callback) = &self.on_select {
            callback(&region.name);
        }
    }

    /// Whether the region at `index` is in the highlight set.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.regions
            .get(index)
            .map(|region| self.highlights.iter().any(|name| name == &region.name))
            .unwrap_or(false)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Mount a region map, fetching the boundary dataset from
/// `props.source_url`. Fetch or parse failure degrades to an empty map.
pub fn region_map(props: RegionMapProps) -> RegionMap {
    let regions = match geo::fetch_boundaries(&props.source_url) {
        Ok(regions) => regions,
        Err(error) => {
            tracing::warn!(
                url = %props.source_url,
                error = %error,
                "boundary fetch failed, rendering an empty map"
            );
            Vec::new()
        }
    };
    region_map_from(regions, props)
}

/// Mount a region map from pre-parsed regions. `props.source_url` is
/// ignored.
pub fn region_map_from(regions: Vec<Region>, props: RegionMapProps) -> RegionMap {
    RegionMap {
        tooltip: signal(None),
        last_selected: signal(None),
        notice: signal(None),
        regions,
        highlights: props.highlights,
        feedback: props.feedback,
        on_select: props.on_select,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn regions(names: &[&str]) -> Vec<Region> {
        names
            .iter()
            .map(|name| Region {
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_hover_drives_tooltip() {
        let map = region_map_from(regions(&["CUSCO", "LIMA"]), RegionMapProps::default());

        map.hover(Some(1));
        assert_eq!(map.tooltip.get().as_deref(), Some("LIMA"));

        map.hover(None);
        assert_eq!(map.tooltip.get(), None);

        map.hover(Some(9));
        assert_eq!(map.tooltip.get(), None);
    }

    #[test]
    fn test_select_records_and_notifies() {
        let map = region_map_from(regions(&["CUSCO", "LIMA"]), RegionMapProps::default());

        map.select(0);
        assert_eq!(map.last_selected.get().as_deref(), Some("CUSCO"));
        assert_eq!(
            map.notice.get().as_deref(),
            Some("Región seleccionada: CUSCO")
        );
    }

    #[test]
    fn test_silent_mode_skips_notice_but_keeps_callback() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_for_callback = seen.clone();
        let map = region_map_from(
            regions(&["CUSCO"]),
            RegionMapProps {
                feedback: SelectionFeedback::Silent,
                on_select: Some(Rc::new(move |name| {
                    seen_for_callback.borrow_mut().push(name.to_string());
                })),
                ..Default::default()
            },
        );

        map.select(0);
        assert_eq!(map.notice.get(), None);
        assert_eq!(map.last_selected.get().as_deref(), Some("CUSCO"));
        assert_eq!(seen.borrow().as_slice(), ["CUSCO".to_string()]);
    }

    #[test]
    fn test_out_of_range_select_is_ignored() {
        let map = region_map_from(regions(&["CUSCO"]), RegionMapProps::default());

        map.select(5);
        assert_eq!(map.last_selected.get(), None);
        assert_eq!(map.notice.get(), None);
    }

    #[test]
    fn test_highlight_set_matches_by_name() {
        let map = region_map_from(
            regions(&["CUSCO", "LIMA"]),
            RegionMapProps {
                highlights: vec!["LIMA".into()],
                ..Default::default()
            },
        );

        assert!(!map.is_highlighted(0));
        assert!(map.is_highlighted(1));
        assert!(!map.is_highlighted(9));
    }

    #[test]
    fn test_empty_map_is_inert() {
        let map = region_map_from(Vec::new(), RegionMapProps::default());
        assert!(map.is_empty());

        map.hover(Some(0));
        map.select(0);
        assert_eq!(map.tooltip.get(), None);
        assert_eq!(map.last_selected.get(), None);
    }
}
