//! Scroll-position-to-section mapping for the navigation scroll-spy.
//!
//! Section geometry is captured once at navigation setup from layout
//! measurements; it goes stale if the page layout changes afterwards and no
//! re-measurement is performed.

/// One page section, in DOM order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub offset: f64,
    pub height: f64,
}

/// Ordered section geometry. Resolution scans in DOM order, so overlapping
/// sections favor the earlier one.
#[derive(Debug, Default)]
pub struct SectionIndex {
    sections: Vec<Section>,
}

impl SectionIndex {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// First section whose `[offset, offset + height)` range contains the
    /// probe position, if any.
    pub fn resolve(&self, probe: f64) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| probe >= s.offset && probe < s.offset + s.height)
            .map(|s| s.id.as_str())
    }
}

/// Tracks the single active section id. When no section contains the probe
/// (above the first section, past the page end), the previous id is retained;
/// there is no "none" state.
#[derive(Debug)]
pub struct ActiveSection {
    current: String,
}

impl ActiveSection {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Resolve the probe against the index; returns the new id only when the
    /// active section actually changed.
    pub fn update(&mut self, index: &SectionIndex, probe: f64) -> Option<&str> {
        let id = index.resolve(probe)?;
        if id == self.current {
            return None;
        }
        self.current = id.to_string();
        Some(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SectionIndex {
        SectionIndex::new(vec![
            Section {
                id: "inicio".to_string(),
                offset: 0.0,
                height: 500.0,
            },
            Section {
                id: "servicios".to_string(),
                offset: 500.0,
                height: 400.0,
            },
        ])
    }

    #[test]
    fn resolves_first_containing_range() {
        let idx = index();
        assert_eq!(idx.resolve(0.0), Some("inicio"));
        assert_eq!(idx.resolve(499.9), Some("inicio"));
        assert_eq!(idx.resolve(600.0), Some("servicios"));
        assert_eq!(idx.resolve(1000.0), None);
    }

    #[test]
    fn overlapping_sections_favor_dom_order() {
        let idx = SectionIndex::new(vec![
            Section {
                id: "a".to_string(),
                offset: 0.0,
                height: 800.0,
            },
            Section {
                id: "b".to_string(),
                offset: 400.0,
                height: 800.0,
            },
        ]);
        assert_eq!(idx.resolve(500.0), Some("a"));
        assert_eq!(idx.resolve(900.0), Some("b"));
    }

    #[test]
    fn change_is_reported_once() {
        let idx = index();
        let mut active = ActiveSection::new("inicio");

        assert_eq!(active.update(&idx, 100.0), None, "already active");
        assert_eq!(active.update(&idx, 600.0), Some("servicios"));
        assert_eq!(active.update(&idx, 700.0), None, "no re-notify");
    }

    #[test]
    fn past_all_ranges_retains_previous_section() {
        let idx = index();
        let mut active = ActiveSection::new("inicio");

        assert_eq!(active.update(&idx, 600.0), Some("servicios"));
        assert_eq!(active.update(&idx, 1000.0), None);
        assert_eq!(active.current(), "servicios");

        // Above the first section behaves the same way.
        let mut above = ActiveSection::new("servicios");
        assert_eq!(above.update(&idx, -50.0), None);
        assert_eq!(above.current(), "servicios");
    }
}
