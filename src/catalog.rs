//! Catalog filtering: which bodies are listed and drawn.

use bevy::prelude::Resource;

use crate::body::{Body, BodyId, BodySource};

/// Which sources the catalog shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Feed,
    Manual,
    All,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Feed, ViewMode::Manual, ViewMode::All];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Feed => "Feed",
            ViewMode::Manual => "Manual",
            ViewMode::All => "All",
        }
    }

    pub fn includes(self, source: BodySource) -> bool {
        match self {
            ViewMode::Feed => source == BodySource::Feed,
            ViewMode::Manual => source == BodySource::Manual,
            ViewMode::All => true,
        }
    }
}

/// Current catalog filter and selection.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct CatalogFilter {
    pub view_mode: ViewMode,
    /// Case-insensitive substring of the body name; empty matches all.
    pub name_query: String,
    pub selected: Option<BodyId>,
}

impl CatalogFilter {
    pub fn matches(&self, body: &Body) -> bool {
        if !self.view_mode.includes(body.source) {
            return false;
        }
        let query = self.name_query.trim();
        query.is_empty() || body.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Bodies passing the filter, in catalog order.
    pub fn apply<'a>(&'a self, bodies: &'a [Body]) -> impl Iterator<Item = &'a Body> + 'a {
        bodies.iter().filter(move |b| self.matches(b))
    }

    pub fn counts(&self, bodies: &[Body]) -> CatalogCounts {
        CatalogCounts {
            total: bodies.len(),
            filtered: self.apply(bodies).count(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub total: usize,
    pub filtered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodySeed;
    use crate::test_utils::fixtures;

    fn bodies() -> Vec<Body> {
        let mut manual = fixtures::circular_seed("Manual-0001");
        manual.source = BodySource::Manual;
        let seeds: Vec<BodySeed> = vec![
            fixtures::circular_seed("433 Eros"),
            fixtures::circular_seed("99942 Apophis"),
            manual,
        ];
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, seed)| Body::pending(BodyId(i as u32 + 1), seed))
            .collect()
    }

    #[test]
    fn test_view_modes() {
        let bodies = bodies();
        let mut filter = CatalogFilter::default();
        assert_eq!(filter.counts(&bodies), CatalogCounts { total: 3, filtered: 2 });

        filter.view_mode = ViewMode::Manual;
        assert_eq!(filter.counts(&bodies).filtered, 1);

        filter.view_mode = ViewMode::All;
        assert_eq!(filter.counts(&bodies).filtered, 3);
    }

    #[test]
    fn test_name_query_is_case_insensitive() {
        let bodies = bodies();
        let filter = CatalogFilter {
            view_mode: ViewMode::All,
            name_query: "  aPoPh ".to_string(),
            selected: None,
        };
        let names: Vec<&str> = filter.apply(&bodies).map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["99942 Apophis"]);
    }
}
