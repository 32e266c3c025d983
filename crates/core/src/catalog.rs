//! Component Catalog
//!
//! The catalog is the versioned registry of component types the renderer knows
//! how to draw. It is consulted by the prompt-instruction generator (so the
//! producer knows what it may emit) and by callers that want to display
//! metadata; the validator deliberately does not consult it and accepts type
//! names generically.
//!
//! The catalog is immutable process-wide state: built once, then shared by
//! reference from any number of concurrent readers.

use std::sync::LazyLock;

/// Version identifier of the standard math catalog. Producers are asked to
/// echo this into `beginRendering.catalogId`; this crate surfaces the id but
/// does not enforce the round-trip.
pub const STANDARD_CATALOG_ID: &str = "a2ui/math-v0.1";

/// Usage metadata for one component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Component type name, the unique key of the registry.
    pub name: &'static str,
    /// Human description of what the component draws.
    pub description: &'static str,
    /// Situations this component is a good fit for, in display order.
    pub use_cases: &'static [&'static str],
}

/// An immutable registry of component types under a single catalog version.
#[derive(Debug)]
pub struct Catalog {
    id: &'static str,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Returns the shared standard math catalog, built on first use.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// The opaque version identifier of this catalog.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Looks up a component type by name. An unknown name is simply absent;
    /// it is not an error at this layer.
    pub fn lookup(&self, type_name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == type_name)
    }

    /// All entries in curated display order. The order is chosen for the
    /// generated instructions (most broadly useful components first), not by
    /// insertion or alphabet.
    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    id: STANDARD_CATALOG_ID,
    entries: vec![
        CatalogEntry {
            name: "NumberLine",
            description: "A horizontal number line with labeled ticks and optional jump arcs \
                          between positions.",
            use_cases: &[
                "addition and subtraction as jumps",
                "rounding and estimation",
                "comparing and ordering numbers",
            ],
        },
        CatalogEntry {
            name: "BarModel",
            description: "Proportional bars split into labeled segments, the classic \
                          part-whole tape diagram.",
            use_cases: &[
                "part-whole word problems",
                "comparison problems",
                "ratio and proportional reasoning",
            ],
        },
        CatalogEntry {
            name: "FractionBar",
            description: "A single bar partitioned into equal parts with some parts shaded.",
            use_cases: &[
                "introducing fractions",
                "equivalent fractions",
                "fraction addition with like denominators",
            ],
        },
        CatalogEntry {
            name: "AreaModel",
            description: "A rectangle subdivided into a grid of cells, each cell optionally \
                          labeled with a partial product.",
            use_cases: &[
                "multi-digit multiplication",
                "the distributive property",
                "area and array problems",
            ],
        },
        CatalogEntry {
            name: "CounterGroup",
            description: "Discrete counters arranged into groups, for counting and grouping \
                          arguments.",
            use_cases: &[
                "early counting",
                "equal groups and division",
                "remainders",
            ],
        },
        CatalogEntry {
            name: "MathText",
            description: "A line of mathematical text with inline notation, used for equations \
                          and worked expressions.",
            use_cases: &[
                "showing the equation a visual illustrates",
                "step labels and intermediate results",
            ],
        },
        CatalogEntry {
            name: "Column",
            description: "A vertical layout container stacking child components by id, top to \
                          bottom.",
            use_cases: &["composing several visuals into one step"],
        },
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_carries_the_versioned_id() {
        assert_eq!(Catalog::standard().id(), STANDARD_CATALOG_ID);
    }

    #[test]
    fn lookup_finds_known_types() {
        let catalog = Catalog::standard();
        let entry = catalog.lookup("NumberLine").unwrap();
        assert!(entry.description.contains("number line"));
        assert!(!entry.use_cases.is_empty());
    }

    #[test]
    fn lookup_of_unknown_type_is_absent_not_an_error() {
        assert!(Catalog::standard().lookup("HolographicCube").is_none());
    }

    #[test]
    fn display_order_is_stable_and_unique() {
        let catalog = Catalog::standard();
        let first: Vec<&str> = catalog.all().iter().map(|e| e.name).collect();
        let second: Vec<&str> = catalog.all().iter().map(|e| e.name).collect();
        assert_eq!(first, second);

        let mut deduped = first.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), first.len(), "duplicate catalog entry name");
    }

    #[test]
    fn every_entry_has_description_and_use_cases() {
        for entry in Catalog::standard().all() {
            assert!(!entry.description.is_empty(), "{} lacks description", entry.name);
            assert!(!entry.use_cases.is_empty(), "{} lacks use cases", entry.name);
        }
    }
}
