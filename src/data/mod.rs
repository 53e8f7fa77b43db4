/// Data layer: core types, loading, filtering and the memoized view.
///
/// Architecture:
/// ```text
///  assets/penguins.csv (embedded)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse once → Arc<Dataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  SpeciesFilter → matching indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  DerivedView: cached indices, invalidated on filter change
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
