/// Data layer: trip types, loading, filtering and pagination.
///
/// Architecture:
/// ```text
///  chicago.csv / new_york_city.csv / washington.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  months ∧ weekdays → narrowed TripTable
///   └──────────┘
///        │
///        ├──────────────▶ stats (report text)
///        ▼
///   ┌──────────┐
///   │  pager    │  start-time order, 5-row windows
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod pager;
