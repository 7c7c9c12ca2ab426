/// Data layer: row types, line parsing, and classification.
///
/// Architecture:
/// ```text
///  expression table (one gene per line)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  line → Row { gene_id, values }
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Row::window(range) → &[f64]
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  minimum gate + strict / trend test → Verdict
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
