pub mod extraction;
pub mod loaders;
pub mod schema;
pub mod score_table;

pub use extraction::{AggregateResults, CostEstimate, ExtractionResult, Pricing, UsageStats};
pub use loaders::discover_images;
pub use schema::{FieldKind, ResponseSchema, SchemaField, SCORE_TABLE_SCHEMA};
pub use score_table::ScoreTable;
