pub mod cost;
pub mod ingest;
pub mod summarize;
