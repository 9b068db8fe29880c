pub mod config;
pub mod export;
pub mod models;
pub mod presentation;
pub mod processor;
pub mod storage;

pub use models::{Report, ReviewRecord};
pub use processor::{ReportAssembler, assemble};
