pub mod aggregator;
pub mod field_normalizer;
pub mod product_grouper;
pub mod report_assembler;
pub mod review_classifier;

pub use aggregator::*;
pub use field_normalizer::*;
pub use product_grouper::*;
pub use report_assembler::*;
pub use review_classifier::*;
