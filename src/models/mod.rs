pub mod report_models;
pub mod review_models;

pub use report_models::*;
pub use review_models::*;
