pub mod parquet_export;

pub use parquet_export::*;
