use crate::models::Report;
use anyhow::Result;
use polars::prelude::*;

/// Flattens a report into tables for downstream analytics.
pub struct ParquetExporter;

impl ParquetExporter {
    /// One row per product: counts and means (null where unparseable).
    pub fn statistics_frame(&self, report: &Report) -> Result<DataFrame> {
        let stats: Vec<_> = report.products.iter().map(|p| &p.statistics).collect();

        let names: Vec<String> = stats.iter().map(|s| s.product_name.clone()).collect();
        let review_counts: Vec<u64> = stats.iter().map(|s| s.review_count as u64).collect();
        let mean_ratings: Vec<Option<f64>> = stats.iter().map(|s| s.mean_rating.value()).collect();
        let mean_prices: Vec<Option<f64>> = stats.iter().map(|s| s.mean_price.value()).collect();

        let df = df!(
            "product_name" => names,
            "review_count" => review_counts,
            "mean_rating" => mean_ratings,
            "mean_price" => mean_prices,
        )?;
        Ok(df)
    }

    /// Long format histogram: one row per (product, rating).
    pub fn rating_counts_frame(&self, report: &Report) -> Result<DataFrame> {
        let mut names = Vec::new();
        let mut ratings = Vec::new();
        let mut counts = Vec::new();

        for product in &report.products {
            for bucket in &product.statistics.rating_histogram {
                names.push(product.product_name().to_string());
                ratings.push(bucket.rating);
                counts.push(bucket.count as u64);
            }
        }

        let df = df!(
            "product_name" => names,
            "rating" => ratings,
            "count" => counts,
        )?;
        Ok(df)
    }

    pub fn to_parquet(&self, df: &mut DataFrame) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ParquetWriter::new(&mut buf).finish(df)?;
        Ok(buf)
    }
}
