use crate::models::{
    CrossProductSummary, NormalizedRecord, Numeric, ProductStatistics, RatingCount, SummaryEntry,
};

const SHORT_NAME_CHARS: usize = 25;

pub struct Aggregator;

impl Aggregator {
    pub fn aggregate(&self, product_name: &str, records: &[NormalizedRecord]) -> ProductStatistics {
        ProductStatistics {
            product_name: product_name.to_string(),
            review_count: records.len(),
            mean_rating: Numeric::mean(records.iter().map(|r| r.overall_rating)),
            mean_price: Numeric::mean(records.iter().map(|r| r.price)),
            rating_histogram: self.rating_histogram(records),
        }
    }

    /// Counts reviews per distinct `rating` value, highest rating first.
    pub fn rating_histogram(&self, records: &[NormalizedRecord]) -> Vec<RatingCount> {
        let mut ratings: Vec<f64> = records.iter().filter_map(|r| r.rating.value()).collect();
        ratings.sort_by(|a, b| b.total_cmp(a));

        ratings
            .chunk_by(|a, b| a == b)
            .map(|chunk| RatingCount {
                rating: chunk[0],
                count: chunk.len(),
            })
            .collect()
    }

    /// Builds the cross-product comparison, or `None` for fewer than two products.
    pub fn summarize(&self, statistics: &[ProductStatistics]) -> Option<CrossProductSummary> {
        if statistics.len() < 2 {
            return None;
        }

        let total_weight: f64 = statistics
            .iter()
            .map(|s| s.mean_rating.value().unwrap_or(0.0))
            .sum();

        let entries = statistics
            .iter()
            .enumerate()
            .map(|(i, stats)| {
                let rating_weight = stats.mean_rating.value().unwrap_or(0.0);
                let rating_share = if total_weight > 0.0 {
                    rating_weight / total_weight
                } else {
                    0.0
                };

                SummaryEntry {
                    product_name: stats.product_name.clone(),
                    short_name: short_name(&stats.product_name),
                    label: format!("Product {}", i + 1),
                    mean_rating: stats.mean_rating,
                    rating_weight,
                    rating_share,
                    mean_price: stats.mean_price,
                }
            })
            .collect();

        Some(CrossProductSummary { entries })
    }
}

fn short_name(name: &str) -> String {
    if name.chars().count() > SHORT_NAME_CHARS {
        let truncated: String = name.chars().take(SHORT_NAME_CHARS).collect();
        format!("{}...", truncated)
    } else {
        name.to_string()
    }
}
