use super::review_models::Numeric;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductStatistics {
    pub product_name: String,
    pub review_count: usize,
    /// Mean of the product's overall rating column.
    pub mean_rating: Numeric,
    pub mean_price: Numeric,
    /// Per-review rating counts, highest rating first.
    pub rating_histogram: Vec<RatingCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewExcerpt {
    pub rating: f64,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassifiedReviews {
    pub positive: Vec<ReviewExcerpt>,
    pub negative: Vec<ReviewExcerpt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub statistics: ProductStatistics,
    pub positive_reviews: Vec<ReviewExcerpt>,
    pub negative_reviews: Vec<ReviewExcerpt>,
    pub description: String,
}

impl ProductReport {
    pub fn product_name(&self) -> &str {
        &self.statistics.product_name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub product_name: String,
    pub short_name: String,
    pub label: String,
    pub mean_rating: Numeric,
    /// Mean rating used as pie weight; zero when the mean is unparseable.
    pub rating_weight: f64,
    pub rating_share: f64,
    pub mean_price: Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossProductSummary {
    pub entries: Vec<SummaryEntry>,
}

impl CrossProductSummary {
    pub fn ranked_by_rating(&self) -> Vec<&SummaryEntry> {
        self.ranked_by(|entry| entry.mean_rating)
    }

    pub fn ranked_by_price(&self) -> Vec<&SummaryEntry> {
        self.ranked_by(|entry| entry.mean_price)
    }

    // Descending, stable, unparseable last.
    fn ranked_by(&self, key: impl Fn(&SummaryEntry) -> Numeric) -> Vec<&SummaryEntry> {
        let mut ranked: Vec<&SummaryEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| match (key(*a).value(), key(*b).value()) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Present only when the input spans two or more products.
    pub summary: Option<CrossProductSummary>,
    pub products: Vec<ProductReport>,
}

impl Report {
    pub fn product(&self, name: &str) -> Option<&ProductReport> {
        self.products.iter().find(|p| p.product_name() == name)
    }
}
