use crate::models::{ClassifiedReviews, NormalizedRecord, ReviewExcerpt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub positive_threshold: f64,
    pub negative_threshold: f64,
    pub excerpt_limit: usize,
    pub description_comments: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            positive_threshold: 4.5,
            negative_threshold: 2.0,
            excerpt_limit: 5,
            description_comments: 10,
        }
    }
}

pub struct ReviewClassifier {
    settings: ClassifierSettings,
}

impl ReviewClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Picks the best and worst reviews of one product.
    ///
    /// Selection is a stable sort followed by a truncate, so reviews with
    /// equal ratings keep their input order. Unparseable ratings never
    /// qualify for either list.
    pub fn classify(&self, records: &[NormalizedRecord]) -> ClassifiedReviews {
        let mut positive: Vec<ReviewExcerpt> = records
            .iter()
            .filter_map(excerpt)
            .filter(|e| e.rating >= self.settings.positive_threshold)
            .collect();
        positive.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        positive.truncate(self.settings.excerpt_limit);

        let mut negative: Vec<ReviewExcerpt> = records
            .iter()
            .filter_map(excerpt)
            .filter(|e| e.rating <= self.settings.negative_threshold)
            .collect();
        negative.sort_by(|a, b| a.rating.total_cmp(&b.rating));
        negative.truncate(self.settings.excerpt_limit);

        ClassifiedReviews { positive, negative }
    }

    /// Joins the first few present comments into one text block.
    pub fn describe(&self, records: &[NormalizedRecord]) -> String {
        records
            .iter()
            .filter_map(|r| r.comment.as_deref())
            .take(self.settings.description_comments)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ReviewClassifier {
    fn default() -> Self {
        Self::new(ClassifierSettings::default())
    }
}

fn excerpt(record: &NormalizedRecord) -> Option<ReviewExcerpt> {
    record.rating.value().map(|rating| ReviewExcerpt {
        rating,
        comment: record.comment.clone().unwrap_or_default(),
    })
}
