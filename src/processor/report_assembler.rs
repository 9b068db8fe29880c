use crate::models::{ProductReport, Report, ReviewRecord};
use crate::processor::{Aggregator, ClassifierSettings, FieldNormalizer, ProductGrouper, ReviewClassifier};
use anyhow::{Result, bail};
use tracing::{debug, info, warn};

/// Runs the whole pipeline: normalize, group, aggregate, classify.
pub struct ReportAssembler {
    normalizer: FieldNormalizer,
    grouper: ProductGrouper,
    aggregator: Aggregator,
    classifier: ReviewClassifier,
}

impl ReportAssembler {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self {
            normalizer: FieldNormalizer,
            grouper: ProductGrouper,
            aggregator: Aggregator,
            classifier: ReviewClassifier::new(settings),
        }
    }

    pub fn assemble(&self, records: &[ReviewRecord]) -> Result<Report> {
        if records.is_empty() {
            warn!("No review records to report on");
            return Ok(Report::default());
        }

        let unnamed = records.iter().filter(|r| r.product_name.is_none()).count();
        if unnamed == records.len() {
            bail!(
                "None of the {} review records carries a product name; cannot group reviews by product",
                records.len()
            );
        }
        if unnamed > 0 {
            warn!("{} review records have no product name and are grouped under \"\"", unnamed);
        }

        let normalized = self.normalizer.normalize(records);
        let groups = self.grouper.group(normalized);
        info!("Grouped {} reviews into {} products", records.len(), groups.len());

        let products: Vec<ProductReport> = groups
            .iter()
            .map(|group| {
                let statistics = self.aggregator.aggregate(&group.product_name, &group.records);
                let classified = self.classifier.classify(&group.records);
                debug!(
                    "{}: {} positive, {} negative excerpts",
                    group.product_name,
                    classified.positive.len(),
                    classified.negative.len()
                );

                ProductReport {
                    statistics,
                    positive_reviews: classified.positive,
                    negative_reviews: classified.negative,
                    description: self.classifier.describe(&group.records),
                }
            })
            .collect();

        let statistics: Vec<_> = products.iter().map(|p| p.statistics.clone()).collect();
        let summary = self.aggregator.summarize(&statistics);

        Ok(Report { summary, products })
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(ClassifierSettings::default())
    }
}

/// Builds a report with the default thresholds.
pub fn assemble(records: &[ReviewRecord]) -> Result<Report> {
    ReportAssembler::default().assemble(records)
}
