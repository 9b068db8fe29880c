use crate::models::{ProductReport, ReviewExcerpt};

#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Lines(Vec<String>),
    TextBlock(String),
}

/// A named block of a product's page, rendered from its report alone.
pub struct Section {
    pub title: &'static str,
    pub render: fn(&ProductReport, &str) -> SectionContent,
}

/// Every product page shows these, in this order.
pub const PRODUCT_SECTIONS: [Section; 5] = [
    Section {
        title: "Negative Reviews",
        render: negative_reviews,
    },
    Section {
        title: "Rating Counts",
        render: rating_counts,
    },
    Section {
        title: "Product Summary",
        render: product_summary,
    },
    Section {
        title: "Positive Reviews",
        render: positive_reviews,
    },
    Section {
        title: "Product Description",
        render: product_description,
    },
];

/// Renders all sections of one product. `currency` prefixes prices.
pub fn render_sections(product: &ProductReport, currency: &str) -> Vec<(&'static str, SectionContent)> {
    PRODUCT_SECTIONS
        .iter()
        .map(|section| (section.title, (section.render)(product, currency)))
        .collect()
}

fn excerpt_lines(marker: &str, excerpts: &[ReviewExcerpt]) -> Vec<String> {
    excerpts
        .iter()
        .map(|e| format!("{} {:?} — {}", marker, e.rating, e.comment))
        .collect()
}

fn negative_reviews(product: &ProductReport, _currency: &str) -> SectionContent {
    SectionContent::Lines(excerpt_lines("💢", &product.negative_reviews))
}

fn positive_reviews(product: &ProductReport, _currency: &str) -> SectionContent {
    SectionContent::Lines(excerpt_lines("✨", &product.positive_reviews))
}

fn rating_counts(product: &ProductReport, _currency: &str) -> SectionContent {
    SectionContent::Lines(
        product
            .statistics
            .rating_histogram
            .iter()
            .map(|c| format!("🔹 Rating {:?} count: {}", c.rating, c.count))
            .collect(),
    )
}

fn product_summary(product: &ProductReport, currency: &str) -> SectionContent {
    SectionContent::Lines(vec![
        format!("💰 **Avg Price:** {}{:.2}", currency, product.statistics.mean_price),
        format!("⭐ **Avg Rating:** {:.2}", product.statistics.mean_rating),
    ])
}

fn product_description(product: &ProductReport, _currency: &str) -> SectionContent {
    SectionContent::TextBlock(product.description.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewRecord;
    use crate::processor::assemble;

    fn sample_product() -> ProductReport {
        let report = assemble(&[
            ReviewRecord::new("X")
                .with_rating("4.5")
                .with_overall_rating("4.1")
                .with_price("₹100")
                .with_comment("great"),
            ReviewRecord::new("X")
                .with_rating("1.0")
                .with_overall_rating("4.1")
                .with_price("₹200")
                .with_comment("bad"),
        ])
        .unwrap();
        report.products.into_iter().next().unwrap()
    }

    #[test]
    fn test_section_order_is_fixed() {
        let titles: Vec<&str> = PRODUCT_SECTIONS.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Negative Reviews",
                "Rating Counts",
                "Product Summary",
                "Positive Reviews",
                "Product Description"
            ]
        );
    }

    #[test]
    fn test_rendered_sections() {
        let rendered = render_sections(&sample_product(), "₹");

        assert_eq!(rendered[0].1, SectionContent::Lines(vec!["💢 1.0 — bad".to_string()]));
        assert_eq!(
            rendered[1].1,
            SectionContent::Lines(vec![
                "🔹 Rating 4.5 count: 1".to_string(),
                "🔹 Rating 1.0 count: 1".to_string(),
            ])
        );
        assert_eq!(
            rendered[2].1,
            SectionContent::Lines(vec![
                "💰 **Avg Price:** ₹150.00".to_string(),
                "⭐ **Avg Rating:** 4.10".to_string(),
            ])
        );
        assert_eq!(rendered[3].1, SectionContent::Lines(vec!["✨ 4.5 — great".to_string()]));
        assert_eq!(rendered[4].1, SectionContent::TextBlock("great bad".to_string()));
    }

    #[test]
    fn test_ratings_render_without_rounding() {
        let report = assemble(&[
            ReviewRecord::new("X").with_rating("4.25").with_comment("a"),
            ReviewRecord::new("X").with_rating("4.2").with_comment("b"),
            ReviewRecord::new("X").with_rating("4.75").with_comment("c"),
        ])
        .unwrap();
        let rendered = render_sections(&report.products[0], "₹");

        assert_eq!(
            rendered[1].1,
            SectionContent::Lines(vec![
                "🔹 Rating 4.75 count: 1".to_string(),
                "🔹 Rating 4.25 count: 1".to_string(),
                "🔹 Rating 4.2 count: 1".to_string(),
            ])
        );
        assert_eq!(rendered[3].1, SectionContent::Lines(vec!["✨ 4.75 — c".to_string()]));
    }

    #[test]
    fn test_sections_render_independently_per_product() {
        let report = assemble(&[
            ReviewRecord::new("A").with_comment("from a"),
            ReviewRecord::new("B").with_comment("from b"),
        ])
        .unwrap();

        let first = render_sections(&report.products[0], "$");
        let second = render_sections(&report.products[1], "$");
        assert_eq!(first[4].1, SectionContent::TextBlock("from a".to_string()));
        assert_eq!(second[4].1, SectionContent::TextBlock("from b".to_string()));
    }
}
