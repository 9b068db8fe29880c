use super::sections::{SectionContent, render_sections};
use crate::models::{CrossProductSummary, Report};
use std::fmt::Write;

pub struct MarkdownRenderer {
    currency_symbol: String,
}

impl MarkdownRenderer {
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();

        if let Some(summary) = &report.summary {
            self.render_summary(&mut out, summary);
        }

        out.push_str("## Product Sections\n\n");
        for product in &report.products {
            let _ = writeln!(out, "## {}\n", product.product_name().replace('\n', " "));

            for (title, content) in render_sections(product, &self.currency_symbol) {
                let _ = writeln!(out, "### {}\n", title);
                match content {
                    SectionContent::Lines(lines) => {
                        for line in lines {
                            let _ = writeln!(out, "- {}", line);
                        }
                    }
                    SectionContent::TextBlock(text) => {
                        for line in text.lines() {
                            let _ = writeln!(out, "> {}", line);
                        }
                    }
                }
                out.push('\n');
            }

            out.push_str("---\n\n");
        }

        out
    }

    fn render_summary(&self, out: &mut String, summary: &CrossProductSummary) {
        out.push_str("## General Information\n\n");

        out.push_str("### Average Ratings by Product\n\n");
        out.push_str("| Product | Avg Rating | Share |\n|---|---|---|\n");
        for entry in summary.ranked_by_rating() {
            let _ = writeln!(
                out,
                "| {} | {:.2} | {:.1}% |",
                table_cell(&entry.short_name),
                entry.mean_rating,
                entry.rating_share * 100.0
            );
        }
        out.push('\n');

        out.push_str("### Average Price Comparison Between Products\n\n");
        out.push_str("| Product | Name | Avg Price |\n|---|---|---|\n");
        for entry in summary.ranked_by_price() {
            let _ = writeln!(
                out,
                "| {} | {} | {}{:.2} |",
                entry.label,
                table_cell(&entry.product_name),
                self.currency_symbol,
                entry.mean_price
            );
        }
        out.push('\n');
    }
}

// Keeps free text from breaking out of a table row.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new("₹")
    }
}
