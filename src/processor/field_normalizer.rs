use crate::models::{NormalizedRecord, Numeric, RawField, ReviewRecord};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

// Shortest symbol prefix ("₹", "Rs. ", "$") before the amount ("5", "-5", ".5").
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>[^0-9]*?)(?P<amount>[+\-]?\.?[0-9].*)$").expect("valid currency regex")
});

/// Coerces the numeric review columns. Never fails and never drops a row.
pub struct FieldNormalizer;

impl FieldNormalizer {
    pub fn normalize(&self, records: &[ReviewRecord]) -> Vec<NormalizedRecord> {
        let normalized: Vec<NormalizedRecord> =
            records.iter().map(|r| self.normalize_record(r)).collect();

        let unparseable_prices = normalized.iter().filter(|r| r.price.is_unparseable()).count();
        let unparseable_ratings = normalized.iter().filter(|r| r.rating.is_unparseable()).count();
        debug!(
            "Normalized {} records ({} unparseable prices, {} unparseable ratings)",
            normalized.len(),
            unparseable_prices,
            unparseable_ratings
        );

        normalized
    }

    pub fn normalize_record(&self, record: &ReviewRecord) -> NormalizedRecord {
        NormalizedRecord {
            product_name: record.product_name.clone().unwrap_or_default(),
            overall_rating: self.parse_rating(record.overall_rating.as_ref()),
            price: self.parse_price(record.price.as_ref()),
            rating: self.parse_rating(record.rating.as_ref()),
            comment: record.comment.clone(),
            extra: record.extra.clone(),
        }
    }

    pub fn parse_rating(&self, field: Option<&RawField>) -> Numeric {
        match field {
            Some(RawField::Number(n)) => Numeric::from_f64(*n),
            Some(RawField::Text(s)) => parse_number(s.trim()),
            Some(RawField::Other(_)) | None => Numeric::Unparseable,
        }
    }

    pub fn parse_price(&self, field: Option<&RawField>) -> Numeric {
        match field {
            Some(RawField::Number(n)) => Numeric::from_f64(*n),
            Some(RawField::Text(s)) => {
                match strip_currency(s.trim()) {
                    Some(amount) => parse_number(amount.replace(',', "").trim()),
                    None => Numeric::Unparseable,
                }
            }
            Some(RawField::Other(_)) | None => Numeric::Unparseable,
        }
    }
}

/// Cuts the currency prefix off a price. A dot right after a letter ("Rs.")
/// is an abbreviation, not a decimal point.
fn strip_currency(s: &str) -> Option<&str> {
    let captures = AMOUNT.captures(s)?;
    let prefix = captures.name("prefix")?.as_str();
    let amount = captures.name("amount")?.as_str();

    if prefix.ends_with(char::is_alphabetic) {
        if let Some(rest) = amount.strip_prefix('.') {
            return Some(rest);
        }
    }
    Some(amount)
}

fn parse_number(s: &str) -> Numeric {
    f64::from_str(s).map_or(Numeric::Unparseable, Numeric::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Option<RawField> {
        Some(RawField::Text(s.to_string()))
    }

    #[test]
    fn test_price_normalization() {
        let normalizer = FieldNormalizer;

        assert_eq!(normalizer.parse_price(text("₹100").as_ref()), Numeric::Value(100.0));
        assert_eq!(normalizer.parse_price(text(" ₹1,299 ").as_ref()), Numeric::Value(1299.0));
        assert_eq!(normalizer.parse_price(text("$19.99").as_ref()), Numeric::Value(19.99));
        assert_eq!(normalizer.parse_price(text("Rs 450").as_ref()), Numeric::Value(450.0));
        assert_eq!(normalizer.parse_price(text("Rs. 450").as_ref()), Numeric::Value(450.0));
        assert_eq!(normalizer.parse_price(text("Rs.1,250.50").as_ref()), Numeric::Value(1250.5));
        assert_eq!(normalizer.parse_price(text("$.99").as_ref()), Numeric::Value(0.99));
        assert_eq!(normalizer.parse_price(text("-12").as_ref()), Numeric::Value(-12.0));
        assert_eq!(normalizer.parse_price(Some(RawField::Number(75.5)).as_ref()), Numeric::Value(75.5));
    }

    #[test]
    fn test_malformed_fields_become_unparseable() {
        let normalizer = FieldNormalizer;

        assert!(normalizer.parse_price(text("").as_ref()).is_unparseable());
        assert!(normalizer.parse_price(text("₹").as_ref()).is_unparseable());
        assert!(normalizer.parse_price(text("free").as_ref()).is_unparseable());
        assert!(normalizer.parse_price(text("-").as_ref()).is_unparseable());
        assert!(normalizer.parse_price(text("Rs.").as_ref()).is_unparseable());
        assert!(normalizer.parse_price(None).is_unparseable());
        assert!(normalizer.parse_rating(text("4.5 stars").as_ref()).is_unparseable());
        assert!(normalizer.parse_rating(text("NaN").as_ref()).is_unparseable());
        assert!(normalizer.parse_rating(text("inf").as_ref()).is_unparseable());
        assert!(normalizer.parse_rating(Some(RawField::Other(json!([1]))).as_ref()).is_unparseable());
    }

    #[test]
    fn test_rating_is_not_symbol_stripped() {
        let normalizer = FieldNormalizer;

        assert_eq!(normalizer.parse_rating(text(" 4 ").as_ref()), Numeric::Value(4.0));
        assert!(normalizer.parse_rating(text("★4").as_ref()).is_unparseable());
    }

    #[test]
    fn test_normalization_is_total_and_ordered() {
        let normalizer = FieldNormalizer;
        let records = vec![
            ReviewRecord::new("A").with_price("₹10").with_rating("5"),
            ReviewRecord::default(),
            ReviewRecord::new("B").with_price("oops").with_rating("bad"),
        ];

        let normalized = normalizer.normalize(&records);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].product_name, "A");
        assert_eq!(normalized[1].product_name, "");
        assert_eq!(normalized[2].product_name, "B");
        assert!(normalized[1].price.is_unparseable());
        assert!(normalized[2].rating.is_unparseable());
        assert!(normalizer.normalize(&[]).is_empty());
    }
}
