use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A raw scraped field: the scraper emits numbers, strings, or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    Other(Value),
}

/// One scraped review row as it sits in the document store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(default, alias = "Product Name", deserialize_with = "lenient_text")]
    pub product_name: Option<String>,
    #[serde(default, alias = "Over_All_Rating")]
    pub overall_rating: Option<RawField>,
    #[serde(default, alias = "Price")]
    pub price: Option<RawField>,
    #[serde(default, alias = "Rating")]
    pub rating: Option<RawField>,
    #[serde(default, alias = "Comment", deserialize_with = "lenient_text")]
    pub comment: Option<String>,
    /// Columns the report never looks at (`_id`, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads a text column that scrapers sometimes fill with numbers: `12345`
/// becomes `"12345"`, `null` stays absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl ReviewRecord {
    pub fn new(product_name: &str) -> Self {
        Self {
            product_name: Some(product_name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_rating(mut self, rating: &str) -> Self {
        self.rating = Some(RawField::Text(rating.to_string()));
        self
    }

    pub fn with_overall_rating(mut self, rating: &str) -> Self {
        self.overall_rating = Some(RawField::Text(rating.to_string()));
        self
    }

    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Some(RawField::Text(price.to_string()));
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

/// A numeric column value after coercion.
///
/// `Unparseable` is the explicit "missing or malformed" marker. It is never
/// treated as zero: means and histograms skip it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Value(f64),
    Unparseable,
}

impl Numeric {
    /// Wraps a float, mapping NaN and infinities to `Unparseable`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Numeric::Value(value)
        } else {
            Numeric::Unparseable
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(v),
            Numeric::Unparseable => None,
        }
    }

    pub fn is_unparseable(self) -> bool {
        matches!(self, Numeric::Unparseable)
    }

    /// Arithmetic mean over the parseable values only.
    pub fn mean<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Numeric>,
    {
        let (sum, count) = values
            .into_iter()
            .filter_map(Numeric::value)
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            Numeric::Unparseable
        } else {
            Numeric::from_f64(sum / count as f64)
        }
    }
}

impl From<Option<f64>> for Numeric {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Numeric::Unparseable, Numeric::from_f64)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Value(v) => serializer.serialize_f64(*v),
            Numeric::Unparseable => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Numeric::Unparseable => write!(f, "nan"),
        }
    }
}

/// A review row with its numeric columns coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub product_name: String,
    pub overall_rating: Numeric,
    pub price: Numeric,
    pub rating: Numeric,
    pub comment: Option<String>,
    pub extra: Map<String, Value>,
}
