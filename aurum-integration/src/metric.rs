use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Point-in-time measurement, eg/ Http request round trip duration.
#[derive(Debug, Clone, PartialOrd, PartialEq, Serialize)]
pub struct Metric {
    /// Metric name.
    pub name: &'static str,

    /// Milliseconds since the Unix epoch.
    pub time: u64,

    /// Key-Value pairs to categorise the Metric.
    pub tags: Vec<Tag>,

    /// Observed measurements.
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Serialize, Ord, PartialOrd, Eq, PartialEq)]
pub struct Tag {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialOrd, PartialEq, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub value: u64,
}

impl Tag {
    pub fn new<S>(key: &'static str, value: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            key,
            value: value.into(),
        }
    }
}

impl Field {
    pub fn new(key: &'static str, value: u64) -> Self {
        Self { key, value }
    }
}

impl Metric {
    /// Find the value of the [`Field`] with the provided key, if present.
    pub fn field(&self, key: &str) -> Option<u64> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value)
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for tag in &self.tags {
            write!(f, ",{}={}", tag.key, tag.value)?;
        }
        for (index, field) in self.fields.iter().enumerate() {
            let separator = if index == 0 { ' ' } else { ',' };
            write!(f, "{separator}{}={}", field.key, field.value)?;
        }
        write!(f, " {}", self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_display_line_protocol() {
        let metric = Metric {
            name: "http_request_duration",
            time: 1700000000000,
            tags: vec![
                Tag::new("http_method", "GET"),
                Tag::new("path", "/fapi/v1/klines"),
            ],
            fields: vec![Field::new("duration", 42)],
        };

        assert_eq!(
            metric.to_string(),
            "http_request_duration,http_method=GET,path=/fapi/v1/klines duration=42 1700000000000"
        );
        assert_eq!(metric.field("duration"), Some(42));
        assert_eq!(metric.field("missing"), None);
    }
}
