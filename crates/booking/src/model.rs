use serde::{Deserialize, Serialize};

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: u64,
    pub from: String,
    pub to: String,
    /// Departure, RFC 3339.
    pub date: String,
    #[serde(default)]
    pub delayed: bool,
}

/// Search criteria from the flight search screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlightFilter {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub urgent: bool,
}

impl FlightFilter {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            urgent: false,
        }
    }

    pub fn urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    /// Both endpoints present (after trimming).
    pub fn is_complete(&self) -> bool {
        !self.from.trim().is_empty() && !self.to.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_requires_both_endpoints() {
        assert!(FlightFilter::new("Hamburg", "Graz").is_complete());
        assert!(!FlightFilter::new("Hamburg", "  ").is_complete());
        assert!(!FlightFilter::new("", "Graz").is_complete());
    }

    #[test]
    fn delayed_defaults_to_false() {
        let flight: Flight = serde_json::from_str(
            r#"{"id":3,"from":"Hamburg","to":"Graz","date":"2026-10-14T08:00:00.000Z"}"#,
        )
        .unwrap();
        assert!(!flight.delayed);
    }
}
