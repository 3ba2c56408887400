//! Identifiers issued by the booking backend.

use serde::{Deserialize, Serialize};

/// Booking number as issued by the booking API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingNumber(String);

impl BookingNumber {
    /// Create a booking number from its backend representation.
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into().trim().to_string())
    }

    /// Borrow the raw number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for BookingNumber {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for BookingNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_number_trims_whitespace() {
        let number = BookingNumber::new("  HA-1042\n");
        assert_eq!(number.as_str(), "HA-1042");
        assert_eq!(number.to_string(), "HA-1042");
    }

    #[test]
    fn test_booking_number_serializes_as_plain_string() {
        let number: BookingNumber = "HA-7".parse().unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "\"HA-7\"");
    }
}
