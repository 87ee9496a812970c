//! Parsing and range checks for console input.
//!
//! # Invariants
//! - Everything here runs before the facade is called; a `ValidationError`
//!   never reaches the store.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date format accepted for exhibition dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Malformed or out-of-range user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidId(String),
    InvalidDiscount(String),
    InvalidDate(String),
    InvalidPrice(String),
    UnknownVisitor(i64),
    UnknownExhibition(i64),
    NoVisitors,
    NoExhibitions,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "`{value}` is not a valid ID"),
            Self::InvalidDiscount(value) => {
                write!(f, "discount must be a whole number from 0 to 100, got `{value}`")
            }
            Self::InvalidDate(value) => {
                write!(f, "date must use the yyyy-mm-dd format, got `{value}`")
            }
            Self::InvalidPrice(value) => {
                write!(f, "price must be a positive number, got `{value}`")
            }
            Self::UnknownVisitor(id) => write!(f, "no visitor with ID {id}"),
            Self::UnknownExhibition(id) => write!(f, "no exhibition with ID {id}"),
            Self::NoVisitors => write!(f, "cannot add a ticket: there are no visitors"),
            Self::NoExhibitions => write!(f, "cannot add a ticket: there are no exhibitions"),
        }
    }
}

impl Error for ValidationError {}

pub fn parse_id(value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(value.trim().to_string()))
}

pub fn parse_discount(value: &str) -> Result<i32, ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(discount) if (0..=100).contains(&discount) => Ok(discount),
        _ => Err(ValidationError::InvalidDiscount(value.trim().to_string())),
    }
}

/// Parses `yyyy-mm-dd` into UTC midnight of that day.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ValidationError::InvalidDate(value.trim().to_string()))
}

pub fn parse_price(value: &str) -> Result<f64, ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice(value.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id(" 42 "), Ok(42));
        assert_eq!(
            parse_id("4x"),
            Err(ValidationError::InvalidId("4x".to_string()))
        );
    }

    #[test]
    fn discount_bounds_are_inclusive() {
        assert_eq!(parse_discount("0"), Ok(0));
        assert_eq!(parse_discount("100"), Ok(100));
        assert!(parse_discount("101").is_err());
        assert!(parse_discount("-1").is_err());
        assert!(parse_discount("12.5").is_err());
    }

    #[test]
    fn dates_parse_to_utc_midnight() {
        let date = parse_date("2025-03-14").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 3, 14));
        assert_eq!(date.hour(), 0);
        assert!(parse_date("14.03.2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn prices_must_be_positive_and_finite() {
        assert_eq!(parse_price("12.50"), Ok(12.5));
        assert!(parse_price("0").is_err());
        assert!(parse_price("-3").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("cheap").is_err());
    }
}
