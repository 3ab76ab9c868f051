//! Per-day donation aggregates

use crate::error::{DonsError, Result};
use std::collections::btree_map::{self, BTreeMap};

/// Count and total of the donations received on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregate {
    quantity: u64,
    sum: u64,
}

impl DailyAggregate {
    /// Build an aggregate, refusing a zero count since the average would be undefined
    pub fn new(day: &str, quantity: u64, sum: u64) -> Result<Self> {
        if quantity == 0 {
            return Err(DonsError::DivisionByZero {
                day: day.to_string(),
            });
        }
        Ok(DailyAggregate { quantity, sum })
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Average donation, rounded to two decimals
    pub fn avg(&self) -> f64 {
        let raw = self.sum as f64 / self.quantity as f64;
        (raw * 100.0).round_ties_even() / 100.0
    }
}

/// Two-digit key used for a day of the month
pub fn day_key(day: u32) -> String {
    format!("{:02}", day)
}

/// Day aggregates keyed by two-digit day, iterated in ascending key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyAggregates {
    days: BTreeMap<String, DailyAggregate>,
}

impl DailyAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a day, returning the aggregate it replaced if the day was already known
    pub fn insert(&mut self, day: String, aggregate: DailyAggregate) -> Option<DailyAggregate> {
        self.days.insert(day, aggregate)
    }

    pub fn get(&self, day: &str) -> Option<&DailyAggregate> {
        self.days.get(day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DailyAggregate> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a DailyAggregates {
    type Item = (&'a String, &'a DailyAggregate);
    type IntoIter = btree_map::Iter<'a, String, DailyAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_rounded_to_two_decimals() {
        let first = DailyAggregate::new("01", 8, 370).unwrap();
        let second = DailyAggregate::new("02", 43, 5682).unwrap();
        assert_eq!(first.avg(), 46.25);
        assert_eq!(second.avg(), 132.14);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        match DailyAggregate::new("09", 0, 120) {
            Err(DonsError::DivisionByZero { day }) => assert_eq!(day, "09"),
            other => panic!("Expected DivisionByZero, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_follows_day_order_not_insertion_order() {
        let mut days = DailyAggregates::new();
        days.insert("12".to_string(), DailyAggregate::new("12", 1, 10).unwrap());
        days.insert("02".to_string(), DailyAggregate::new("02", 2, 20).unwrap());
        days.insert("31".to_string(), DailyAggregate::new("31", 3, 30).unwrap());

        let keys: Vec<&str> = days.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["02", "12", "31"]);
    }

    #[test]
    fn test_second_insert_overwrites() {
        let mut days = DailyAggregates::new();
        let first = DailyAggregate::new("05", 1, 10).unwrap();
        let second = DailyAggregate::new("05", 4, 100).unwrap();

        assert!(days.insert("05".to_string(), first).is_none());
        assert_eq!(days.insert("05".to_string(), second), Some(first));
        assert_eq!(days.len(), 1);
        assert_eq!(days.get("05"), Some(&second));
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        // 25.125 and 1.125 sit exactly between two cents
        assert_eq!(DailyAggregate::new("01", 40, 1005).unwrap().avg(), 25.12);
        assert_eq!(DailyAggregate::new("01", 8, 9).unwrap().avg(), 1.12);
        // 0.375 goes up to the even cent
        assert_eq!(DailyAggregate::new("01", 8, 3).unwrap().avg(), 0.38);
    }

    #[test]
    fn test_day_key_is_zero_padded() {
        assert_eq!(day_key(3), "03");
        assert_eq!(day_key(28), "28");
    }
}
