//! Booking records and the per-property dataset they are grouped into.

use std::collections::{btree_map, BTreeMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single reservation row, normalised from the raw feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub month_tag: i32,
    pub nights: f64,
    pub adults: f64,
    pub price_per_night: f64,
    pub revenue: f64,
    pub payment_channel: String,
    pub tourist_tax: f64,
    pub taxable_nights: f64,
}

impl BookingRecord {
    /// Creates a record checked in on `check_in` with every other field zeroed.
    pub fn new(name: impl Into<String>, check_in: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            check_in,
            check_out: None,
            month_tag: check_in.map(|date| date.month() as i32).unwrap_or(0),
            nights: 0.0,
            adults: 0.0,
            price_per_night: 0.0,
            revenue: 0.0,
            payment_channel: String::new(),
            tourist_tax: 0.0,
            taxable_nights: 0.0,
        }
    }

    pub fn with_stay(mut self, nights: f64, adults: f64) -> Self {
        self.nights = nights;
        self.adults = adults;
        self
    }

    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = revenue;
        self
    }

    pub fn with_payment(mut self, channel: impl Into<String>) -> Self {
        self.payment_channel = channel.into();
        self
    }

    pub fn check_in_year(&self) -> Option<i32> {
        self.check_in.map(|date| date.year())
    }

    /// Calendar month (1-12) of the check-in date.
    pub fn check_in_month(&self) -> Option<u32> {
        self.check_in.map(|date| date.month())
    }

    /// Nights multiplied by adult occupants.
    pub fn guest_nights(&self) -> f64 {
        self.nights * self.adults
    }
}

/// Bookings grouped by property name. Row order within a property follows
/// the source feed and is not guaranteed to be chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyDataset {
    properties: BTreeMap<String, Vec<BookingRecord>>,
}

impl PropertyDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, records: Vec<BookingRecord>) {
        self.properties.insert(property.into(), records);
    }

    /// Records for `property`, or an empty slice when the property is unknown.
    pub fn records(&self, property: &str) -> &[BookingRecord] {
        self.properties
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<BookingRecord>> {
        self.properties.iter()
    }

    /// A copy of the dataset restricted to a single property.
    pub fn only(&self, property: &str) -> Self {
        let mut slice = Self::new();
        if let Some(records) = self.properties.get(property) {
            slice.insert(property, records.clone());
        }
        slice
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.properties.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<BookingRecord>)> for PropertyDataset {
    fn from_iter<I: IntoIterator<Item = (String, Vec<BookingRecord>)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyDataset {
    type Item = (&'a String, &'a Vec<BookingRecord>);
    type IntoIter = btree_map::Iter<'a, String, Vec<BookingRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
