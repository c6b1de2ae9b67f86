//! Listing records and the assembler that builds them.
//!
//! The extraction step hands over one list of strings per field. Selector
//! queries on a results page can come back with different counts per field
//! (a listing without a distance badge, say), so the lists are zipped by
//! index and any position past the end of a short list becomes an empty
//! string.

use serde::{Deserialize, Serialize};

pub const FIELD_COUNT: usize = 5;

/// Column names of the snapshot file, in field order.
pub const HEADER: [&str; FIELD_COUNT] = ["Title", "Price", "Mileage", "City", "Distance"];

/// One listing as shown on the page. All fields are opaque display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub price: String,
    pub mileage: String,
    pub city: String,
    pub distance: String,
}

/// Identity of a listing across runs. City and distance are not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingKey<'a> {
    pub title: &'a str,
    pub price: &'a str,
    pub mileage: &'a str,
}

impl Listing {
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        mileage: impl Into<String>,
        city: impl Into<String>,
        distance: impl Into<String>,
    ) -> Self {
        Listing {
            title: title.into(),
            price: price.into(),
            mileage: mileage.into(),
            city: city.into(),
            distance: distance.into(),
        }
    }

    pub fn key(&self) -> ListingKey<'_> {
        ListingKey {
            title: &self.title,
            price: &self.price,
            mileage: &self.mileage,
        }
    }

    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            self.title.as_str(),
            self.price.as_str(),
            self.mileage.as_str(),
            self.city.as_str(),
            self.distance.as_str(),
        ]
    }

    /// Build a listing from a stored row. Returns `None` for rows with fewer
    /// than five fields; extra trailing fields are ignored.
    pub fn from_row<'a, I>(row: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = row.into_iter();
        Some(Listing {
            title: fields.next()?.to_string(),
            price: fields.next()?.to_string(),
            mileage: fields.next()?.to_string(),
            city: fields.next()?.to_string(),
            distance: fields.next()?.to_string(),
        })
    }
}

/// Raw extraction output: one list per field, lengths may differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLists {
    pub titles: Vec<String>,
    pub prices: Vec<String>,
    pub mileages: Vec<String>,
    pub cities: Vec<String>,
    pub distances: Vec<String>,
}

impl FieldLists {
    fn columns(&self) -> [&[String]; FIELD_COUNT] {
        [
            self.titles.as_slice(),
            self.prices.as_slice(),
            self.mileages.as_slice(),
            self.cities.as_slice(),
            self.distances.as_slice(),
        ]
    }

    /// Length of the longest list, which is the number of listings assembled.
    pub fn row_count(&self) -> usize {
        self.columns().iter().map(|c| c.len()).max().unwrap_or(0)
    }
}

/// Zip the field lists into listings, padding short lists with empty strings.
pub fn assemble(fields: &FieldLists) -> Vec<Listing> {
    let cell = |column: &[String], i: usize| column.get(i).cloned().unwrap_or_default();

    (0..fields.row_count())
        .map(|i| Listing {
            title: cell(&fields.titles, i),
            price: cell(&fields.prices, i),
            mileage: cell(&fields.mileages, i),
            city: cell(&fields.cities, i),
            distance: cell(&fields.distances, i),
        })
        .collect()
}
