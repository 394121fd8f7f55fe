use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two named date collections held in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Available,
    Occupied,
}

impl Collection {
    /// JSON key used both on disk and in request/response bodies.
    pub fn field(self) -> &'static str {
        match self {
            Collection::Available => "availableDates",
            Collection::Occupied => "occupiedDates",
        }
    }

    pub fn path_segment(self) -> &'static str {
        match self {
            Collection::Available => "available",
            Collection::Occupied => "occupied",
        }
    }

    /// Capitalised name for user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Available => "Available",
            Collection::Occupied => "Occupied",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// The whole persisted state. Field order here is the key order on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    pub available_dates: Vec<String>,
    pub occupied_dates: Vec<String>,
}

impl StoreDocument {
    pub fn dates(&self, collection: Collection) -> &[String] {
        match collection {
            Collection::Available => &self.available_dates,
            Collection::Occupied => &self.occupied_dates,
        }
    }

    pub fn dates_mut(&mut self, collection: Collection) -> &mut Vec<String> {
        match collection {
            Collection::Available => &mut self.available_dates,
            Collection::Occupied => &mut self.occupied_dates,
        }
    }
}

/// Union `incoming` into `existing`, keeping the first occurrence of each date.
/// Duplicates already present in `existing` are collapsed too.
pub fn merge_unique<I>(existing: &mut Vec<String>, incoming: I)
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let merged: Vec<String> = existing
        .drain(..)
        .chain(incoming)
        .filter(|d| seen.insert(d.clone()))
        .collect();
    *existing = merged;
}
