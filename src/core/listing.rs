//! Listing helpers - Ordering specs and page windows shared by queries.
//!
//! An ordering spec is a comma-separated list of field names where a `-`
//! prefix flips the direction, e.g. `"-placed_at,total"`. Each listing
//! passes its own name-to-column map, so callers can only sort by fields
//! that listing exposes.

use crate::errors::{Error, Result};
use sea_orm::Order;

/// Parses an ordering spec against a listing's sortable fields.
///
/// Empty segments are skipped so trailing commas are harmless. A name
/// outside `fields` is rejected rather than ignored; silently dropping a
/// sort key would reorder results behind the caller's back.
pub fn parse_ordering<C: Copy>(spec: &str, fields: &[(&str, C)]) -> Result<Vec<(C, Order)>> {
    let mut keys = Vec::new();
    for segment in spec.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (name, direction) = match segment.strip_prefix('-') {
            Some(rest) => (rest, Order::Desc),
            None => (segment, Order::Asc),
        };
        let column = fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, column)| *column)
            .ok_or_else(|| Error::UnknownOrderingField {
                field: name.to_string(),
            })?;
        keys.push((column, direction));
    }
    Ok(keys)
}

/// A validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number, starting at 1
    pub number: u64,
    /// Rows per page
    pub size: u64,
}

impl Page {
    /// Builds a page window, rejecting zero for either bound.
    pub fn new(number: u64, size: u64) -> Result<Self> {
        if number == 0 || size == 0 {
            return Err(Error::InvalidPage {
                page: number,
                per_page: size,
            });
        }
        Ok(Self { number, size })
    }

    /// Zero-based index for paginator calls.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.number - 1
    }

    /// Row offset of the window's first row.
    ///
    /// `None` when `index * size` does not fit in a `u64`; such a window
    /// lies past the end of any table.
    #[must_use]
    pub const fn offset(self) -> Option<u64> {
        self.index().checked_mul(self.size)
    }
}
