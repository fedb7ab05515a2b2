//! French administrative departments, derived from postcodes.
//!
//! Corsica shares the `20` postcode prefix but is split into two departments,
//! `2A` (Corse-du-Sud, postcodes below 20200) and `2B` (Haute-Corse).

use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use crate::error::ReportError;

const CORSICA_START: u32 = 20_000;
const HAUTE_CORSE_START: u32 = 20_200;
const CORSICA_END: u32 = 21_000;

/// Last department number of metropolitan France.
const LAST_METROPOLITAN: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    /// Numbered department, e.g. `75` for Paris.
    Numbered(u8),
    /// `2A`
    CorseDuSud,
    /// `2B`
    HauteCorse,
}

impl Department {
    /// Derives the department of a postcode.
    ///
    /// Postcodes may be numeric (`"20090"`) or carry the Corsican code
    /// literally (`"2A004"`).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidPostcode`] for non-numeric postcodes and
    /// for numbers that do not yield a department between 1 and 255, so
    /// `"00500"` (department 0) is invalid.
    pub fn from_postcode(postcode: &str) -> Result<Self, ReportError> {
        let trimmed = postcode.trim();
        let invalid = || ReportError::InvalidPostcode {
            postcode: postcode.to_string(),
        };

        let prefix = trimmed.get(..2).map(str::to_ascii_uppercase);
        match prefix.as_deref() {
            Some("2A") => return Ok(Department::CorseDuSud),
            Some("2B") => return Ok(Department::HauteCorse),
            _ => {}
        }

        let number: u32 = trimmed.parse().map_err(|_| invalid())?;
        if (CORSICA_START..HAUTE_CORSE_START).contains(&number) {
            return Ok(Department::CorseDuSud);
        }
        if (HAUTE_CORSE_START..CORSICA_END).contains(&number) {
            return Ok(Department::HauteCorse);
        }
        match u8::try_from(number / 1000) {
            Ok(0) | Err(_) => Err(invalid()),
            Ok(n) => Ok(Department::Numbered(n)),
        }
    }

    /// Every department of metropolitan France, in display order.
    #[must_use]
    pub fn metropolitan() -> Vec<Department> {
        (1..=LAST_METROPOLITAN)
            .flat_map(|n| match n {
                20 => vec![Department::CorseDuSud, Department::HauteCorse],
                n => vec![Department::Numbered(n)],
            })
            .collect()
    }

    /// Display code: two digits (`"01"`, `"75"`) or `"2A"`/`"2B"`.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Department::Numbered(n) => format!("{n:02}"),
            Department::CorseDuSud => "2A".to_string(),
            Department::HauteCorse => "2B".to_string(),
        }
    }

    /// Corsica sorts where department 20 used to be.
    fn sort_key(self) -> u16 {
        match self {
            Department::Numbered(n) => u16::from(n) * 10,
            Department::CorseDuSud => 201,
            Department::HauteCorse => 202,
        }
    }
}

impl Ord for Department {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Department {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for Department {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}
