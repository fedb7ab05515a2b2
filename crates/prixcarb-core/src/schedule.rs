use serde::{Serialize, Serializer};

use crate::CoreError;

/// Day of the week, numbered 1 (Monday) to 7 (Sunday) like the feed's `jour id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekDay {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Monday => "MONDAY",
            WeekDay::Tuesday => "TUESDAY",
            WeekDay::Wednesday => "WEDNESDAY",
            WeekDay::Thursday => "THURSDAY",
            WeekDay::Friday => "FRIDAY",
            WeekDay::Saturday => "SATURDAY",
            WeekDay::Sunday => "SUNDAY",
        }
    }

    /// French label as written in the feed's `jour nom` attribute.
    #[must_use]
    pub fn french_name(self) -> &'static str {
        match self {
            WeekDay::Monday => "LUNDI",
            WeekDay::Tuesday => "MARDI",
            WeekDay::Wednesday => "MERCREDI",
            WeekDay::Thursday => "JEUDI",
            WeekDay::Friday => "VENDREDI",
            WeekDay::Saturday => "SAMEDI",
            WeekDay::Sunday => "DIMANCHE",
        }
    }

    /// Looks up a day by its English or French name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownEnumValue`] if the name matches no day.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let upper = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|day| day.name() == upper || day.french_name() == upper)
            .ok_or_else(|| CoreError::UnknownEnumValue {
                kind: "week day",
                value: name.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownEnumValue`] outside of 1 to 7.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|day| day.ordinal() == ordinal)
            .ok_or_else(|| CoreError::UnknownEnumValue {
                kind: "week day",
                value: ordinal.to_string(),
            })
    }
}

impl std::fmt::Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for WeekDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}

/// One opening interval, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpeningHours {
    pub open_minute: u16,
    pub close_minute: u16,
}

/// Opening schedule of a sale point for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkDay {
    pub day: WeekDay,
    pub closed: bool,
    /// Disjoint intervals, in feed order.
    pub opening_hours: Vec<OpeningHours>,
}
