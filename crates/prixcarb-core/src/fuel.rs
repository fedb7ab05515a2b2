use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::CoreError;

/// Fuel types published by the feed.
///
/// The discriminant is the stable ordinal used when serializing; the
/// canonical name is the uppercase label used in the feed's `nom` attribute
/// and as the key in department metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelType {
    Gazole = 1,
    Sp95 = 2,
    E85 = 3,
    Gplc = 4,
    E10 = 5,
    Sp98 = 6,
}

impl FuelType {
    /// Every fuel type, in ordinal order.
    pub const ALL: [FuelType; 6] = [
        FuelType::Gazole,
        FuelType::Sp95,
        FuelType::E85,
        FuelType::Gplc,
        FuelType::E10,
        FuelType::Sp98,
    ];

    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Canonical uppercase name, e.g. `"GAZOLE"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FuelType::Gazole => "GAZOLE",
            FuelType::Sp95 => "SP95",
            FuelType::E85 => "E85",
            FuelType::Gplc => "GPLC",
            FuelType::E10 => "E10",
            FuelType::Sp98 => "SP98",
        }
    }

    /// Looks up a fuel type by name, ignoring case (`"Gazole"`, `"GPLc"`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownEnumValue`] if the name matches no member.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let upper = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|fuel| fuel.name() == upper)
            .ok_or_else(|| CoreError::UnknownEnumValue {
                kind: "fuel type",
                value: name.to_string(),
            })
    }

    /// Looks up a fuel type by its ordinal (1 to 6).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownEnumValue`] for any other ordinal.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|fuel| fuel.ordinal() == ordinal)
            .ok_or_else(|| CoreError::UnknownEnumValue {
                kind: "fuel type",
                value: ordinal.to_string(),
            })
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FuelType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Serialize for FuelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}
