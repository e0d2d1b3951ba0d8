//! Type-safe enumerations for listings metadata.
//!
//! These enums give compile-time safety to concepts that arrive as free
//! text in the raw export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ten administrative districts of Barcelona.
///
/// Every recognized neighbourhood resolves to exactly one district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum District {
    CiutatVella,
    Eixample,
    SantsMontjuic,
    LesCorts,
    SarriaSantGervasi,
    Gracia,
    HortaGuinardo,
    NouBarris,
    SantAndreu,
    SantMarti,
}

impl District {
    /// All districts in official numbering order (1 to 10).
    pub const ALL: [District; 10] = [
        District::CiutatVella,
        District::Eixample,
        District::SantsMontjuic,
        District::LesCorts,
        District::SarriaSantGervasi,
        District::Gracia,
        District::HortaGuinardo,
        District::NouBarris,
        District::SantAndreu,
        District::SantMarti,
    ];

    /// Returns the district label written to the cleaned dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            District::CiutatVella => "Ciutat Vella",
            District::Eixample => "Eixample",
            District::SantsMontjuic => "Sants-Montjuïc",
            District::LesCorts => "Les Corts",
            District::SarriaSantGervasi => "Sarrià-Sant Gervasi",
            District::Gracia => "Gràcia",
            District::HortaGuinardo => "Horta-Guinardó",
            District::NouBarris => "Nou Barris",
            District::SantAndreu => "Sant Andreu",
            District::SantMarti => "Sant Martí",
        }
    }

    /// Official district number.
    pub fn number(&self) -> u8 {
        match self {
            District::CiutatVella => 1,
            District::Eixample => 2,
            District::SantsMontjuic => 3,
            District::LesCorts => 4,
            District::SarriaSantGervasi => 5,
            District::Gracia => 6,
            District::HortaGuinardo => 7,
            District::NouBarris => 8,
            District::SantAndreu => 9,
            District::SantMarti => 10,
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for District {
    type Err = String;

    /// Parse a district label (exact label, case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        District::ALL
            .into_iter()
            .find(|district| district.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unknown district: {s}"))
    }
}

/// Level of a statistics stratum, from most to least specific.
///
/// The derived ordering follows specificity: `PropertyDistrict` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StratumLevel {
    /// Grouped by property type and district.
    PropertyDistrict,
    /// Grouped by property type only.
    PropertyType,
    /// Grouped by district only.
    District,
    /// All observed records.
    Global,
}

impl StratumLevel {
    /// Default fallback order, most specific first.
    pub const FALLBACK_ORDER: [StratumLevel; 4] = [
        StratumLevel::PropertyDistrict,
        StratumLevel::PropertyType,
        StratumLevel::District,
        StratumLevel::Global,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StratumLevel::PropertyDistrict => "property_type+district",
            StratumLevel::PropertyType => "property_type",
            StratumLevel::District => "district",
            StratumLevel::Global => "global",
        }
    }
}

impl fmt::Display for StratumLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How quickly a host answers enquiries, as reported by the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostResponseTime {
    WithinAnHour,
    WithinAFewHours,
    WithinADay,
    AFewDaysOrMore,
}

impl HostResponseTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostResponseTime::WithinAnHour => "within an hour",
            HostResponseTime::WithinAFewHours => "within a few hours",
            HostResponseTime::WithinADay => "within a day",
            HostResponseTime::AFewDaysOrMore => "a few days or more",
        }
    }

    /// Responsiveness score in `[0.25, 1.0]`.
    pub fn score(&self) -> f64 {
        match self {
            HostResponseTime::WithinAnHour => 1.0,
            HostResponseTime::WithinAFewHours => 0.75,
            HostResponseTime::WithinADay => 0.5,
            HostResponseTime::AFewDaysOrMore => 0.25,
        }
    }
}

impl fmt::Display for HostResponseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HostResponseTime {
    type Err = String;

    /// Exact match on the export's wording.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "within an hour" => Ok(HostResponseTime::WithinAnHour),
            "within a few hours" => Ok(HostResponseTime::WithinAFewHours),
            "within a day" => Ok(HostResponseTime::WithinADay),
            "a few days or more" => Ok(HostResponseTime::AFewDaysOrMore),
            _ => Err(format!("Unknown host response time: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_labels_round_trip() {
        for district in District::ALL {
            assert_eq!(district.as_str().parse::<District>(), Ok(district));
        }
        assert_eq!("eixample".parse::<District>(), Ok(District::Eixample));
        assert!("Gotham".parse::<District>().is_err());
    }

    #[test]
    fn district_numbers_follow_official_order() {
        let numbers: Vec<u8> = District::ALL.iter().map(District::number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn stratum_levels_sort_by_specificity() {
        let mut levels = vec![
            StratumLevel::Global,
            StratumLevel::District,
            StratumLevel::PropertyDistrict,
            StratumLevel::PropertyType,
        ];
        levels.sort();
        assert_eq!(levels, StratumLevel::FALLBACK_ORDER.to_vec());
    }

    #[test]
    fn response_time_is_case_sensitive() {
        assert_eq!(
            "within a day".parse::<HostResponseTime>(),
            Ok(HostResponseTime::WithinADay)
        );
        assert!("Within a day".parse::<HostResponseTime>().is_err());
        assert_eq!(HostResponseTime::WithinAFewHours.score(), 0.75);
    }
}
