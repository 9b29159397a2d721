//! European Legislation Identifier
//!
//! The ELI is derived on demand from a norm's metadata sections and never
//! stored: gazette and page come from the print announcement nested under
//! the official reference, the citation date from its own section, and the
//! announcement year from either an explicit YEAR metadatum or the year of
//! the announcement DATE. Gazette names map to canonical medium codes
//! through a fixed table; unmapped names are an error, never a fallback.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::metadata_section::MetadataSectionName;
use crate::domain::metadatum::MetadatumType;
use crate::domain::norm::Norm;
use crate::error::{EliError, ValueError};

/// Gazette name to canonical ELI medium code. Closed table; extend only by
/// adding entries.
fn gazette_medium(gazette: &str) -> Option<&'static str> {
    match gazette {
        "BGBl I" => Some("bgbl-1"),
        "BGBl II" => Some("bgbl-2"),
        "BGBl III" => Some("bgbl-3"),
        "BAnz" => Some("banz"),
        _ => None,
    }
}

/// Structured legal identifier derived from publication metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eli {
    pub gazette: String,
    pub medium: String,
    pub citation_date: Option<NaiveDate>,
    pub announcement_year: i32,
    pub page: String,
}

impl Eli {
    /// Derive the ELI from the norm's current metadata sections.
    ///
    /// Pure and side-effect free; callers re-derive instead of caching so
    /// the identifier stays consistent with the metadata it is read from.
    pub fn from_norm(norm: &Norm) -> Result<Self, EliError> {
        let gazette = norm
            .first_metadatum_in(
                MetadataSectionName::OfficialReference,
                MetadataSectionName::PrintAnnouncement,
                MetadatumType::AnnouncementGazette,
            )
            .and_then(|metadatum| metadatum.value.as_text())
            .ok_or(EliError::MissingGazette)?;

        let page = norm
            .first_metadatum_in(
                MetadataSectionName::OfficialReference,
                MetadataSectionName::PrintAnnouncement,
                MetadatumType::Page,
            )
            .and_then(|metadatum| metadatum.value.as_text())
            .ok_or(EliError::MissingPage)?;

        let medium = gazette_medium(gazette)
            .ok_or_else(|| EliError::UnknownGazette(gazette.to_string()))?;

        let citation_date = norm
            .first_metadatum(MetadataSectionName::CitationDate, MetadatumType::Date)
            .and_then(|metadatum| metadatum.value.as_date());

        let announcement_year = announcement_year(norm)?;

        Ok(Self {
            gazette: gazette.to_string(),
            medium: medium.to_string(),
            citation_date,
            announcement_year,
            page: page.to_string(),
        })
    }
}

/// An explicit YEAR metadatum wins over the year of the DATE metadatum when
/// both are present in the announcement date section.
fn announcement_year(norm: &Norm) -> Result<i32, EliError> {
    if let Some(year) = norm.first_metadatum(MetadataSectionName::AnnouncementDate, MetadatumType::Year)
    {
        let raw = year.value.as_text().unwrap_or_default();
        let parsed = raw.parse::<i32>().map_err(|_| ValueError::InvalidYear {
            value: raw.to_string(),
        })?;
        return Ok(parsed);
    }

    norm.first_metadatum(MetadataSectionName::AnnouncementDate, MetadatumType::Date)
        .and_then(|metadatum| metadatum.value.as_date())
        .map(|date| date.year())
        .ok_or(EliError::MissingAnnouncementYear)
}

impl fmt::Display for Eli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eli/{}/{}/s{}", self.medium, self.announcement_year, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gazette_medium_table() {
        assert_eq!(gazette_medium("BGBl I"), Some("bgbl-1"));
        assert_eq!(gazette_medium("BGBl II"), Some("bgbl-2"));
        assert_eq!(gazette_medium("BAnz"), Some("banz"));
        assert_eq!(gazette_medium("Unknown Gazette"), None);
    }
}
