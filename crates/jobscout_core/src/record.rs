use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Substituted when a listing has no extractable company.
pub const PLACEHOLDER_COMPANY: &str = "Company Name";
/// Substituted when a listing has no extractable location.
pub const PLACEHOLDER_LOCATION: &str = "Location";
/// Recency label for every record; listings carry no parsed date.
pub const DEFAULT_POSTED: &str = "Recent";

/// Column order of the tabular export.
pub const CSV_HEADER: [&str; 6] = ["Title", "Company", "Location", "Source", "URL", "Posted"];

/// External job-listing origin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Source {
    Internshala,
    Naukri,
    Indeed,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Internshala, Source::Naukri, Source::Indeed];

    pub fn label(self) -> &'static str {
        match self {
            Source::Internshala => "Internshala",
            Source::Naukri => "Naukri.com",
            Source::Indeed => "Indeed",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl fmt::Display for UnknownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown source '{}'", self.0)
    }
}

impl std::error::Error for UnknownSource {}

impl FromStr for Source {
    type Err = UnknownSource;

    /// Accepts the display label or the bare name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Source::ALL
            .into_iter()
            .find(|source| {
                source.label().eq_ignore_ascii_case(wanted)
                    || format!("{source:?}").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

/// One normalized job posting.
///
/// `title`, `company`, `location` and `url` are never blank: constructors
/// substitute placeholders instead of storing empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: Source,
    pub url: String,
    pub posted: String,
    /// Stand-in generated because the source produced nothing usable.
    pub synthetic: bool,
}

impl JobRecord {
    /// Builds a record from extracted listing fields.
    ///
    /// Returns `None` when the title or url is blank; blank company and
    /// location are replaced by their placeholders.
    pub fn extracted(
        source: Source,
        title: &str,
        company: Option<&str>,
        location: Option<&str>,
        url: &str,
    ) -> Option<Self> {
        let title = non_blank(Some(title))?;
        let url = non_blank(Some(url))?;
        Some(Self {
            title,
            company: non_blank(company).unwrap_or_else(|| PLACEHOLDER_COMPANY.to_string()),
            location: non_blank(location).unwrap_or_else(|| PLACEHOLDER_LOCATION.to_string()),
            source,
            url,
            posted: DEFAULT_POSTED.to_string(),
            synthetic: false,
        })
    }

    /// Builds a placeholder record. Labels come from a fixed template and are
    /// never blank.
    pub fn synthetic(
        source: Source,
        title: String,
        company: String,
        location: String,
        url: String,
    ) -> Self {
        Self {
            title,
            company,
            location,
            source,
            url,
            posted: DEFAULT_POSTED.to_string(),
            synthetic: true,
        }
    }

    pub fn has_blank_field(&self) -> bool {
        [&self.title, &self.company, &self.location, &self.url]
            .iter()
            .any(|field| field.trim().is_empty())
    }

    /// Cells in [`CSV_HEADER`] order.
    pub fn csv_row(&self) -> [&str; 6] {
        [
            &self.title,
            &self.company,
            &self.location,
            self.source.label(),
            &self.url,
            &self.posted,
        ]
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
