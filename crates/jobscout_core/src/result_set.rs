use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::{JobRecord, Source};

/// Ordering applied to the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Harvest order.
    #[default]
    Relevance,
    Company,
    Location,
    Source,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "company" => Ok(SortKey::Company),
            "location" => Ok(SortKey::Location),
            "source" => Ok(SortKey::Source),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Relevance => "relevance",
            SortKey::Company => "company",
            SortKey::Location => "location",
            SortKey::Source => "source",
        };
        f.write_str(name)
    }
}

/// Row filter; an empty set places no constraint on that column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultFilter {
    pub sources: BTreeSet<Source>,
    pub locations: BTreeSet<String>,
    pub companies: BTreeSet<String>,
}

impl ResultFilter {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.locations.is_empty() && self.companies.is_empty()
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        (self.sources.is_empty() || self.sources.contains(&record.source))
            && (self.locations.is_empty() || self.locations.contains(&record.location))
            && (self.companies.is_empty() || self.companies.contains(&record.company))
    }
}

/// Headline numbers over the whole (unfiltered) result set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSummary {
    pub total: usize,
    pub unique_companies: usize,
    pub sources: usize,
    pub locations: usize,
    pub per_source: BTreeMap<Source, usize>,
}

pub fn summarize(records: &[JobRecord]) -> ResultSummary {
    let mut per_source = BTreeMap::new();
    let mut companies = BTreeSet::new();
    let mut locations = BTreeSet::new();
    for record in records {
        *per_source.entry(record.source).or_insert(0) += 1;
        companies.insert(record.company.as_str());
        locations.insert(record.location.as_str());
    }
    ResultSummary {
        total: records.len(),
        unique_companies: companies.len(),
        sources: per_source.len(),
        locations: locations.len(),
        per_source,
    }
}

/// Sorted, filtered view over `records`. Sorting is stable, so ties keep
/// harvest order.
pub fn select<'a>(
    records: &'a [JobRecord],
    filter: &ResultFilter,
    sort: SortKey,
) -> Vec<&'a JobRecord> {
    let mut rows: Vec<&JobRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    match sort {
        SortKey::Relevance => {}
        SortKey::Company => rows.sort_by(|a, b| a.company.cmp(&b.company)),
        SortKey::Location => rows.sort_by(|a, b| a.location.cmp(&b.location)),
        SortKey::Source => rows.sort_by(|a, b| a.source.label().cmp(b.source.label())),
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: Source, title: &str, company: &str, location: &str) -> JobRecord {
        JobRecord::extracted(source, title, Some(company), Some(location), "https://x").unwrap()
    }

    fn sample() -> Vec<JobRecord> {
        vec![
            record(Source::Naukri, "A", "Zeta", "Pune"),
            record(Source::Indeed, "B", "Acme", "Delhi"),
            record(Source::Internshala, "C", "Acme", "Pune"),
        ]
    }

    #[test]
    fn summary_counts_distinct_values() {
        let summary = summarize(&sample());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.unique_companies, 2);
        assert_eq!(summary.sources, 3);
        assert_eq!(summary.locations, 2);
        assert_eq!(summary.per_source.get(&Source::Naukri), Some(&1));
    }

    #[test]
    fn source_sort_orders_by_label() {
        let records = sample();
        let titles: Vec<_> = select(&records, &ResultFilter::default(), SortKey::Source)
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[test]
    fn filter_requires_every_non_empty_constraint() {
        let records = sample();
        let filter = ResultFilter {
            companies: BTreeSet::from(["Acme".to_string()]),
            locations: BTreeSet::from(["Pune".to_string()]),
            ..ResultFilter::default()
        };
        let rows = select(&records, &filter, SortKey::Relevance);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "C");
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        assert_eq!("Company".parse::<SortKey>(), Ok(SortKey::Company));
        assert!("salary".parse::<SortKey>().is_err());
    }
}
