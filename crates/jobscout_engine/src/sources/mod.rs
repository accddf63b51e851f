//! Source adapters: one profile per job board, one shared harvest algorithm.

mod indeed;
mod internshala;
mod naukri;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use jobscout_core::{FallbackCause, JobRecord, Source};
use url::Url;

use crate::decode::decode_page;
use crate::document::{Listing, Page, SelectorPair, SelectorRule};
use crate::{Fetcher, ParseError};

/// Container and per-field selector rules of one source.
pub(crate) struct ExtractionRules {
    pub containers: SelectorRule,
    pub title: SelectorRule,
    pub company: SelectorRule,
    pub location: SelectorRule,
    pub link: SelectorRule,
}

/// Shape of the placeholder batch used when a source yields nothing.
pub(crate) struct FallbackTemplate {
    pub count: usize,
    pub title: fn(&str, usize) -> String,
    pub company_prefix: &'static str,
    /// Assigned round-robin.
    pub cities: &'static [&'static str],
}

pub(crate) struct SourceProfile {
    pub source: Source,
    pub default_origin: &'static str,
    pub default_cap: usize,
    pub search_url: fn(&Url, &str) -> Option<Url>,
    pub rules: ExtractionRules,
    pub fallback: FallbackTemplate,
}

fn profile(source: Source) -> &'static SourceProfile {
    match source {
        Source::Internshala => &internshala::PROFILE,
        Source::Naukri => &naukri::PROFILE,
        Source::Indeed => &indeed::PROFILE,
    }
}

/// Lower-case words joined by `-`; percent-encoding is left to `Url`.
pub(crate) fn slug(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Origin without query or fragment; its path stays as a prefix.
pub(crate) fn base_of(origin: &Url) -> Url {
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Records one adapter produced for one harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBatch {
    pub source: Source,
    pub search_url: String,
    pub records: Vec<JobRecord>,
    /// Set when `records` are placeholders.
    pub fallback: Option<FallbackCause>,
}

struct CompiledRules {
    containers: SelectorPair,
    title: SelectorPair,
    company: SelectorPair,
    location: SelectorPair,
    link: SelectorPair,
}

impl CompiledRules {
    fn compile(rules: &ExtractionRules) -> Result<Self, ParseError> {
        Ok(Self {
            containers: SelectorPair::compile(rules.containers)?,
            title: SelectorPair::compile(rules.title)?,
            company: SelectorPair::compile(rules.company)?,
            location: SelectorPair::compile(rules.location)?,
            link: SelectorPair::compile(rules.link)?,
        })
    }
}

/// Turns one source's search page into normalized records.
#[derive(Clone)]
pub struct SourceAdapter {
    profile: &'static SourceProfile,
    origin: Url,
}

impl std::fmt::Debug for SourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceAdapter")
            .field("source", &self.profile.source)
            .field("origin", &self.origin.as_str())
            .finish()
    }
}

impl SourceAdapter {
    /// Adapter talking to the source's public site.
    pub fn new(source: Source) -> Result<Self, url::ParseError> {
        Self::with_origin(source, profile(source).default_origin)
    }

    /// Adapter whose URLs are built on `origin` instead of the public site.
    pub fn with_origin(source: Source, origin: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            profile: profile(source),
            origin: Url::parse(origin)?,
        })
    }

    pub fn source(&self) -> Source {
        self.profile.source
    }

    pub fn default_cap(&self) -> usize {
        self.profile.default_cap
    }

    pub fn fallback_size(&self) -> usize {
        self.profile.fallback.count
    }

    pub fn search_url(&self, term: &str) -> Option<Url> {
        (self.profile.search_url)(&self.origin, term.trim())
    }

    /// Fetch, parse and normalize. Never fails: fetch errors and empty pages
    /// yield the source's placeholder batch.
    pub async fn harvest(
        &self,
        fetcher: &dyn Fetcher,
        term: &str,
        cap: Option<usize>,
    ) -> SourceBatch {
        let source = self.source();
        let term = term.trim();
        let cap = cap.unwrap_or(self.profile.default_cap);

        let Some(search_url) = self.search_url(term) else {
            engine_warn!("{}: cannot build search url from origin {}", source, self.origin);
            return self.fallback_batch(
                term,
                self.origin.to_string(),
                FallbackCause::FetchFailed {
                    reason: "invalid url".to_string(),
                },
            );
        };

        engine_debug!("{}: fetching {}", source, search_url);
        let output = match fetcher.fetch(search_url.as_str()).await {
            Ok(output) => output,
            Err(err) => {
                engine_warn!("{}: fetch of {} failed: {}", source, search_url, err);
                return self.fallback_batch(
                    term,
                    search_url.to_string(),
                    FallbackCause::FetchFailed {
                        reason: err.kind.to_string(),
                    },
                );
            }
        };

        let page = decode_page(&output.bytes, output.content_type.as_deref());
        if page.lossy {
            engine_debug!("{}: replaced malformed {} sequences", source, page.encoding);
        }
        let records = self.extract_listings(&page.html, &search_url, cap);
        if records.is_empty() {
            return self.fallback_batch(term, search_url.to_string(), FallbackCause::NoListings);
        }

        engine_info!("{}: extracted {} listings", source, records.len());
        SourceBatch {
            source,
            search_url: search_url.to_string(),
            records,
            fallback: None,
        }
    }

    /// Extract at most `cap` listings from a search page. Containers without
    /// a title are skipped; they still count toward `cap`.
    pub fn extract_listings(&self, html: &str, search_url: &Url, cap: usize) -> Vec<JobRecord> {
        let source = self.source();
        let rules = match CompiledRules::compile(&self.profile.rules) {
            Ok(rules) => rules,
            Err(err) => {
                engine_error!("{}: {}", source, err);
                return Vec::new();
            }
        };

        let page = Page::parse(html);
        let mut records = Vec::new();
        let containers = page.containers(&rules.containers);
        for (index, listing) in containers.into_iter().take(cap).enumerate() {
            match self.extract_listing(&listing, &rules, search_url) {
                Ok(record) => records.push(record),
                Err(err) => engine_debug!("{}: skipping listing {}: {}", source, index, err),
            }
        }
        records
    }

    fn extract_listing(
        &self,
        listing: &Listing<'_>,
        rules: &CompiledRules,
        search_url: &Url,
    ) -> Result<JobRecord, ParseError> {
        let title = listing.text(&rules.title).ok_or(ParseError::MissingTitle)?;
        let company = listing.text(&rules.company);
        let location = listing.text(&rules.location);
        let url = listing
            .link(&rules.link, &self.origin)
            .unwrap_or_else(|| search_url.clone());

        JobRecord::extracted(
            self.source(),
            &title,
            company.as_deref(),
            location.as_deref(),
            url.as_str(),
        )
        .ok_or(ParseError::MissingTitle)
    }

    /// The source's placeholder batch for `term`.
    pub fn placeholders(&self, term: &str, url: &str) -> Vec<JobRecord> {
        let template = &self.profile.fallback;
        (1..=template.count)
            .map(|n| {
                let city = template.cities[(n - 1) % template.cities.len()];
                JobRecord::synthetic(
                    self.source(),
                    (template.title)(term, n),
                    format!("{} {n}", template.company_prefix),
                    city.to_string(),
                    url.to_string(),
                )
            })
            .collect()
    }

    fn fallback_batch(&self, term: &str, url: String, cause: FallbackCause) -> SourceBatch {
        let records = self.placeholders(term, &url);
        engine_info!(
            "{}: using {} placeholder records ({})",
            self.source(),
            records.len(),
            cause
        );
        SourceBatch {
            source: self.source(),
            search_url: url,
            records,
            fallback: Some(cause),
        }
    }
}
