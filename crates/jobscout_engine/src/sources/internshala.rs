use jobscout_core::Source;
use url::Url;

use super::{base_of, slug, ExtractionRules, FallbackTemplate, SourceProfile};
use crate::document::SelectorRule;

pub(crate) static PROFILE: SourceProfile = SourceProfile {
    source: Source::Internshala,
    default_origin: "https://internshala.com",
    default_cap: 20,
    search_url,
    rules: ExtractionRules {
        containers: SelectorRule::new("div.individual_internship", "div.internship_meta"),
        title: SelectorRule::new("h3", "a.job-title"),
        company: SelectorRule::new("a.company-name", "p.company-name"),
        location: SelectorRule::new("a.location-link", "span.location"),
        link: SelectorRule::new("a[href]", "h3 a[href]"),
    },
    fallback: FallbackTemplate {
        count: 5,
        title: placeholder_title,
        company_prefix: "Company",
        cities: &["Mumbai", "Delhi", "Bangalore", "Pune", "Chennai"],
    },
};

/// `{origin}/jobs/{slug}-jobs/`
fn search_url(origin: &Url, term: &str) -> Option<Url> {
    let mut url = base_of(origin);
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push("jobs")
        .push(&format!("{}-jobs", slug(term)))
        .push("");
    Some(url)
}

fn placeholder_title(term: &str, n: usize) -> String {
    format!("{term} - Position {n}")
}
