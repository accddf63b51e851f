use jobscout_core::Source;
use url::Url;

use super::{base_of, ExtractionRules, FallbackTemplate, SourceProfile};
use crate::document::SelectorRule;

const LOCATION: &str = "India";

pub(crate) static PROFILE: SourceProfile = SourceProfile {
    source: Source::Indeed,
    default_origin: "https://in.indeed.com",
    default_cap: 15,
    search_url,
    rules: ExtractionRules {
        containers: SelectorRule::new("div.job_seen_beacon", "a[data-jk]"),
        title: SelectorRule::new("h2.jobTitle", "span[title]"),
        company: SelectorRule::new("span.companyName", r#"a[data-testid="company-name"]"#),
        location: SelectorRule::new(r#"div[data-testid="job-location"]"#, "span.locationsContainer"),
        link: SelectorRule::new("h2.jobTitle a[href]", "a[data-jk][href]"),
    },
    fallback: FallbackTemplate {
        count: 4,
        title: placeholder_title,
        company_prefix: "Global Corp",
        cities: &["Mumbai", "Delhi", "Bangalore", "Chennai"],
    },
};

/// `{origin}/jobs?q={term}&l=India`, the term kept verbatim in the query.
fn search_url(origin: &Url, term: &str) -> Option<Url> {
    let mut url = base_of(origin);
    url.path_segments_mut().ok()?.pop_if_empty().push("jobs");
    url.query_pairs_mut()
        .append_pair("q", term)
        .append_pair("l", LOCATION);
    Some(url)
}

fn placeholder_title(term: &str, n: usize) -> String {
    format!("{term} Professional - {n}")
}
