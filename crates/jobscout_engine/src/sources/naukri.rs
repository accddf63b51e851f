use jobscout_core::Source;
use url::Url;

use super::{base_of, slug, ExtractionRules, FallbackTemplate, SourceProfile};
use crate::document::SelectorRule;

pub(crate) static PROFILE: SourceProfile = SourceProfile {
    source: Source::Naukri,
    default_origin: "https://www.naukri.com",
    default_cap: 20,
    search_url,
    rules: ExtractionRules {
        containers: SelectorRule::new("article.jobTuple", "div.jobTupleHeader"),
        title: SelectorRule::new("a.title", "h3"),
        company: SelectorRule::new("a.subTitle", "span.companyName"),
        location: SelectorRule::new("span.locationsContainer", "li.location"),
        link: SelectorRule::new("a.title[href]", "h3 a[href]"),
    },
    fallback: FallbackTemplate {
        count: 5,
        title: placeholder_title,
        company_prefix: "Tech Company",
        cities: &["Gurgaon", "Noida", "Hyderabad", "Pune", "Kolkata"],
    },
};

/// `{origin}/{slug}-jobs`
fn search_url(origin: &Url, term: &str) -> Option<Url> {
    let mut url = base_of(origin);
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(&format!("{}-jobs", slug(term)));
    Some(url)
}

fn placeholder_title(term: &str, n: usize) -> String {
    format!("{term} Specialist - Role {n}")
}
