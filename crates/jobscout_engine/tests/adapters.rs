use jobscout_core::{FallbackCause, Source, PLACEHOLDER_COMPANY, PLACEHOLDER_LOCATION};
use jobscout_engine::{FetchSettings, ReqwestFetcher, SourceAdapter};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERNSHALA_PAGE: &str = r#"
<html><body>
  <div class="individual_internship">
    <h3><a href="/job/detail/data-analyst-1">Data   Analyst</a></h3>
    <a class="company-name" href="/company/acme">Acme Analytics</a>
    <a class="location-link">Bangalore</a>
  </div>
  <div class="individual_internship">
    <h3>Junior Data Analyst</h3>
    <a class="location-link">Pune</a>
  </div>
  <div class="individual_internship">
    <p class="banner">Sponsored</p>
  </div>
</body></html>
"#;

const NAUKRI_SECONDARY_PAGE: &str = r#"
<html><body>
  <div class="jobTupleHeader">
    <h3><a href="https://www.naukri.com/job-listings-bi-analyst-42">BI Analyst</a></h3>
    <span class="companyName">Beta Corp</span>
    <li class="location">Noida</li>
  </div>
</body></html>
"#;

const INDEED_PAGE: &str = r#"
<html><body>
  <div class="job_seen_beacon">
    <h2 class="jobTitle"><a href="/rc/clk?jk=abc123"><span title="Data Analyst">Data Analyst</span></a></h2>
    <span class="companyName">Gamma Ltd</span>
    <div data-testid="job-location">Remote</div>
  </div>
</body></html>
"#;

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings::default()).expect("client builds")
}

fn repeated_cards(count: usize) -> String {
    let cards: String = (1..=count)
        .map(|n| {
            format!(
                r#"<div class="individual_internship"><h3><a href="/job/{n}">Role {n}</a></h3></div>"#
            )
        })
        .collect();
    format!("<html><body>{cards}</body></html>")
}

#[test]
fn internshala_extracts_titled_containers_only() {
    let adapter = SourceAdapter::with_origin(Source::Internshala, "https://internshala.com").unwrap();
    let search = Url::parse("https://internshala.com/jobs/data-analyst-jobs/").unwrap();

    let records = adapter.extract_listings(INTERNSHALA_PAGE, &search, 20);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Data Analyst");
    assert_eq!(records[0].company, "Acme Analytics");
    assert_eq!(records[0].location, "Bangalore");
    assert_eq!(
        records[0].url,
        "https://internshala.com/job/detail/data-analyst-1"
    );
    assert_eq!(records[1].company, PLACEHOLDER_COMPANY);
    assert_eq!(records[1].location, "Pune");
    // No anchor in the card: the search page stands in.
    assert_eq!(records[1].url, search.as_str());
    assert!(records.iter().all(|r| !r.synthetic && r.source == Source::Internshala));
}

#[test]
fn naukri_uses_secondary_selectors() {
    let adapter = SourceAdapter::new(Source::Naukri).unwrap();
    let search = Url::parse("https://www.naukri.com/bi-analyst-jobs").unwrap();

    let records = adapter.extract_listings(NAUKRI_SECONDARY_PAGE, &search, 20);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "BI Analyst");
    assert_eq!(records[0].company, "Beta Corp");
    assert_eq!(records[0].location, "Noida");
    assert_eq!(
        records[0].url,
        "https://www.naukri.com/job-listings-bi-analyst-42"
    );
}

#[test]
fn indeed_resolves_relative_links_against_origin() {
    let adapter = SourceAdapter::new(Source::Indeed).unwrap();
    let search = Url::parse("https://in.indeed.com/jobs?q=data&l=India").unwrap();

    let records = adapter.extract_listings(INDEED_PAGE, &search, 15);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://in.indeed.com/rc/clk?jk=abc123");
    assert_eq!(records[0].company, "Gamma Ltd");
    assert_eq!(records[0].location, "Remote");
}

#[test]
fn missing_location_becomes_placeholder() {
    let adapter = SourceAdapter::new(Source::Indeed).unwrap();
    let search = Url::parse("https://in.indeed.com/jobs?q=x&l=India").unwrap();
    let html = r#"<div class="job_seen_beacon"><h2 class="jobTitle">Tester</h2></div>"#;

    let records = adapter.extract_listings(html, &search, 15);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].location, PLACEHOLDER_LOCATION);
    assert_eq!(records[0].company, PLACEHOLDER_COMPANY);
    assert!(!records[0].has_blank_field());
}

#[test]
fn extraction_respects_cap() {
    let adapter = SourceAdapter::new(Source::Internshala).unwrap();
    let search = Url::parse("https://internshala.com/jobs/x-jobs/").unwrap();
    let html = repeated_cards(25);

    assert_eq!(adapter.extract_listings(&html, &search, adapter.default_cap()).len(), 20);
    assert_eq!(adapter.extract_listings(&html, &search, 3).len(), 3);
}

#[tokio::test]
async fn harvest_reads_listing_page_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/data-analyst-jobs/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(INTERNSHALA_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = SourceAdapter::with_origin(Source::Internshala, &server.uri()).unwrap();
    let batch = adapter.harvest(&fetcher(), "  Data Analyst ", None).await;

    assert_eq!(batch.fallback, None);
    assert_eq!(batch.records.len(), 2);
    assert_eq!(
        batch.records[0].url,
        format!("{}/job/detail/data-analyst-1", server.uri())
    );
}

#[tokio::test]
async fn indeed_harvest_sends_term_and_location_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "Data Analyst"))
        .and(query_param("l", "India"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(INDEED_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = SourceAdapter::with_origin(Source::Indeed, &server.uri()).unwrap();
    let batch = adapter.harvest(&fetcher(), "Data Analyst", None).await;

    assert_eq!(batch.fallback, None);
    assert_eq!(batch.records[0].title, "Data Analyst");
}

#[tokio::test]
async fn server_error_yields_placeholder_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = SourceAdapter::with_origin(Source::Internshala, &server.uri()).unwrap();
    let batch = adapter.harvest(&fetcher(), "data analyst", None).await;

    assert_eq!(
        batch.fallback,
        Some(FallbackCause::FetchFailed {
            reason: "http status 500".to_string()
        })
    );
    let titles: Vec<_> = batch.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "data analyst - Position 1",
            "data analyst - Position 2",
            "data analyst - Position 3",
            "data analyst - Position 4",
            "data analyst - Position 5",
        ]
    );
    assert_eq!(batch.records[0].company, "Company 1");
    assert_eq!(batch.records[4].location, "Chennai");
    assert!(batch.records.iter().all(|r| r.synthetic));
    assert!(batch.records.iter().all(|r| r.url == batch.search_url));
}

#[tokio::test]
async fn page_without_listings_yields_placeholders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/qa-engineer-jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>No results</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let adapter = SourceAdapter::with_origin(Source::Naukri, &server.uri()).unwrap();
    let batch = adapter.harvest(&fetcher(), "QA Engineer", None).await;

    assert_eq!(batch.fallback, Some(FallbackCause::NoListings));
    assert_eq!(batch.records.len(), adapter.fallback_size());
    assert_eq!(batch.records[0].title, "QA Engineer Specialist - Role 1");
    assert_eq!(batch.records[0].company, "Tech Company 1");
    assert_eq!(batch.records[0].location, "Gurgaon");
}

#[tokio::test]
async fn latin1_page_is_decoded_before_extraction() {
    let server = MockServer::start().await;
    let body = b"<div class=\"job_seen_beacon\"><h2 class=\"jobTitle\">Caf\xe9 Manager</h2></div>".to_vec();
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"))
        .mount(&server)
        .await;

    let adapter = SourceAdapter::with_origin(Source::Indeed, &server.uri()).unwrap();
    let batch = adapter.harvest(&fetcher(), "cafe", None).await;

    assert_eq!(batch.fallback, None);
    assert_eq!(batch.records[0].title, "Café Manager");
}

#[tokio::test]
async fn containers_without_titles_yield_placeholders() {
    let server = MockServer::start().await;
    let body = r#"<html><body>
        <div class="individual_internship"><p class="banner">Sponsored</p></div>
        <div class="individual_internship"><a class="company-name">Acme</a></div>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/jobs/designer-jobs/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = SourceAdapter::with_origin(Source::Internshala, &server.uri()).unwrap();
    let batch = adapter.harvest(&fetcher(), "Designer", None).await;

    assert_eq!(batch.fallback, Some(FallbackCause::NoListings));
    assert_eq!(batch.records.len(), adapter.fallback_size());
    assert!(batch.records.iter().all(|r| r.synthetic));
    assert_eq!(batch.records[0].title, "Designer - Position 1");
}
