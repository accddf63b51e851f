use std::collections::BTreeMap;
use std::fs;

use jobscout_core::{FallbackCause, HarvestReport, JobRecord, Source, SourceOutcome};
use jobscout_engine::{export_report, write_csv, ExportOptions};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn record(title: &str, company: &str) -> JobRecord {
    JobRecord::extracted(
        Source::Naukri,
        title,
        Some(company),
        Some("Pune"),
        "https://www.naukri.com/job-listings-1",
    )
    .unwrap()
}

fn report() -> HarvestReport {
    let placeholder = JobRecord::synthetic(
        Source::Indeed,
        "data analyst Professional - 1".to_string(),
        "Global Corp 1".to_string(),
        "Mumbai".to_string(),
        "https://in.indeed.com/jobs?q=data+analyst&l=India".to_string(),
    );
    HarvestReport {
        term: "data analyst".to_string(),
        records: vec![record("Data Analyst", "Acme"), placeholder],
        outcomes: BTreeMap::from([
            (
                Source::Naukri,
                SourceOutcome::Success {
                    count: 1,
                    fallback: None,
                },
            ),
            (
                Source::Indeed,
                SourceOutcome::Success {
                    count: 1,
                    fallback: Some(FallbackCause::FetchFailed {
                        reason: "timeout".to_string(),
                    }),
                },
            ),
        ]),
    }
}

#[test]
fn csv_quotes_fields_with_separators() {
    let records = vec![
        record("Analyst, Reporting", "Say \"Hi\" Ltd"),
        record("Plain", "Acme"),
    ];
    let mut out = Vec::new();
    write_csv(&mut out, &records).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "Title,Company,Location,Source,URL,Posted");
    assert_eq!(
        lines[1],
        "\"Analyst, Reporting\",\"Say \"\"Hi\"\" Ltd\",Pune,Naukri.com,https://www.naukri.com/job-listings-1,Recent"
    );
    assert_eq!(
        lines[2],
        "Plain,Acme,Pune,Naukri.com,https://www.naukri.com/job-listings-1,Recent"
    );
}

#[test]
fn empty_record_list_writes_header_only() {
    let mut out = Vec::new();
    write_csv(&mut out, &[]).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Title,Company,Location,Source,URL,Posted\n"
    );
}

#[test]
fn export_writes_csv_and_manifest_into_new_dir() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("exports");
    let options = ExportOptions {
        stamp: "20261019_1430".to_string(),
        ..ExportOptions::default()
    };

    let summary = export_report(&out_dir, &report(), &options).unwrap();

    assert_eq!(summary.record_count, 2);
    assert_eq!(
        summary.csv_path,
        out_dir.join("jobs_data_analyst_20261019_1430.csv")
    );
    let csv = fs::read_to_string(&summary.csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(2).unwrap().starts_with("data analyst Professional - 1,"));

    let manifest_path = summary.manifest_path.unwrap();
    let manifest: serde_json::Value =
        serde_json::from_slice(&fs::read(manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["term"], "data analyst");
    assert_eq!(manifest["csv"], "jobs_data_analyst_20261019_1430.csv");
    assert_eq!(manifest["record_count"], 2);
    assert_eq!(manifest["synthetic_count"], 1);
    assert_eq!(manifest["outcomes"]["Indeed"]["status"], "success");
    assert_eq!(
        manifest["outcomes"]["Indeed"]["fallback"]["cause"],
        "fetch_failed"
    );
    assert_eq!(manifest["outcomes"]["Naukri"]["fallback"], serde_json::Value::Null);
}

#[test]
fn manifest_can_be_skipped() {
    let temp = TempDir::new().unwrap();
    let options = ExportOptions {
        write_manifest: false,
        ..ExportOptions::default()
    };

    let summary = export_report(temp.path(), &report(), &options).unwrap();

    assert_eq!(summary.manifest_path, None);
    assert_eq!(
        summary.csv_path.file_name().unwrap(),
        "jobs_data_analyst_latest.csv"
    );
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}
