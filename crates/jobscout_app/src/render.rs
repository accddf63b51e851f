//! Plain-text rendering of the view model.

use jobscout_core::{AppViewModel, JobRowView};

const TITLE_WIDTH: usize = 40;
const COMPANY_WIDTH: usize = 24;
const LOCATION_WIDTH: usize = 18;
const SOURCE_WIDTH: usize = 11;

/// Notices the user has not seen yet; advances `seen`.
pub(crate) fn new_notices(view: &AppViewModel, seen: &mut usize) -> Vec<String> {
    let fresh: Vec<String> = view.notices.iter().skip(*seen).cloned().collect();
    *seen = view.notices.len();
    fresh
}

/// Summary, per-source outcomes and the result table.
pub(crate) fn render_results(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    let summary = &view.summary;
    if summary.total == 0 {
        return lines;
    }

    let term = view.term.as_deref().unwrap_or_default();
    lines.push(format!(
        "{} jobs for \"{}\" from {} sources ({} companies, {} locations)",
        summary.total, term, summary.sources, summary.unique_companies, summary.locations
    ));
    for outcome in &view.outcomes {
        let marker = if outcome.synthetic { "*" } else { " " };
        lines.push(format!(
            "  {marker} {:<width$} {}",
            outcome.source.label(),
            outcome.summary,
            width = SOURCE_WIDTH
        ));
    }
    lines.push(String::new());

    if view.rows.is_empty() {
        lines.push("No listings match the current filter.".to_string());
        return lines;
    }

    lines.push(format!(
        "  {:<tw$} {:<cw$} {:<lw$} {:<sw$} URL",
        "Title",
        "Company",
        "Location",
        "Source",
        tw = TITLE_WIDTH,
        cw = COMPANY_WIDTH,
        lw = LOCATION_WIDTH,
        sw = SOURCE_WIDTH
    ));
    lines.extend(view.rows.iter().map(render_row));

    if view.rows.iter().any(|row| row.synthetic) {
        lines.push(String::new());
        lines.push("* placeholder listing, the source returned nothing usable".to_string());
    }
    if view.filter_active {
        lines.push(format!(
            "Showing {} of {} listings, sorted by {}",
            view.rows.len(),
            summary.total,
            view.sort
        ));
    }
    lines
}

fn render_row(row: &JobRowView) -> String {
    let marker = if row.synthetic { '*' } else { ' ' };
    format!(
        "{marker} {:<tw$} {:<cw$} {:<lw$} {:<sw$} {}",
        fit(&row.title, TITLE_WIDTH),
        fit(&row.company, COMPANY_WIDTH),
        fit(&row.location, LOCATION_WIDTH),
        row.source.label(),
        row.url,
        tw = TITLE_WIDTH,
        cw = COMPANY_WIDTH,
        lw = LOCATION_WIDTH,
        sw = SOURCE_WIDTH
    )
}

/// Cuts `text` to `width` characters, ending in `...` when shortened.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
