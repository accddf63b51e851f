const MAX_STEM_LEN: usize = 80;

/// Export file name for a harvest: `jobs_{term}_{stamp}.{extension}`.
///
/// The term keeps its case; whitespace becomes `_` and characters that are
/// not allowed in Windows file names are dropped.
pub fn export_filename(term: &str, stamp: &str, extension: &str) -> String {
    let stem = sanitize(&format!("jobs_{}_{}", term.trim(), stamp.trim()));
    format!("{stem}.{extension}")
}

fn sanitize(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let mapped = if c.is_whitespace() || c == '_' {
            '_'
        } else if is_forbidden(c) {
            continue;
        } else {
            c
        };
        if mapped == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        cleaned.push(mapped);
    }

    let mut stem = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if stem.is_empty() {
        stem = "jobs".to_string();
    }
    if stem.len() > MAX_STEM_LEN {
        let mut end = MAX_STEM_LEN;
        while !stem.is_char_boundary(end) {
            end -= 1;
        }
        stem.truncate(end);
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
