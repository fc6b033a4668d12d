use std::sync::LazyLock;

use regex::Regex;

/// `<description> [(<qualifier>)] (<grams> g)` — the gram clause is mandatory
/// and terminal, the parenthesized qualifier optional. Grams accept either
/// decimal separator.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+?)\s*(?:\((.+?)\))?\s*\((\d+[\.,]?\d*)\s*g\)").unwrap());

/// A parsed household-measure column header, e.g.
/// "Pedaço/ Unidade/ Fatia (M) (80 g)".
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureHeader {
    pub description: String,
    pub size_qualifier: Option<String>,
    pub grams: f64,
}

/// Parse a column-header string into a measure header. `None` means "not a
/// measure column" — the fixed informational columns and free-text headers
/// land here and are simply not measures, so callers skip them silently.
pub fn parse_measure_header(text: &str) -> Option<MeasureHeader> {
    let caps = HEADER_RE.captures(text)?;

    let description = caps.get(1)?.as_str().trim().to_string();
    let size_qualifier = caps.get(2).map(|m| m.as_str().to_string());
    let grams: f64 = caps.get(3)?.as_str().replace(',', ".").parse().ok()?;

    Some(MeasureHeader {
        description,
        size_qualifier,
        grams,
    })
}

// ── Tests ──
