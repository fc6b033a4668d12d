use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::error::FetchError;

/// (code, class) pair identifying one food in the listing phase.
pub type Identity = (String, String);

static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody > tr").unwrap());
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Parse one listing page into identity pairs. Code is the first cell, class
/// the fifth; rows with fewer than 5 cells are skipped.
pub fn parse_identity_rows(html: &str) -> Vec<Identity> {
    let doc = Html::parse_document(html);
    let mut rows = Vec::new();
    for tr in doc.select(&ROW_SEL) {
        let cells: Vec<String> = tr
            .select(&TD_SEL)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() >= 5 {
            rows.push((cells[0].clone(), cells[4].clone()));
        }
    }
    rows
}

/// Walk listing pages from 1 until one yields zero identity rows — the site
/// has no explicit last-page indicator, so an empty page is the sole
/// termination condition. A transport failure is conflated with end-of-list
/// (the site gives no signal to tell them apart); it is logged as such.
/// `cancel` is checked before each page, so an interrupt stops the walk
/// instead of riding out the remaining pages.
///
/// Returns the collected identities deduplicated and sorted.
pub async fn collect_identities<F, Fut>(cancel: &AtomicBool, mut fetch_page: F) -> BTreeSet<Identity>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    let mut identities: BTreeSet<Identity> = BTreeSet::new();
    let mut page = 1u32;
    loop {
        if cancel.load(Ordering::SeqCst) {
            warn!("Interrupted during listing walk at page {}", page);
            break;
        }
        let html = match fetch_page(page).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Listing page {} failed ({}); assuming end of list", page, e);
                break;
            }
        };
        let rows = parse_identity_rows(&html);
        if rows.is_empty() {
            info!("Listing page {} has no rows; listing walk done", page);
            break;
        }
        info!("Listing page {}: {} rows", page, rows.len());
        identities.extend(rows);
        page += 1;
    }
    identities
}

// ── Tests ──
