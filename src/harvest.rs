use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::error::ItemError;
use crate::listing::Identity;
use crate::model::FoodItem;
use crate::store::Store;

/// End-of-run summary for the detail phase.
pub struct HarvestStats {
    pub total: usize,
    pub ok: usize,
    pub skipped: usize,
}

/// Drive the per-item loop: process each identity in order, skip-and-log on
/// failure, checkpoint the full collection after every `checkpoint_every`
/// successes, and always flush once at the end.
///
/// `cancel` is checked between items (cooperative, coarse): once set, the
/// loop breaks straight to the final flush. The final flush is the only
/// write whose failure propagates out.
pub async fn harvest_items<F, Fut>(
    identities: &[Identity],
    store: &mut Store,
    cancel: &AtomicBool,
    checkpoint_every: usize,
    delay: Duration,
    mut process: F,
) -> Result<HarvestStats>
where
    F: FnMut(&Identity) -> Fut,
    Fut: Future<Output = Result<FoodItem, ItemError>>,
{
    let pb = ProgressBar::new(identities.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut items: Vec<FoodItem> = Vec::new();
    let mut skipped = 0usize;

    for identity in identities {
        if cancel.load(Ordering::SeqCst) {
            info!("Interrupted before {}; flushing what we have", identity.0);
            break;
        }

        match process(identity).await {
            Ok(item) => {
                info!("Extracted '{}' ({})", item.description, item.code);
                items.push(item);
                if checkpoint_every != 0 && items.len() % checkpoint_every == 0 {
                    match store.checkpoint(&items) {
                        Ok(()) => info!("Checkpointed {} items", items.len()),
                        // Mid-run checkpoint failure is not fatal; the final
                        // flush gets another chance.
                        Err(e) => warn!("Checkpoint failed ({:#}); continuing", e),
                    }
                }
            }
            Err(e) => {
                skipped += 1;
                warn!("Skipping {} ({}): {}", identity.0, identity.1, e);
            }
        }

        pb.inc(1);
        // Politeness cooldown, success or failure alike.
        tokio::time::sleep(delay).await;
    }
    pb.finish_and_clear();

    store.checkpoint(&items)?;
    info!("Final flush: {} items written to {}", items.len(), store.path().display());

    Ok(HarvestStats {
        total: identities.len(),
        ok: items.len(),
        skipped,
    })
}

// ── Tests ──
