mod config;
mod error;
mod fetch;
mod harvest;
mod listing;
mod model;
mod parser;
mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use scraper::Html;
use tracing::warn;

use config::Config;
use fetch::Fetcher;
use store::Store;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cfg = Config::default();
    let fetcher = Fetcher::new(&cfg)?;

    // Ctrl-C sets a flag; the harvest loop checks it between items and falls
    // through to the final flush, so an interrupted run still saves.
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; saving collected data");
                cancel.store(true, Ordering::SeqCst);
            }
        });
    }

    println!("Phase 1: walking the food listing...");
    let identities = listing::collect_identities(&cancel, |page| {
        let fetcher = &fetcher;
        let delay = cfg.politeness_delay;
        async move {
            let html = fetcher.listing_page(page).await;
            tokio::time::sleep(delay).await;
            html
        }
    })
    .await;
    let identities: Vec<listing::Identity> = identities.into_iter().collect();
    println!("Listing done: {} unique foods found.", identities.len());

    // Interrupted before any item was fetched: leave whatever a previous run
    // wrote alone instead of flushing an empty collection over it.
    if cancel.load(Ordering::SeqCst) {
        println!("Interrupted during the listing walk; nothing written.");
        return Ok(());
    }

    if identities.is_empty() {
        println!("Nothing to fetch.");
        return Ok(());
    }

    println!(
        "Phase 2: extracting {} items to '{}'...",
        identities.len(),
        cfg.output_path.display()
    );
    let mut store = Store::new(&cfg.output_path);
    let stats = harvest::harvest_items(
        &identities,
        &mut store,
        &cancel,
        cfg.checkpoint_every,
        cfg.politeness_delay,
        |(code, class)| {
            let fetcher = &fetcher;
            let code = code.clone();
            let class = class.clone();
            async move {
                let html = fetcher.detail_page(&code).await?;
                let doc = Html::parse_document(&html);
                Ok(parser::extract_food_item(&doc, &code, &class)?)
            }
        },
    )
    .await?;

    println!(
        "Done: {} items saved, {} skipped (of {}).",
        stats.ok, stats.skipped, stats.total
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Finished in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    const EMPTY_LISTING: &str =
        "<html><body><table><tbody></tbody></table></body></html>";

    /// Full pipeline over fixtures: listing walk → detail extraction →
    /// checkpointed JSON, no network.
    #[tokio::test]
    async fn fixture_pipeline_produces_two_items() {
        let listing = std::fs::read_to_string("tests/fixtures/listing_page.html").unwrap();

        let no_cancel = AtomicBool::new(false);
        let identities = listing::collect_identities(&no_cancel, |page| {
            let html = if page == 1 {
                listing.clone()
            } else {
                EMPTY_LISTING.to_string()
            };
            async move { Ok(html) }
        })
        .await;
        let identities: Vec<listing::Identity> = identities.into_iter().collect();

        // The fixture listing has a duplicate row and a malformed one.
        assert_eq!(
            identities,
            vec![
                ("BRC0100A".to_string(), "Bebidas e infusões".to_string()),
                ("BRC0408J".to_string(), "Açúcares e doces".to_string()),
            ]
        );

        let path =
            std::env::temp_dir().join(format!("tbca_pipeline_{}.json", std::process::id()));
        let mut store = Store::new(&path);
        let cancel = AtomicBool::new(false);

        let stats = harvest::harvest_items(
            &identities,
            &mut store,
            &cancel,
            20,
            Duration::ZERO,
            |(code, class)| {
                let code = code.clone();
                let class = class.clone();
                async move {
                    let fixture = match code.as_str() {
                        "BRC0100A" => "detail_cafe.html",
                        _ => "detail_acucar.html",
                    };
                    let html =
                        std::fs::read_to_string(format!("tests/fixtures/{}", fixture)).unwrap();
                    let doc = Html::parse_document(&html);
                    Ok(parser::extract_food_item(&doc, &code, &class)?)
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(stats.ok, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(store.writes(), 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        // UTF-8 survives verbatim, no \u escapes.
        assert!(raw.contains("Café, infusão 10%"));

        let written: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let arr = written.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["descricao"], "Café, infusão 10%");
        assert_eq!(arr[0]["medidas_caseiras"].as_array().unwrap().len(), 1);
        assert_eq!(
            arr[0]["medidas_caseiras"][0]["tamanho_medida"],
            "50 ml"
        );
        assert_eq!(arr[1]["descricao"], "Açúcar, cristal");
        assert!(arr[1]["medidas_caseiras"].as_array().unwrap().is_empty());

        std::fs::remove_file(&path).unwrap();
    }
}
