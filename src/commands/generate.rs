//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub async fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let store = folio.store();
    let written = Generator::new(folio, &store).generate().await?;

    tracing::info!(
        "Generated {} pages in {:.2}s",
        written,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Watch content, static files and config, regenerating on change
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        let _ = tx.send(res);
    })?;

    let static_dir = folio.base_dir.join(&folio.config.static_dir);
    for dir in [&folio.content_dir, &static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while let Some(result) = rx.recv().await {
        match result {
            Ok(events) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits change paths and settings, so reopen the site
                let folio = match Folio::new(&folio.base_dir) {
                    Ok(folio) => folio,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {}", e);
                        continue;
                    }
                };
                if let Err(e) = run(&folio).await {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}
