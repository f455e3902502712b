//! Generator module - writes every static route to the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::ContentStore;
use crate::render::{render_route, static_routes, PageOutcome};
use crate::Folio;

/// Static site generator over any content store
pub struct Generator<'a> {
    folio: &'a Folio,
    store: &'a dyn ContentStore,
}

impl<'a> Generator<'a> {
    pub fn new(folio: &'a Folio, store: &'a dyn ContentStore) -> Self {
        Self { folio, store }
    }

    /// Generate the entire site; returns the number of pages written
    pub async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;

        self.copy_static_assets()?;

        let mut written = 0;
        for route in static_routes(self.store).await {
            let outcome = render_route(self.store, &self.folio.config, &route)
                .await
                .with_context(|| format!("Failed to render {}", route))?;

            match outcome {
                PageOutcome::Page(html) => {
                    let target = self.folio.public_dir.join(route.output_file());
                    write_file(&target, &html)?;
                    tracing::debug!("Generated {:?}", target);
                    written += 1;
                }
                // Enumerated routes always exist; a miss means the store changed mid-run
                PageOutcome::Redirect(_) | PageOutcome::NotFound(_) => {
                    tracing::warn!("Skipping {}: content disappeared during generation", route);
                }
            }
        }

        Ok(written)
    }

    /// Copy the static directory to `public/static`
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = self.folio.base_dir.join(&self.folio.config.static_dir);
        if !static_dir.exists() {
            return Ok(());
        }

        let target_root = self.folio.public_dir.join("static");
        for entry in WalkDir::new(&static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&static_dir)?;
            let target = target_root.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
        }

        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
