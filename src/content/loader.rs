//! Filesystem content store - MDX posts and the JSON project manifest

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::store::is_valid_slug;
use super::{project, BlogFrontmatter, BlogPost, ContentError, ContentStore, MarkdownRenderer, Project};
use crate::Folio;

/// Extensions recognised as blog documents, in order of preference
const POST_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Reads content straight from the site's content directory on every call
#[derive(Clone)]
pub struct FsContentStore {
    blog_dir: PathBuf,
    manifest_path: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl FsContentStore {
    /// Store over the directories named in the site config
    pub fn new(folio: &Folio) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &folio.config.highlight.theme,
            folio.config.highlight.line_number,
        );
        Self::with_paths(
            folio.content_dir.join(&folio.config.blog_dir),
            folio.content_dir.join(&folio.config.projects_manifest),
            renderer,
        )
    }

    pub fn with_paths(blog_dir: PathBuf, manifest_path: PathBuf, renderer: MarkdownRenderer) -> Self {
        Self {
            blog_dir,
            manifest_path,
            renderer: Arc::new(renderer),
        }
    }

    pub fn blog_dir(&self) -> &Path {
        &self.blog_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Path of the document for `slug`, if one exists
    async fn document_path(&self, slug: &str) -> Option<PathBuf> {
        if !is_valid_slug(slug) {
            return None;
        }
        for ext in POST_EXTENSIONS {
            let path = self.blog_dir.join(format!("{}.{}", slug, ext));
            if tokio::fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false)
            {
                return Some(path);
            }
        }
        None
    }

    /// Read and split one document into front-matter and raw body
    async fn read_document(&self, slug: &str) -> Result<Option<(BlogFrontmatter, String)>, ContentError> {
        let Some(path) = self.document_path(slug).await else {
            return Ok(None);
        };

        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;

        let (frontmatter, body) =
            BlogFrontmatter::parse(&source).map_err(|source| ContentError::Frontmatter {
                slug: slug.to_string(),
                source,
            })?;

        tracing::debug!("Loaded post {:?}", path);
        Ok(Some((frontmatter, body.to_string())))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn list_blog_slugs(&self) -> Vec<String> {
        let blog_dir = self.blog_dir.clone();
        match tokio::task::spawn_blocking(move || scan_slugs(&blog_dir)).await {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::warn!("Failed to scan blog directory: {}", e);
                Vec::new()
            }
        }
    }

    async fn blog_frontmatter(&self, slug: &str) -> Result<Option<BlogFrontmatter>, ContentError> {
        Ok(self.read_document(slug).await?.map(|(fm, _)| fm))
    }

    async fn blog_post(&self, slug: &str) -> Result<Option<BlogPost>, ContentError> {
        let Some((frontmatter, body)) = self.read_document(slug).await? else {
            return Ok(None);
        };
        let content = self.renderer.render(&body);
        Ok(Some(BlogPost::new(slug.to_string(), frontmatter, content)))
    }

    async fn projects(&self) -> Result<Vec<Project>, ContentError> {
        let raw = tokio::fs::read_to_string(&self.manifest_path)
            .await
            .map_err(|source| ContentError::Io {
                path: self.manifest_path.clone(),
                source,
            })?;

        let projects: Vec<Project> =
            serde_json::from_str(&raw).map_err(|source| ContentError::Manifest {
                path: self.manifest_path.clone(),
                source,
            })?;

        if let Some(bad) = projects.iter().find(|p| !is_valid_slug(&p.slug)) {
            return Err(ContentError::InvalidSlug(bad.slug.clone()));
        }

        if let Some(slug) = project::duplicate_slug(&projects) {
            return Err(ContentError::DuplicateSlug(slug.to_string()));
        }

        Ok(projects)
    }
}

/// Collect document stems directly under `blog_dir`
fn scan_slugs(blog_dir: &Path) -> Vec<String> {
    if !blog_dir.is_dir() {
        tracing::warn!("Blog directory {:?} is not readable", blog_dir);
        return Vec::new();
    }

    // stem -> extension it resolves to
    let mut found: BTreeMap<String, &'static str> = BTreeMap::new();

    for entry in WalkDir::new(blog_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = post_extension(path) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_valid_slug(stem) {
            tracing::warn!("Skipping {:?}: not a usable slug", path);
            continue;
        }

        match found.get(stem).copied() {
            Some(existing) => {
                tracing::warn!(
                    "Both {stem}.{existing} and {stem}.{ext} exist; using {stem}.{}",
                    POST_EXTENSIONS[0]
                );
                if ext == POST_EXTENSIONS[0] {
                    found.insert(stem.to_string(), ext);
                }
            }
            None => {
                found.insert(stem.to_string(), ext);
            }
        }
    }

    found.into_keys().collect()
}

/// The recognised extension of `path`, if any
fn post_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    POST_EXTENSIONS.into_iter().find(|known| *known == ext)
}
