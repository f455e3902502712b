//! Create a new blog post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::store::is_valid_slug;
use crate::Folio;

/// Scaffold `<blog_dir>/<slug>.mdx` with front-matter for `title`
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }
    if !is_valid_slug(&slug) {
        anyhow::bail!("Invalid slug {:?}: must be a single file name", slug);
    }

    let target_dir = folio.content_dir.join(&folio.config.blog_dir);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.mdx", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let content = format!(
        "---\ntitle: {}\ndescription: \"\"\ndate: \"{}\"\ntags: []\n---\n\n",
        serde_yaml::to_string(title)?.trim_end(),
        today
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStore, FsContentStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_post_is_loadable() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let path = create_post(&folio, "Hello: World", None).unwrap();
        assert!(path.ends_with("content/blog/hello-world.mdx"));

        let store = FsContentStore::new(&folio);
        let fm = store.blog_frontmatter("hello-world").await.unwrap().unwrap();
        assert_eq!(fm.title, "Hello: World");
        assert!(fm.parsed_date().is_some());

        assert!(create_post(&folio, "Hello: World", None).is_err());
    }

    #[test]
    fn test_create_post_rejects_unsafe_slug() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        for slug in ["../x", "a/b", ".hidden"] {
            assert!(create_post(&folio, "X", Some(slug)).is_err(), "{}", slug);
        }
        assert!(!dir.path().join("content/x.mdx").exists());
        assert!(create_post(&folio, "X", Some("custom-slug")).unwrap().ends_with("custom-slug.mdx"));
    }
}
