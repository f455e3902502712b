//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Portfolio
description: ''
author: John Doe
url: http://localhost:4000

# Directory
content_dir: content
blog_dir: blog
projects_manifest: projects/meta.json
public_dir: public
static_dir: static

# Writing
highlight:
  theme: base16-ocean.dark
  line_number: false

# Contact form
contact:
  endpoint: http://localhost:3000/api/contact
  reset_after_secs: 3
  email:
"#;

const HELLO_POST: &str = r#"---
title: Hello World
description: The first post on this site
date: "2024-01-01"
tags:
  - intro
---

Welcome! Edit or delete this post under `content/blog/`.

<Callout>Posts are MDX: markdown plus a couple of components.</Callout>
"#;

const MANIFEST: &str = r#"[
  {
    "id": 1,
    "slug": "example-project",
    "title": "Example Project",
    "description": "Describe what you built here.",
    "image": "/static/example.png",
    "tags": ["rust"],
    "codeLink": "https://github.com/example/example-project"
  }
]
"#;

const STYLESHEET: &str = "body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 48rem; }\n";

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG)?;
    write_if_missing(&target_dir.join("content/blog/hello-world.mdx"), HELLO_POST)?;
    write_if_missing(&target_dir.join("content/projects/meta.json"), MANIFEST)?;
    write_if_missing(&target_dir.join("static/site.css"), STYLESHEET)?;

    Ok(())
}

/// Never clobber an existing site's files
fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::debug!("Keeping existing {:?}", path);
    } else {
        fs::write(path, content)?;
        tracing::debug!("Created {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::Folio;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_site_is_usable() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.contact.reset_after_secs, 3);
        assert_eq!(folio.config.contact.email, None);

        let store = folio.store();
        assert_eq!(store.list_blog_slugs().await, vec!["hello-world"]);
        assert!(store.project("example-project").await.unwrap().is_some());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();
        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
