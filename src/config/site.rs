//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    /// Blog documents, relative to `content_dir`
    pub blog_dir: String,
    /// Project manifest, relative to `content_dir`
    pub projects_manifest: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Home page
    #[serde(default)]
    pub contact: ContactConfig,
    pub skills: Vec<Skill>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            blog_dir: "blog".to_string(),
            projects_manifest: "projects/meta.json".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            highlight: HighlightConfig::default(),

            contact: ContactConfig::default(),
            skills: default_skills(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Mail-sending endpoint the form posts to
    pub endpoint: String,
    /// Seconds before a successful submission reverts to idle
    pub reset_after_secs: u64,
    /// Address shown as the direct `mailto:` alternative
    pub email: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/contact".to_string(),
            reset_after_secs: 3,
            email: None,
        }
    }
}

/// One entry of the skills list on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Opaque icon identifier, emitted as a data attribute
    #[serde(default)]
    pub icon: Option<String>,
}

impl Skill {
    pub fn new(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: Some(icon.to_string()),
        }
    }
}

fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new("React", "react"),
        Skill::new("Next.js", "nextdotjs"),
        Skill::new("TypeScript", "typescript"),
        Skill::new("Node.js", "nodedotjs"),
        Skill::new("Express", "express"),
        Skill::new("PostgreSQL", "postgresql"),
        Skill::new("Tailwind CSS", "tailwindcss"),
        Skill::new("MongoDB", "mongodb"),
        Skill::new("Motion Dev", "framer"),
    ]
}
