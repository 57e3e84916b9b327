//! Site and server configuration. All site-level constants (name, base
//! URL, description, the fixed tool directory) live here and are threaded
//! into the components that need them at construction; nothing reads them
//! from ambient globals.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// One entry in the fixed tool directory shown on the home and tools
/// pages and in the agent feeds.
#[derive(Clone, Debug, Deserialize)]
pub struct Tool {
    pub name: String,
    pub blurb: String,
    pub url: String,
}

/// The full site configuration. Every field has a default, so the server
/// runs without a configuration file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name of the site.
    pub site_name: String,

    /// Absolute base URL of the deployed site. Normalized to end in a
    /// trailing slash so paths can be appended directly.
    pub base_url: Url,

    /// Site-level description, used as the fallback for page metadata
    /// and as the feed/channel description.
    pub description: String,

    /// Feed language code.
    pub language: String,

    /// Root of the content tree; posts live in `{content_dir}/blog`.
    pub content_dir: PathBuf,

    /// Listen address.
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// The fixed tool directory.
    pub tools: Vec<Tool>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            site_name: String::from("EmberKit"),
            // A literal URL always parses.
            base_url: Url::parse("https://emberkit.dev/").unwrap(),
            description: String::from(
                "A toolkit of small, self-hosted apps for indie hackers",
            ),
            language: String::from("en"),
            content_dir: PathBuf::from("content"),
            host: String::from("0.0.0.0"),
            port: 8085,
            tools: vec![
                Tool {
                    name: String::from("Pulse"),
                    blurb: String::from("Uptime checks with chat alerts"),
                    url: String::from("https://pulse.emberkit.dev"),
                },
                Tool {
                    name: String::from("Relay"),
                    blurb: String::from("Webhooks forwarded to your chat"),
                    url: String::from("https://relay.emberkit.dev"),
                },
                Tool {
                    name: String::from("Snip"),
                    blurb: String::from("Short links with click counts"),
                    url: String::from("https://snip.emberkit.dev"),
                },
                Tool {
                    name: String::from("Digest"),
                    blurb: String::from("A daily summary of tech news"),
                    url: String::from("https://digest.emberkit.dev"),
                },
                Tool {
                    name: String::from("Paste"),
                    blurb: String::from("Code sharing with highlighting"),
                    url: String::from("https://paste.emberkit.dev"),
                },
            ],
        }
    }
}

impl Config {
    /// Loads the configuration from a YAML file. Missing fields take
    /// their defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening config file '{}'", path.display()))?;
        let mut config: Config = serde_yaml::from_reader(file)
            .with_context(|| format!("parsing config file '{}'", path.display()))?;
        config.normalize();
        Ok(config)
    }

    /// Ensures the base URL ends in a trailing slash so [`Config::page_url`]
    /// can append paths without re-parsing.
    fn normalize(&mut self) {
        if !self.base_url.path().ends_with('/') {
            let path = format!("{}/", self.base_url.path());
            self.base_url.set_path(&path);
        }
    }

    /// Absolute URL for a site path. The empty path is the site root.
    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Canonical URL for a post.
    pub fn post_url(&self, slug: &str) -> String {
        self.page_url(&format!("blog/{}", slug))
    }
}
