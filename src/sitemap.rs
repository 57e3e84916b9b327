//! Sitemap generation: one `<url>` entry per fixed top-level route plus
//! one per post, with the changefreq/priority policy search engines are
//! told to expect for each class of page.

use crate::config::Config;
use crate::post::Post;

/// XML namespace for sitemaps.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A single URL entry in the sitemap.
struct UrlEntry {
    loc: String,
    changefreq: &'static str,
    priority: &'static str,
}

/// Renders the sitemap for the current post index. The fixed routes are
/// always present, so an empty index still yields a valid sitemap.
pub fn sitemap_xml(config: &Config, posts: &[Post]) -> String {
    let mut entries = vec![
        UrlEntry {
            loc: config.page_url(""),
            changefreq: "daily",
            priority: "1.0",
        },
        UrlEntry {
            loc: config.page_url("blog"),
            changefreq: "daily",
            priority: "0.8",
        },
        UrlEntry {
            loc: config.page_url("tools"),
            changefreq: "weekly",
            priority: "0.8",
        },
        UrlEntry {
            loc: config.page_url("about"),
            changefreq: "monthly",
            priority: "0.5",
        },
    ];
    entries.extend(posts.iter().map(|post| UrlEntry {
        loc: config.post_url(&post.slug),
        changefreq: "monthly",
        priority: "0.6",
    }));

    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{}">"#, SITEMAP_NS));
    xml.push('\n');
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
