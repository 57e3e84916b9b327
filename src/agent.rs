//! Plaintext projections: the robots directive file and the two
//! agent-friendly dumps (`llms.txt` summary and `llms-full.txt` full
//! content). All three are pure functions of the site constants and the
//! post index.

use crate::config::Config;
use crate::post::Post;

/// Crawlers that get an explicit allow stanza in the robots file.
/// Configuration data; extend the list here, not the generator.
const AI_CRAWLERS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "Claude-Web",
    "anthropic-ai",
    "PerplexityBot",
];

/// The robots directive file: allow-all, a sitemap pointer, and explicit
/// allow stanzas for the AI crawlers.
pub fn robots_txt(config: &Config) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n\n");
    out.push_str(&format!("Sitemap: {}\n", config.page_url("sitemap.xml")));
    out.push_str("\n# AI agents\n");
    for crawler in AI_CRAWLERS {
        out.push_str(&format!("User-agent: {}\nAllow: /\n\n", crawler));
    }
    out
}

/// The summary dump: site description, the fixed tool list, and one line
/// per post.
pub fn agent_summary(config: &Config, posts: &[Post]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", config.site_name));
    out.push_str(&format!("> {}\n\n", config.description));
    out.push_str("## Tools\n\n");
    for tool in &config.tools {
        out.push_str(&format!("- {}: {} - {}\n", tool.name, tool.blurb, tool.url));
    }
    out.push_str("\n## Blog posts\n\n");
    for post in posts {
        out.push_str(&format!("- {}: {}\n", post.title, config.post_url(&post.slug)));
    }
    out.push_str(&format!("\n## Site\n\n{}\n", config.page_url("")));
    out
}

/// The full dump: the summary preamble plus every post's metadata and
/// complete body, separated by a delimiter line.
pub fn agent_full(config: &Config, posts: &[Post]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {} - full content\n\n", config.site_name));
    out.push_str(&format!("> {}\n\n", config.description));
    out.push_str("## All blog posts\n");
    for post in posts {
        let tags = if post.tags.is_empty() {
            String::from("none")
        } else {
            post.tags.join(", ")
        };
        out.push_str(&format!("\n### {}\n\n", post.title));
        out.push_str(&format!("Date: {}\n", post.date));
        out.push_str(&format!("Tags: {}\n", tags));
        out.push_str(&format!("URL: {}\n\n", config.post_url(&post.slug)));
        out.push_str(&post.content);
        out.push_str("\n\n---\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn post(slug: &str, title: &str) -> Post {
        Post {
            slug: slug.to_owned(),
            title: title.to_owned(),
            date: String::from("2026-02-13"),
            description: String::new(),
            tags: vec![String::from("rust"), String::from("web")],
            content: format!("Body of {}.", title),
        }
    }

    #[test]
    fn robots_allows_everything_and_points_at_sitemap() {
        let robots = robots_txt(&Config::default());
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Sitemap: https://emberkit.dev/sitemap.xml"));
        for crawler in AI_CRAWLERS {
            assert!(robots.contains(&format!("User-agent: {}\nAllow: /", crawler)));
        }
    }

    #[test]
    fn summary_lists_tools_and_posts() {
        let config = Config::default();
        let posts = vec![post("2026-02-13-hello", "Hello"), post("2026-01-01-first", "First")];
        let summary = agent_summary(&config, &posts);
        assert!(summary.contains("# EmberKit"));
        assert!(summary.contains("- Pulse:"));
        assert!(summary.contains("- Hello: https://emberkit.dev/blog/2026-02-13-hello"));
        assert!(summary.contains("- First: https://emberkit.dev/blog/2026-01-01-first"));
        // summary never includes bodies
        assert!(!summary.contains("Body of"));
    }

    #[test]
    fn full_dump_contains_every_body_with_delimiters() {
        let config = Config::default();
        let posts = vec![post("a", "Alpha"), post("b", "Beta")];
        let full = agent_full(&config, &posts);
        assert!(full.contains("### Alpha"));
        assert!(full.contains("Body of Alpha."));
        assert!(full.contains("Body of Beta."));
        assert!(full.contains("Tags: rust, web"));
        assert!(full.contains("Date: 2026-02-13"));
        assert_eq!(full.matches("\n---\n").count(), 2);
    }

    #[test]
    fn empty_index_still_produces_preambles() {
        let config = Config::default();
        let summary = agent_summary(&config, &[]);
        assert!(summary.contains("## Blog posts"));
        let full = agent_full(&config, &[]);
        assert!(full.contains("## All blog posts"));
    }
}
