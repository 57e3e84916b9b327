//! Defines the [`Post`] type and the [`DocumentStore`] that discovers and
//! parses posts from the filesystem. Each post is a markdown file with an
//! optional YAML metadata block delimited by `---` fences. The store keeps
//! no cache: every [`DocumentStore::load_posts`] call reflects the current
//! directory state.

use serde::Deserialize;
use std::fs::read_dir;
use std::io;
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSION: &str = ".md";
const FENCE: &str = "---";

/// One discovered blog post: parsed metadata plus the raw markdown body.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// Identifier derived from the filename stem; unique within one
    /// listing because filenames are unique.
    pub slug: String,

    /// Display title; falls back to the slug when absent.
    pub title: String,

    /// Publication date as a `YYYY-MM-DD` string, or empty.
    pub date: String,

    /// Short summary, possibly empty.
    pub description: String,

    /// Tags in the order they appear in the metadata.
    pub tags: Vec<String>,

    /// The markdown body with the metadata block stripped.
    pub content: String,
}

impl Post {
    /// Approximate read time in minutes: one minute per 400 characters of
    /// body, floor of one. Counts characters rather than words, which
    /// suits dense scripts and reads short for space-delimited text; an
    /// approximation, not a guarantee.
    pub fn read_minutes(&self) -> u64 {
        std::cmp::max(1, (self.content.chars().count() as f64 / 400.0).round() as u64)
    }

    /// Parses a post from a source document. A document without a leading
    /// metadata fence is all body; a metadata block that fails to parse
    /// as YAML degrades to default metadata rather than dropping the
    /// post.
    fn from_document(slug: &str, input: &str) -> Post {
        let (frontmatter, body) = match split_frontmatter(input) {
            Some((yaml, body)) if yaml.trim().is_empty() => (Frontmatter::default(), body),
            Some((yaml, body)) => match serde_yaml::from_str::<Frontmatter>(yaml) {
                Ok(frontmatter) => (frontmatter, body),
                Err(err) => {
                    tracing::warn!(slug, %err, "unparseable frontmatter, using defaults");
                    (Frontmatter::default(), body)
                }
            },
            None => (Frontmatter::default(), input),
        };

        Post {
            slug: slug.to_owned(),
            title: frontmatter.title.unwrap_or_else(|| slug.to_owned()),
            date: frontmatter.date,
            description: frontmatter.description,
            tags: frontmatter.tags,
            content: body.trim().to_owned(),
        }
    }
}

/// The recognized metadata fields. Everything is optional; unrecognized
/// fields are ignored.
#[derive(Default, Deserialize)]
struct Frontmatter {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    date: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    tags: Vec<String>,
}

/// Splits a leading `---`-fenced metadata block from the body. Returns
/// `None` when the document does not open with a fence or the closing
/// fence is missing, in which case the whole input is body.
fn split_frontmatter(input: &str) -> Option<(&str, &str)> {
    if !input.starts_with(FENCE) {
        return None;
    }
    let offset = input[FENCE.len()..].find(FENCE)?;
    let yaml_stop = FENCE.len() + offset;
    Some((
        &input[FENCE.len()..yaml_stop],
        &input[yaml_stop + FENCE.len()..],
    ))
}

/// Reads posts from `{content_dir}/blog`. Construct once and call
/// [`DocumentStore::load_posts`] per request.
pub struct DocumentStore {
    blog_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(content_dir: &Path) -> DocumentStore {
        DocumentStore {
            blog_dir: content_dir.join("blog"),
        }
    }

    /// Returns every post in the blog directory ordered by slug
    /// descending. With date-prefixed filenames this approximates
    /// newest-first; it is a filename sort, not a date sort.
    ///
    /// A missing directory yields an empty listing. A directory that
    /// exists but cannot be enumerated surfaces the error. An individual
    /// file that cannot be read is skipped with a warning so one bad
    /// document cannot take down the whole listing.
    pub fn load_posts(&self) -> io::Result<Vec<Post>> {
        if !self.blog_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for result in read_dir(&self.blog_dir)? {
            let entry = result?;
            let os_file_name = entry.file_name();
            let file_name = os_file_name.to_string_lossy();
            if !file_name.ends_with(MARKDOWN_EXTENSION) {
                continue;
            }
            let slug = file_name.trim_end_matches(MARKDOWN_EXTENSION);
            match std::fs::read_to_string(entry.path()) {
                Ok(contents) => posts.push(Post::from_document(slug, &contents)),
                Err(err) => {
                    tracing::warn!(slug, %err, "skipping unreadable post");
                }
            }
        }

        posts.sort_by(|a, b| b.slug.cmp(&a.slug));
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &Path) -> DocumentStore {
        std::fs::create_dir_all(dir.join("blog")).unwrap();
        DocumentStore::new(dir)
    }

    #[test]
    fn parses_all_recognized_fields() {
        let input = "---\n\
                     title: Shipping a tiny uptime checker\n\
                     date: 2026-02-13\n\
                     description: What fits in 500 lines\n\
                     tags: [rust, uptime]\n\
                     ---\n\
                     The body starts here.";
        let post = Post::from_document("2026-02-13-uptime", input);
        assert_eq!(
            post,
            Post {
                slug: String::from("2026-02-13-uptime"),
                title: String::from("Shipping a tiny uptime checker"),
                date: String::from("2026-02-13"),
                description: String::from("What fits in 500 lines"),
                tags: vec![String::from("rust"), String::from("uptime")],
                content: String::from("The body starts here."),
            }
        );
    }

    #[test]
    fn document_without_frontmatter_is_all_body() {
        let post = Post::from_document("plain", "Just text, no metadata.");
        assert_eq!(post.title, "plain");
        assert_eq!(post.date, "");
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "Just text, no metadata.");
    }

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let post = Post::from_document("minimal", "---\ndate: 2026-01-01\n---\nBody.");
        assert_eq!(post.title, "minimal");
        assert_eq!(post.date, "2026-01-01");
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "Body.");
    }

    #[test]
    fn malformed_frontmatter_degrades_to_defaults() {
        let post = Post::from_document("broken", "---\ntitle: [unclosed\n---\nStill the body.");
        assert_eq!(post.title, "broken");
        assert_eq!(post.content, "Still the body.");
    }

    #[test]
    fn empty_frontmatter_block_is_accepted() {
        let post = Post::from_document("empty", "---\n---\nBody only.");
        assert_eq!(post.title, "empty");
        assert_eq!(post.content, "Body only.");
    }

    #[test]
    fn missing_directory_is_an_empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(&dir.path().join("nowhere"));
        assert_eq!(store.load_posts().unwrap(), Vec::new());
    }

    #[test]
    fn posts_are_ordered_by_slug_descending() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let blog = dir.path().join("blog");
        std::fs::write(blog.join("2026-01-05-first.md"), "---\ntitle: First\n---\nA").unwrap();
        std::fs::write(blog.join("2026-02-10-second.md"), "---\ntitle: Second\n---\nB").unwrap();
        std::fs::write(blog.join("notes.txt"), "not a post").unwrap();

        let slugs: Vec<String> = store
            .load_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["2026-02-10-second", "2026-01-05-first"]);

        // A later stem sorts to the front on the next load.
        std::fs::write(blog.join("2026-03-01-third.md"), "---\ntitle: Third\n---\nC").unwrap();
        let posts = store.load_posts().unwrap();
        assert_eq!(posts[0].slug, "2026-03-01-third");
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn read_minutes_boundaries() {
        let mut post = Post::from_document("t", "");
        assert_eq!(post.read_minutes(), 1);
        post.content = "a".repeat(400);
        assert_eq!(post.read_minutes(), 1);
        post.content = "a".repeat(1601);
        assert_eq!(post.read_minutes(), 4);
    }
}
