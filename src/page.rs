//! Composes complete HTML documents from rendered fragments and the site
//! shell. The shell and the page fragments are Go-style templates
//! embedded at compile time and parsed once at construction, so a
//! [`PageComposer`] is a pure function of its inputs plus site constants
//! and holds no per-request state.

use crate::config::Config;
use crate::post::Post;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;

/// Builds full HTML pages. Construct once from the site configuration
/// and share across requests.
pub struct PageComposer {
    site_name: String,
    site_description: String,
    site_root: String,
    tools: Value,
    shell: Template,
    home: Template,
    listing: Template,
    article: Template,
    tool_list: Template,
    about: Template,
}

impl PageComposer {
    pub fn new(config: &Config) -> Result<PageComposer> {
        let tools = Value::Array(
            config
                .tools
                .iter()
                .map(|tool| {
                    let mut entry: HashMap<String, Value> = HashMap::new();
                    entry.insert("name".to_owned(), Value::String(tool.name.clone()));
                    entry.insert("blurb".to_owned(), Value::String(tool.blurb.clone()));
                    entry.insert("url".to_owned(), Value::String(tool.url.clone()));
                    Value::Object(entry)
                })
                .collect(),
        );

        Ok(PageComposer {
            site_name: config.site_name.clone(),
            site_description: config.description.clone(),
            site_root: config.page_url(""),
            tools,
            shell: parse_template(include_str!("../templates/base.html"))?,
            home: parse_template(include_str!("../templates/home.html"))?,
            listing: parse_template(include_str!("../templates/index.html"))?,
            article: parse_template(include_str!("../templates/post.html"))?,
            tool_list: parse_template(include_str!("../templates/tools.html"))?,
            about: parse_template(include_str!("../templates/about.html"))?,
        })
    }

    /// Wraps a body fragment with the site shell. `description` falls
    /// back to the site description and `canonical` to the site root.
    pub fn compose(
        &self,
        title: &str,
        body: &str,
        description: Option<&str>,
        canonical: Option<&str>,
    ) -> Result<String> {
        let description = match description {
            Some(d) if !d.is_empty() => d,
            _ => &self.site_description,
        };
        let mut values: HashMap<String, Value> = HashMap::new();
        values.insert("title".to_owned(), Value::String(title.to_owned()));
        values.insert("site_name".to_owned(), Value::String(self.site_name.clone()));
        values.insert("description".to_owned(), Value::String(description.to_owned()));
        values.insert(
            "canonical".to_owned(),
            Value::String(canonical.unwrap_or(&self.site_root).to_owned()),
        );
        values.insert("content".to_owned(), Value::String(body.to_owned()));
        execute(&self.shell, Value::Object(values))
    }

    /// The home page: intro, tool grid, and the three most recent posts.
    pub fn home_page(&self, posts: &[Post]) -> Result<String> {
        let recent: Vec<Value> = posts.iter().take(3).map(post_item).collect();
        let mut values: HashMap<String, Value> = HashMap::new();
        values.insert("site_name".to_owned(), Value::String(self.site_name.clone()));
        values.insert(
            "description".to_owned(),
            Value::String(self.site_description.clone()),
        );
        values.insert("tools".to_owned(), self.tools.clone());
        values.insert("posts".to_owned(), Value::Array(recent));
        let body = execute(&self.home, Value::Object(values))?;
        self.compose("Home", &body, None, None)
    }

    /// The blog listing. Renders a placeholder line when there are no
    /// posts.
    pub fn listing_page(&self, posts: &[Post]) -> Result<String> {
        let items: Vec<Value> = posts.iter().map(post_item).collect();
        let mut values: HashMap<String, Value> = HashMap::new();
        values.insert("posts".to_owned(), Value::Array(items));
        let body = execute(&self.listing, Value::Object(values))?;
        let canonical = format!("{}blog", self.site_root);
        self.compose("Blog", &body, None, Some(&canonical))
    }

    /// A single post page around an already-rendered body fragment.
    pub fn post_page(&self, post: &Post, body_html: &str) -> Result<String> {
        let mut values: HashMap<String, Value> = HashMap::new();
        values.insert("title".to_owned(), Value::String(post.title.clone()));
        values.insert(
            "meta".to_owned(),
            Value::String(format!(
                "{} · {} min read",
                meta_line(post),
                post.read_minutes()
            )),
        );
        values.insert("body".to_owned(), Value::String(body_html.to_owned()));
        let body = execute(&self.article, Value::Object(values))?;
        let canonical = format!("{}blog/{}", self.site_root, post.slug);
        self.compose(&post.title, &body, Some(&post.description), Some(&canonical))
    }

    pub fn tools_page(&self) -> Result<String> {
        let mut values: HashMap<String, Value> = HashMap::new();
        values.insert("tools".to_owned(), self.tools.clone());
        let body = execute(&self.tool_list, Value::Object(values))?;
        let canonical = format!("{}tools", self.site_root);
        self.compose("Tools", &body, None, Some(&canonical))
    }

    pub fn about_page(&self) -> Result<String> {
        let mut values: HashMap<String, Value> = HashMap::new();
        values.insert("site_name".to_owned(), Value::String(self.site_name.clone()));
        values.insert(
            "description".to_owned(),
            Value::String(self.site_description.clone()),
        );
        let body = execute(&self.about, Value::Object(values))?;
        let canonical = format!("{}about", self.site_root);
        self.compose("About", &body, None, Some(&canonical))
    }
}

/// The listing-item value for a post: title, relative URL, meta line,
/// and description.
fn post_item(post: &Post) -> Value {
    let mut entry: HashMap<String, Value> = HashMap::new();
    entry.insert("title".to_owned(), Value::String(post.title.clone()));
    entry.insert(
        "url".to_owned(),
        Value::String(format!("/blog/{}", post.slug)),
    );
    entry.insert("meta".to_owned(), Value::String(meta_line(post)));
    entry.insert(
        "description".to_owned(),
        Value::String(post.description.clone()),
    );
    Value::Object(entry)
}

/// The `date · tags` line shown under titles.
fn meta_line(post: &Post) -> String {
    let tags = if post.tags.is_empty() {
        String::from("untagged")
    } else {
        post.tags.join(", ")
    };
    if post.date.is_empty() {
        tags
    } else {
        format!("{} · {}", post.date, tags)
    }
}

fn parse_template(source: &str) -> Result<Template> {
    let mut template = Template::default();
    template.parse(source).map_err(Error::ParseTemplate)?;
    Ok(template)
}

fn execute(template: &Template, value: Value) -> Result<String> {
    // An Object context always converts.
    let context = gtmpl::Context::from(value).unwrap();
    let mut buffer = Vec::new();
    template.execute(&mut buffer, &context)?;
    String::from_utf8(buffer).map_err(Error::Utf8)
}

/// The result of a fallible page-composition operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error composing a page.
#[derive(Debug)]
pub enum Error {
    /// An error parsing one of the embedded templates.
    ParseTemplate(String),

    /// An error during template execution.
    Template(String),

    /// Returned when template output is not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ParseTemplate(err) => write!(f, "parsing template: {}", err),
            Error::Template(err) => err.fmt(f),
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ParseTemplate(_) => None,
            Error::Template(_) => None,
            Error::Utf8(err) => Some(err),
        }
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}
