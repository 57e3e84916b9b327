//! Converts markdown post bodies into HTML fragments.
//!
//! The converter is constructed fresh on every call: the parser, the
//! heading-anchor counters, and the output buffer are all locals, so
//! concurrent renders cannot observe each other's state and there is no
//! reset step to forget. Input is trusted (posts are authored, not
//! user-submitted) and is not sanitized.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

/// A rendered document: the HTML fragment plus the collected
/// table-of-contents entries. The TOC is an extension point; the default
/// page templates do not render it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// One heading anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,

    /// The heading's plain text.
    pub title: String,

    /// The anchor id injected into the rendered heading, unique within
    /// the document.
    pub id: String,
}

/// Converts a markdown body into an HTML fragment with stable heading
/// anchors. Fenced code blocks come with the parser; tables, footnotes,
/// strikethrough, task lists, and smart punctuation are enabled on top.
pub fn render(markdown: &str) -> Rendered {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let events: Vec<Event> = Parser::new_ext(markdown, options).collect();

    let mut toc = Vec::new();
    let mut seen = HashMap::new();
    let mut output = Vec::with_capacity(events.len());
    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let title = heading_text(&events[i + 1..]);
                let id = unique_anchor(&title, &mut seen);
                toc.push(TocEntry {
                    level: heading_level(*level),
                    title,
                    id: id.clone(),
                });
                output.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(CowStr::from(id)),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));
            }
            event => output.push(event.clone()),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, output.into_iter());
    Rendered { html: out, toc }
}

/// Collects the plain text of a heading from the events following its
/// start tag.
fn heading_text(events: &[Event]) -> String {
    let mut title = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(text) | Event::Code(text) => title.push_str(text),
            _ => {}
        }
    }
    title
}

/// Slugifies a heading title into an anchor id, deduplicating repeats
/// within one document with a numeric suffix. The `seen` map lives for a
/// single [`render`] call.
fn unique_anchor(title: &str, seen: &mut HashMap<String, usize>) -> String {
    let base = slug::slugify(title);
    let base = if base.is_empty() {
        String::from("section")
    } else {
        base
    };
    let count = seen.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{}-{}", base, *count - 1)
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_fenced_code_blocks() {
        let rendered = render("```rust\nfn main() {}\n```\n");
        assert!(rendered.html.contains("<pre><code class=\"language-rust\">"));
    }

    #[test]
    fn renders_tables() {
        let rendered = render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<td>1</td>"));
    }

    #[test]
    fn headings_get_anchors_and_toc_entries() {
        let rendered = render("# Intro\n\n## Setup\n\n## Setup\n");
        assert_eq!(
            rendered.toc,
            vec![
                TocEntry {
                    level: 1,
                    title: String::from("Intro"),
                    id: String::from("intro"),
                },
                TocEntry {
                    level: 2,
                    title: String::from("Setup"),
                    id: String::from("setup"),
                },
                TocEntry {
                    level: 2,
                    title: String::from("Setup"),
                    id: String::from("setup-1"),
                },
            ]
        );
        assert!(rendered.html.contains("<h1 id=\"intro\">"));
        assert!(rendered.html.contains("<h2 id=\"setup\">"));
        assert!(rendered.html.contains("<h2 id=\"setup-1\">"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let input = "# Title\n\nSome *body* text with `code`.\n";
        assert_eq!(render(input), render(input));
    }

    // Regression test for shared-converter state leakage: two distinct
    // documents rendered from many threads must each match their own
    // single-threaded rendering every time.
    #[test]
    fn concurrent_renders_are_isolated() {
        let doc_a = "# Alpha\n\n## Alpha\n\nFirst document body.\n";
        let doc_b = "# Beta\n\n## Beta\n\n## Beta\n\nSecond document body.\n";
        let want_a = render(doc_a);
        let want_b = render(doc_b);

        std::thread::scope(|scope| {
            for i in 0..8 {
                let (doc, want) = if i % 2 == 0 {
                    (doc_a, &want_a)
                } else {
                    (doc_b, &want_b)
                };
                scope.spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(&render(doc), want);
                    }
                });
            }
        });
    }
}
