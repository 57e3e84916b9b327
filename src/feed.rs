//! Support for creating the RSS feed from a list of posts. The channel
//! carries the site constants; items are the most recent posts, capped at
//! [`FEED_LIMIT`]. Titles and descriptions are entity-escaped by the
//! serializer.

use crate::config::Config;
use crate::post::Post;
use chrono::NaiveDate;
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

/// Number of most recent posts included in the feed.
const FEED_LIMIT: usize = 20;

/// Builds the feed channel for the current post index.
pub fn rss_channel(config: &Config, posts: &[Post]) -> Channel {
    let items: Vec<Item> = posts
        .iter()
        .take(FEED_LIMIT)
        .map(|post| feed_item(config, post))
        .collect();

    ChannelBuilder::default()
        .title(config.site_name.clone())
        .link(config.page_url(""))
        .description(config.description.clone())
        .language(config.language.clone())
        .items(items)
        .build()
}

/// Serializes the feed to XML.
pub fn rss_xml(config: &Config, posts: &[Post]) -> String {
    rss_channel(config, posts).to_string()
}

/// Builds one feed item. The guid is the post's canonical URL. A date
/// that does not parse as `YYYY-MM-DD` drops the `pubDate` element for
/// that item rather than failing the feed.
fn feed_item(config: &Config, post: &Post) -> Item {
    let link = config.post_url(&post.slug);
    ItemBuilder::default()
        .title(post.title.clone())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.description.clone())
        .pub_date(pub_date(&post.date))
        .build()
}

/// Midnight UTC on the post's date, in RFC 2822 form.
fn pub_date(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().to_rfc2822())
}
