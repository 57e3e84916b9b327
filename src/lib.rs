//! The library code for the EmberKit site server. The architecture can be
//! generally broken down into a content pipeline and the HTTP surface that
//! serves it:
//!
//! 1. Discovering and parsing posts from source files on disk
//!    ([`crate::post`])
//! 2. Converting post bodies into HTML ([`crate::markdown`]) and wrapping
//!    the result in the site shell ([`crate::page`])
//! 3. Projecting the same ordered post list into the non-HTML
//!    representations: the sitemap ([`crate::sitemap`]), the RSS feed
//!    ([`crate::feed`]), and the plaintext robots and agent dumps
//!    ([`crate::agent`])
//!
//! There is deliberately no cache between the steps: every request
//! re-reads the posts directory, so the filesystem is the only source of
//! truth and staleness is bounded by the time since the last write. Two
//! concurrent requests may observe different directory states while a
//! file is being edited; that is accepted behavior, not a bug.
//!
//! [`crate::server`] wires the pipeline to axum routes.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod agent;
pub mod config;
pub mod feed;
pub mod markdown;
pub mod page;
pub mod post;
pub mod server;
pub mod sitemap;
