//! Builds well-formed RSS 2.0 feeds and serializes them as XML.
//!
//! - [`feed`]: channel and item builders, the finished [`Feed`]
//! - [`date`]: RFC 822 dates as used by `pubDate` and `lastBuildDate`
//! - [`language`]: accepted values for the channel `language`
//! - [`config`]: optional TOML settings
//! - [`xml`]: the element tree the builders assemble

pub mod config;
pub mod date;
pub mod feed;
pub mod language;
pub mod xml;

pub use config::{ConfigError, FeedConfig};
pub use date::Rfc822Date;
pub use feed::{ChannelBuilder, Feed, FeedError, ItemBuilder};
pub use language::LanguageCodes;
