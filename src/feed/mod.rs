//! RSS 2.0 document assembly.
//!
//! A feed is built in two stages:
//!
//! - [`ChannelBuilder`] collects the channel fields, validates the required
//!   ones and finalizes into a [`Feed`]
//! - [`Feed::add_item`] hands out an [`ItemBuilder`] per item; each
//!   successful [`ItemBuilder::build`] appends the item to the channel
//!
//! The finished [`Feed`] renders to any [`std::io::Write`] sink or to a file.
//!
//! # Example
//!
//! ```
//! use rssgen::{ChannelBuilder, Rfc822Date};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut feed = ChannelBuilder::new()
//!     .title("Example News Headlines")
//!     .link(&Url::parse("https://news.example.org/")?)
//!     .description("Example news on the internet.")
//!     .skip_days(&["Saturday", "Sunday"])?
//!     .build()?;
//!
//! feed.add_item()
//!     .title("Sharp tools for emergencies")
//!     .guid_url(&Url::parse("https://news.example.org/2020/10/27/argv")?)
//!     .pub_date(&Rfc822Date::from_raw("Tue, 27 Oct 2020 09:00:00 GMT"))
//!     .build()?;
//!
//! let xml = feed.render_to_string(2)?;
//! assert!(xml.contains("<day>Sunday</day>"));
//! # Ok(())
//! # }
//! ```

mod channel;
mod document;
mod error;
mod item;
mod skip;

pub use channel::{
    ChannelBuilder, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, GENERATOR, MAX_IMAGE_HEIGHT,
    MAX_IMAGE_WIDTH,
};
pub use document::{Feed, RSS_VERSION};
pub use error::FeedError;
pub use item::ItemBuilder;
pub use skip::{MAX_SKIP_DAYS, MAX_SKIP_HOURS, WEEKDAYS};
