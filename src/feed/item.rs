use url::Url;

use super::document::Feed;
use super::error::FeedError;
use crate::date::Rfc822Date;
use crate::xml::Element;

/// Item children in RSS 2.0 document order.
const ITEM_ORDER: [&str; 10] = [
    "title",
    "link",
    "description",
    "author",
    "category",
    "comments",
    "enclosure",
    "guid",
    "pubDate",
    "source",
];

fn item_rank(name: &str) -> usize {
    ITEM_ORDER
        .iter()
        .position(|candidate| *candidate == name)
        .unwrap_or(ITEM_ORDER.len())
}

/// Builder for one `item` of a [`Feed`].
///
/// An item may be a story with a synopsis and a link to the full text, or
/// complete in itself. Every element is optional, but at least one of title
/// or description must be present.
///
/// The builder borrows the feed mutably; [`ItemBuilder::build`] appends the
/// item to the channel. Dropping the builder, or a failed `build`, leaves the
/// feed untouched.
#[derive(Debug)]
pub struct ItemBuilder<'a> {
    feed: &'a mut Feed,
    item: Element,
    has_title: bool,
    has_description: bool,
}

impl<'a> ItemBuilder<'a> {
    pub(crate) fn new(feed: &'a mut Feed) -> Self {
        Self {
            feed,
            item: Element::new("item"),
            has_title: false,
            has_description: false,
        }
    }

    fn set_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.item.replace_child(Element::with_text(name, value));
        self
    }

    pub fn title(mut self, value: &str) -> Self {
        self.has_title = true;
        self.set_text("title", value)
    }

    pub fn link(self, value: &Url) -> Self {
        self.set_text("link", value.as_str())
    }

    /// The item synopsis. Entity-encoded HTML is allowed.
    pub fn description(mut self, value: &str) -> Self {
        self.has_description = true;
        self.set_text("description", value)
    }

    /// Email address of the author.
    pub fn author(self, value: &str) -> Self {
        self.set_text("author", value)
    }

    pub fn category(mut self, value: &str) -> Self {
        self.item.append_child(Element::with_text("category", value));
        self
    }

    pub fn category_with_domain(mut self, value: &str, domain: impl AsRef<str>) -> Self {
        let mut category = Element::with_text("category", value);
        category.set_attribute("domain", domain.as_ref());
        self.item.append_child(category);
        self
    }

    /// URL of a page for comments on the item.
    pub fn comments(self, value: &Url) -> Self {
        self.set_text("comments", value.as_str())
    }

    /// Attaches a media object: its URL, size in bytes and MIME type.
    pub fn enclosure(mut self, url: &Url, length: u64, mime_type: &str) -> Self {
        let mut enclosure = Element::new("enclosure");
        enclosure.set_attribute("url", url.as_str());
        enclosure.set_attribute("length", length.to_string());
        enclosure.set_attribute("type", mime_type);
        self.item.replace_child(enclosure);
        self
    }

    /// A URL uniquely identifying the item. Always a permalink.
    pub fn guid_url(self, value: &Url) -> Self {
        self.guid(value.as_str(), true)
    }

    /// A string uniquely identifying the item. `isPermaLink="true"` is only
    /// rendered when `is_perma_link` is set.
    pub fn guid(mut self, value: &str, is_perma_link: bool) -> Self {
        let mut guid = Element::with_text("guid", value);
        if is_perma_link {
            guid.set_attribute("isPermaLink", "true");
        }
        self.item.replace_child(guid);
        self
    }

    pub fn pub_date(self, value: &Rfc822Date) -> Self {
        self.set_text("pubDate", value.as_str())
    }

    /// The channel the item came from, with the URL of its feed.
    pub fn source(mut self, name: &str, url: &Url) -> Self {
        let mut source = Element::with_text("source", name);
        source.set_attribute("url", url.as_str());
        self.item.replace_child(source);
        self
    }

    /// Validates the item and appends it to the feed.
    ///
    /// # Errors
    ///
    /// [`FeedError::MissingRequiredField`] if neither title nor description
    /// was set. The feed is not modified in that case.
    pub fn build(self) -> Result<(), FeedError> {
        if !self.has_title && !self.has_description {
            return Err(FeedError::MissingRequiredField {
                element: "item",
                requirement: "one of title or description is required".to_owned(),
            });
        }

        let mut item = self.item;
        item.sort_children_by_rank(item_rank);
        tracing::debug!(elements = item.elements().count(), "Appending RSS item");
        self.feed.append_item(item);
        Ok(())
    }
}
