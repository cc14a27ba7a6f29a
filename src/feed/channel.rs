use std::sync::Arc;

use url::Url;

use super::document::Feed;
use super::error::FeedError;
use super::skip::{skip_days_element, skip_hours_element};
use crate::config::FeedConfig;
use crate::date::Rfc822Date;
use crate::language::LanguageCodes;
use crate::xml::Element;

/// Maximum `image/width` allowed by RSS 2.0.
pub const MAX_IMAGE_WIDTH: u32 = 144;
/// Maximum `image/height` allowed by RSS 2.0.
pub const MAX_IMAGE_HEIGHT: u32 = 400;
pub const DEFAULT_IMAGE_WIDTH: u32 = 88;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 31;

/// Text of the `generator` element appended to every channel.
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Channel children in the order aggregators expect them.
const CHANNEL_ORDER: [&str; 18] = [
    "title",
    "link",
    "description",
    "language",
    "copyright",
    "managingEditor",
    "webMaster",
    "pubDate",
    "lastBuildDate",
    "category",
    "docs",
    "cloud",
    "ttl",
    "image",
    "textInput",
    "skipHours",
    "skipDays",
    "generator",
];

fn channel_rank(name: &str) -> usize {
    CHANNEL_ORDER
        .iter()
        .position(|candidate| *candidate == name)
        .unwrap_or(CHANNEL_ORDER.len())
}

#[derive(Debug, Default)]
struct ImageBlock {
    url: Option<String>,
    title: Option<String>,
    link: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    description: Option<String>,
}

impl ImageBlock {
    fn into_element(self) -> Result<Element, FeedError> {
        FeedError::require_all(
            "image",
            &[
                ("url", self.url.is_some()),
                ("title", self.title.is_some()),
                ("link", self.link.is_some()),
            ],
        )?;

        let mut image = Element::new("image");
        let parts = [
            ("url", self.url),
            ("title", self.title),
            ("link", self.link),
            ("width", Some(self.width.unwrap_or(DEFAULT_IMAGE_WIDTH).to_string())),
            ("height", Some(self.height.unwrap_or(DEFAULT_IMAGE_HEIGHT).to_string())),
            ("description", self.description),
        ];
        for (name, value) in parts {
            if let Some(value) = value {
                image.append_child(Element::with_text(name, value));
            }
        }
        Ok(image)
    }
}

#[derive(Debug, Default)]
struct CloudBlock {
    domain: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    register_procedure: Option<String>,
    protocol: Option<String>,
}

impl CloudBlock {
    fn into_element(self) -> Result<Element, FeedError> {
        let port = self.port.map(|port| port.to_string());
        let attributes = [
            ("domain", self.domain),
            ("port", port),
            ("path", self.path),
            ("registerProcedure", self.register_procedure),
            ("protocol", self.protocol),
        ];
        let presence: Vec<(&str, bool)> = attributes
            .iter()
            .map(|(name, value)| (*name, value.is_some()))
            .collect();
        FeedError::require_all("cloud", &presence)?;

        let mut cloud = Element::new("cloud");
        for (name, value) in attributes {
            if let Some(value) = value {
                cloud.set_attribute(name, value);
            }
        }
        Ok(cloud)
    }
}

#[derive(Debug, Default)]
struct TextInputBlock {
    title: Option<String>,
    description: Option<String>,
    name: Option<String>,
    link: Option<String>,
}

impl TextInputBlock {
    fn into_element(self) -> Result<Element, FeedError> {
        let parts = [
            ("title", self.title),
            ("description", self.description),
            ("name", self.name),
            ("link", self.link),
        ];
        let presence: Vec<(&str, bool)> = parts
            .iter()
            .map(|(name, value)| (*name, value.is_some()))
            .collect();
        FeedError::require_all("textInput", &presence)?;

        let mut text_input = Element::new("textInput");
        for (name, value) in parts {
            if let Some(value) = value {
                text_input.append_child(Element::with_text(name, value));
            }
        }
        Ok(text_input)
    }
}

/// Builder for the `channel` of an RSS 2.0 document.
///
/// Scalar fields are written into the channel element as they are set. The
/// `image`, `cloud` and `textInput` blocks are held aside and only appended
/// by [`ChannelBuilder::build`] if one of their setters was called.
///
/// Setters take the builder by value so calls chain; validating setters
/// return a `Result` and chain with `?`. `build` consumes the builder, so a
/// builder can be finalized at most once.
///
/// ```
/// use rssgen::ChannelBuilder;
/// use url::Url;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let feed = ChannelBuilder::new()
///     .title("Example News Headlines")
///     .link(&Url::parse("https://news.example.org/")?)
///     .description("Example news on the internet.")
///     .language("en")?
///     .ttl(1440)
///     .build()?;
/// assert!(feed.render_to_string(0)?.contains("<ttl>1440</ttl>"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChannelBuilder {
    channel: Element,
    languages: Arc<LanguageCodes>,
    has_title: bool,
    has_link: bool,
    has_description: bool,
    image: Option<ImageBlock>,
    cloud: Option<CloudBlock>,
    text_input: Option<TextInputBlock>,
}

impl Default for ChannelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelBuilder {
    /// Creates an empty builder validating languages against
    /// [`LanguageCodes::global`].
    pub fn new() -> Self {
        Self::with_language_codes(LanguageCodes::global())
    }

    /// Creates an empty builder validating languages against `languages`.
    pub fn with_language_codes(languages: Arc<LanguageCodes>) -> Self {
        Self {
            channel: Element::new("channel"),
            languages,
            has_title: false,
            has_link: false,
            has_description: false,
            image: None,
            cloud: None,
            text_input: None,
        }
    }

    /// Creates an empty builder using the language table from `config`.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::with_language_codes(Arc::new(config.language_codes()))
    }

    fn set_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.channel.replace_child(Element::with_text(name, value));
        self
    }

    /// The name of the channel.
    pub fn title(mut self, value: &str) -> Self {
        self.has_title = true;
        self.set_text("title", value)
    }

    /// The URL of the website the channel corresponds to.
    pub fn link(mut self, value: &Url) -> Self {
        self.has_link = true;
        self.set_text("link", value.as_str())
    }

    /// Phrase or sentence describing the channel.
    pub fn description(mut self, value: &str) -> Self {
        self.has_description = true;
        self.set_text("description", value)
    }

    /// The language the channel is written in.
    ///
    /// # Errors
    ///
    /// [`FeedError::InvalidEnumValue`] if `value` is not in the configured
    /// language table.
    pub fn language(self, value: &str) -> Result<Self, FeedError> {
        if !self.languages.contains(value) {
            return Err(FeedError::InvalidEnumValue {
                field: "language",
                value: value.to_owned(),
                allowed: self.languages.sorted().join(", "),
            });
        }
        Ok(self.set_text("language", value))
    }

    pub fn copyright(self, value: &str) -> Self {
        self.set_text("copyright", value)
    }

    /// Email address of the person responsible for editorial content.
    pub fn managing_editor(self, value: &str) -> Self {
        self.set_text("managingEditor", value)
    }

    /// Email address of the person responsible for technical issues.
    pub fn web_master(self, value: &str) -> Self {
        self.set_text("webMaster", value)
    }

    pub fn pub_date(self, value: &Rfc822Date) -> Self {
        self.set_text("pubDate", value.as_str())
    }

    /// The last time the content of the channel changed.
    pub fn last_build_date(self, value: &Rfc822Date) -> Self {
        self.set_text("lastBuildDate", value.as_str())
    }

    /// Adds a category. Categories repeat and are kept in call order.
    pub fn category(mut self, value: &str) -> Self {
        self.channel
            .append_child(Element::with_text("category", value));
        self
    }

    /// Adds a category qualified by a taxonomy domain, given as free text or
    /// as a [`Url`].
    pub fn category_with_domain(mut self, value: &str, domain: impl AsRef<str>) -> Self {
        let mut category = Element::with_text("category", value);
        category.set_attribute("domain", domain.as_ref());
        self.channel.append_child(category);
        self
    }

    /// URL of the documentation for the RSS format.
    pub fn docs(self, value: &Url) -> Self {
        self.set_text("docs", value.as_str())
    }

    /// Registers a publish-subscribe endpoint in one call.
    pub fn cloud(
        self,
        domain: &str,
        port: u16,
        path: &str,
        register_procedure: &str,
        protocol: &str,
    ) -> Self {
        self.cloud_domain(domain)
            .cloud_port(port)
            .cloud_path(path)
            .cloud_register_procedure(register_procedure)
            .cloud_protocol(protocol)
    }

    fn cloud_block(&mut self) -> &mut CloudBlock {
        self.cloud.get_or_insert_with(CloudBlock::default)
    }

    pub fn cloud_domain(mut self, value: &str) -> Self {
        self.cloud_block().domain = Some(value.to_owned());
        self
    }

    pub fn cloud_port(mut self, value: u16) -> Self {
        self.cloud_block().port = Some(value);
        self
    }

    pub fn cloud_path(mut self, value: &str) -> Self {
        self.cloud_block().path = Some(value.to_owned());
        self
    }

    pub fn cloud_register_procedure(mut self, value: &str) -> Self {
        self.cloud_block().register_procedure = Some(value.to_owned());
        self
    }

    /// `xml-rpc`, `soap` or `http-post`.
    pub fn cloud_protocol(mut self, value: &str) -> Self {
        self.cloud_block().protocol = Some(value.to_owned());
        self
    }

    /// Minutes a consumer may cache the channel.
    pub fn ttl(self, minutes: u32) -> Self {
        self.set_text("ttl", minutes.to_string())
    }

    /// Starts the channel image with its three required parts.
    pub fn image(self, url: &Url, title: &str, link: &Url) -> Self {
        self.image_url(url).image_title(title).image_link(link)
    }

    fn image_block(&mut self) -> &mut ImageBlock {
        self.image.get_or_insert_with(ImageBlock::default)
    }

    /// URL of a GIF, JPEG or PNG image representing the channel.
    pub fn image_url(mut self, value: &Url) -> Self {
        self.image_block().url = Some(value.to_string());
        self
    }

    pub fn image_title(mut self, value: &str) -> Self {
        self.image_block().title = Some(value.to_owned());
        self
    }

    pub fn image_link(mut self, value: &Url) -> Self {
        self.image_block().link = Some(value.to_string());
        self
    }

    fn started_image(&mut self, setter: &str) -> Result<&mut ImageBlock, FeedError> {
        self.image.as_mut().ok_or_else(|| {
            FeedError::PreconditionViolation(format!(
                "Image must be defined prior to setting {setter}"
            ))
        })
    }

    /// Image width in pixels, defaulting to 88 when not set.
    ///
    /// # Errors
    ///
    /// [`FeedError::OutOfRange`] above 144, [`FeedError::PreconditionViolation`]
    /// if no image field was set yet.
    pub fn image_width(mut self, value: u32) -> Result<Self, FeedError> {
        if value > MAX_IMAGE_WIDTH {
            return Err(FeedError::OutOfRange {
                field: "image width",
                value: i64::from(value),
                min: 0,
                max: i64::from(MAX_IMAGE_WIDTH),
            });
        }
        self.started_image("image width")?.width = Some(value);
        Ok(self)
    }

    /// Image height in pixels, defaulting to 31 when not set.
    ///
    /// # Errors
    ///
    /// [`FeedError::OutOfRange`] above 400, [`FeedError::PreconditionViolation`]
    /// if no image field was set yet.
    pub fn image_height(mut self, value: u32) -> Result<Self, FeedError> {
        if value > MAX_IMAGE_HEIGHT {
            return Err(FeedError::OutOfRange {
                field: "image height",
                value: i64::from(value),
                min: 0,
                max: i64::from(MAX_IMAGE_HEIGHT),
            });
        }
        self.started_image("image height")?.height = Some(value);
        Ok(self)
    }

    pub fn image_description(mut self, value: &str) -> Result<Self, FeedError> {
        self.started_image("image description")?.description = Some(value.to_owned());
        Ok(self)
    }

    /// Sets the text input box in one call.
    pub fn text_input(self, title: &str, description: &str, name: &str, link: &Url) -> Self {
        self.text_input_title(title)
            .text_input_description(description)
            .text_input_name(name)
            .text_input_link(link)
    }

    fn text_input_block(&mut self) -> &mut TextInputBlock {
        self.text_input.get_or_insert_with(TextInputBlock::default)
    }

    /// Label of the submit button.
    pub fn text_input_title(mut self, value: &str) -> Self {
        self.text_input_block().title = Some(value.to_owned());
        self
    }

    pub fn text_input_description(mut self, value: &str) -> Self {
        self.text_input_block().description = Some(value.to_owned());
        self
    }

    /// Name of the text object in the input area.
    pub fn text_input_name(mut self, value: &str) -> Self {
        self.text_input_block().name = Some(value.to_owned());
        self
    }

    /// URL of the CGI script processing the input.
    pub fn text_input_link(mut self, value: &Url) -> Self {
        self.text_input_block().link = Some(value.to_string());
        self
    }

    /// Hours (GMT, `0..=23`) during which aggregators may skip the channel.
    /// A second call replaces the previous list.
    ///
    /// # Errors
    ///
    /// [`FeedError::DuplicateValue`] for more than 24 values or repeated
    /// values, [`FeedError::OutOfRange`] for an hour above 23.
    pub fn skip_hours(mut self, hours: &[u8]) -> Result<Self, FeedError> {
        self.channel.replace_child(skip_hours_element(hours)?);
        Ok(self)
    }

    /// Weekday names (`Monday` … `Sunday`) during which aggregators may skip
    /// the channel. A second call replaces the previous list.
    ///
    /// # Errors
    ///
    /// [`FeedError::DuplicateValue`] for more than 7 values or repeated
    /// values, [`FeedError::InvalidEnumValue`] for an unknown day name.
    pub fn skip_days<S: AsRef<str>>(mut self, days: &[S]) -> Result<Self, FeedError> {
        self.channel.replace_child(skip_days_element(days)?);
        Ok(self)
    }

    /// Validates the channel and finalizes it into a [`Feed`].
    ///
    /// # Errors
    ///
    /// [`FeedError::MissingRequiredField`] unless title, link and
    /// description were all set, or if a started image, cloud or textInput
    /// block lacks one of its required parts.
    pub fn build(self) -> Result<Feed, FeedError> {
        let Self {
            mut channel,
            has_title,
            has_link,
            has_description,
            image,
            cloud,
            text_input,
            ..
        } = self;

        FeedError::require_all(
            "channel",
            &[
                ("title", has_title),
                ("link", has_link),
                ("description", has_description),
            ],
        )?;

        if let Some(cloud) = cloud {
            channel.append_child(cloud.into_element()?);
        }
        if let Some(image) = image {
            channel.append_child(image.into_element()?);
        }
        if let Some(text_input) = text_input {
            channel.append_child(text_input.into_element()?);
        }

        channel.sort_children_by_rank(channel_rank);
        channel.append_child(Element::with_text("generator", GENERATOR));

        tracing::debug!(
            elements = channel.elements().count(),
            "Built RSS channel"
        );
        Ok(Feed::from_channel(channel))
    }
}
