use std::io::Write;
use std::path::Path;

use super::error::FeedError;
use super::item::ItemBuilder;
use crate::config::FeedConfig;
use crate::xml::{self, Element};

pub const RSS_VERSION: &str = "2.0";

/// A finalized RSS 2.0 document.
///
/// Holds exactly one channel, created by
/// [`ChannelBuilder::build`](super::ChannelBuilder::build). The only mutation
/// after that is appending items through [`Feed::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    channel: Element,
}

impl Feed {
    pub(crate) fn from_channel(channel: Element) -> Self {
        Self { channel }
    }

    /// Returns a builder for a new item. The item is appended to this feed
    /// when [`ItemBuilder::build`] succeeds.
    pub fn add_item(&mut self) -> ItemBuilder<'_> {
        ItemBuilder::new(self)
    }

    pub(crate) fn append_item(&mut self, item: Element) {
        self.channel.append_child(item);
    }

    /// The `channel` element, for inspection.
    pub fn channel(&self) -> &Element {
        &self.channel
    }

    pub fn item_count(&self) -> usize {
        self.channel.children_named("item").count()
    }

    /// Serializes the document into `sink`.
    ///
    /// With `indent > 0` every nesting level is indented by that many spaces;
    /// `0` produces compact output.
    pub fn render<W: Write>(&self, sink: W, indent: usize) -> Result<(), FeedError> {
        let mut writer = xml::writer(sink, indent);
        xml::write_declaration(&mut writer)?;
        xml::write_start(&mut writer, "rss", &[("version", RSS_VERSION)])?;
        self.channel.write_to(&mut writer)?;
        xml::write_end(&mut writer, "rss")?;
        writer.into_inner().flush()?;
        Ok(())
    }

    pub fn render_to_string(&self, indent: usize) -> Result<String, FeedError> {
        let mut out = Vec::new();
        self.render(&mut out, indent)?;
        String::from_utf8(out).map_err(|e| {
            FeedError::Serialization(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Renders with the indentation configured in `config`.
    pub fn render_to_string_with(&self, config: &FeedConfig) -> Result<String, FeedError> {
        self.render_to_string(config.indent)
    }

    /// Writes the document to `path` atomically.
    ///
    /// The content goes to a temporary file in the same directory, is synced
    /// to disk and then renamed over `path`, so the destination never holds a
    /// partial document.
    pub fn write_file(&self, path: &Path, indent: usize) -> Result<(), FeedError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let mut content = Vec::new();
        self.render(&mut content, indent)?;

        let random_suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

        let result = (|| {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)?;
            file.write_all(&content)?;
            file.sync_all()?;
            drop(file);
            std::fs::rename(&temp_path, path)
        })();

        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp_path);
            tracing::warn!(path = %path.display(), error = %e, "Failed to write feed");
            return Err(FeedError::Serialization(e));
        }

        tracing::debug!(
            path = %path.display(),
            bytes = content.len(),
            items = self.item_count(),
            "Wrote feed"
        );
        Ok(())
    }

    /// [`Feed::write_file`] with the indentation configured in `config`.
    pub fn write_file_with(&self, config: &FeedConfig, path: &Path) -> Result<(), FeedError> {
        self.write_file(path, config.indent)
    }
}

#[cfg(test)]
mod tests {
    use super::super::ChannelBuilder;
    use super::*;
    use pretty_assertions::assert_eq;
    use url::Url;

    fn feed() -> Feed {
        ChannelBuilder::new()
            .title("T")
            .link(&Url::parse("https://example.org/").unwrap())
            .description("D")
            .build()
            .unwrap()
    }

    #[test]
    fn test_compact_render() {
        let out = feed().render_to_string(0).unwrap();
        let expected = format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<rss version="2.0"><channel>"#,
                "<title>T</title><link>https://example.org/</link><description>D</description>",
                "<generator>{}</generator>",
                "</channel></rss>"
            ),
            super::super::channel::GENERATOR
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_indented_render() {
        let out = feed().render_to_string(4).unwrap();
        assert!(
            out.contains("\n<rss version=\"2.0\">\n    <channel>\n        <title>T</title>"),
            "{out}"
        );
    }

    #[test]
    fn test_item_count() {
        let mut feed = feed();
        assert_eq!(feed.item_count(), 0);
        feed.add_item().title("a").build().unwrap();
        feed.add_item().description("b").build().unwrap();
        assert_eq!(feed.item_count(), 2);
    }

    #[test]
    fn test_write_file() {
        let dir = std::env::temp_dir().join("rssgen_write_file_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rss.xml");

        let feed = feed();
        feed.write_file(&path, 2).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, feed.render_to_string(2).unwrap());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_file_with_config_indent() {
        let dir = std::env::temp_dir().join("rssgen_write_file_with_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rss.xml");
        let config = FeedConfig::parse("indent = 3\n").unwrap();

        let feed = feed();
        feed.write_file_with(&config, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, feed.render_to_string(3).unwrap());
        assert_eq!(written, feed.render_to_string_with(&config).unwrap());
        assert!(written.contains("\n   <channel>"), "{written}");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_config_renders_compact() {
        let out = feed().render_to_string_with(&FeedConfig::default()).unwrap();
        assert!(!out.contains('\n'), "{out}");
    }

    #[test]
    fn test_write_file_unwritable_target() {
        let path = Path::new("/nonexistent-rssgen-dir/sub/rss.xml");
        let err = feed().write_file(path, 0).unwrap_err();
        assert!(matches!(err, FeedError::Serialization(_)));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_surfaces_sink_failure() {
        let err = feed().render(FailingSink, 0).unwrap_err();
        assert!(matches!(err, FeedError::Serialization(_)));
    }
}
