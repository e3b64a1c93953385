//! RSS 2.0 serialization of version records.

use crate::config::channel::ChannelSettings;
use crate::domain::model::{FeedEntry, VersionRecord};
use crate::utils::error::{FeedError, Result};
use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Options, Parser};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Renders changelog markdown to HTML (CommonMark, no extensions).
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// RFC 822 date in GMT, as RSS readers expect.
pub fn rfc822(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn xml_error<E: std::fmt::Display>(e: E) -> FeedError {
    FeedError::render(format!("XML write failed: {}", e))
}

pub struct FeedRenderer<'a> {
    channel: &'a ChannelSettings,
}

impl<'a> FeedRenderer<'a> {
    pub fn new(channel: &'a ChannelSettings) -> Self {
        Self { channel }
    }

    pub fn title_for(&self, version: &str) -> String {
        format!("{} {}", self.channel.product_name, version)
    }

    pub fn link_for(&self, version: &str) -> String {
        format!(
            "{}#{}",
            self.channel.changelog_url,
            self.channel.anchor_style.fragment(version)
        )
    }

    pub fn guid_for(&self, version: &str) -> String {
        format!("{}{}", self.channel.guid_prefix, version)
    }

    pub fn entry_for(&self, record: &VersionRecord, published_at: DateTime<Utc>) -> FeedEntry {
        FeedEntry {
            title: self.title_for(&record.version),
            html_body: markdown_to_html(&record.body),
            link: self.link_for(&record.version),
            guid: self.guid_for(&record.version),
            published_at,
        }
    }

    /// Builds one entry per record, in record order, and serializes the feed.
    pub fn render<F>(
        &self,
        records: &[VersionRecord],
        mut date_fn: F,
        generated_at: DateTime<Utc>,
    ) -> Result<String>
    where
        F: FnMut(&VersionRecord) -> DateTime<Utc>,
    {
        let entries: Vec<FeedEntry> = records
            .iter()
            .map(|record| self.entry_for(record, date_fn(record)))
            .collect();
        self.serialize(&entries, generated_at)
    }

    pub fn serialize(&self, entries: &[FeedEntry], generated_at: DateTime<Utc>) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        let generated = rfc822(&generated_at);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;

        let rss = BytesStart::new("rss").with_attributes([
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
            ("xmlns:atom", "http://www.w3.org/2005/Atom"),
            ("version", "2.0"),
        ]);
        writer.write_event(Event::Start(rss)).map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("channel")))
            .map_err(xml_error)?;

        write_cdata_element(&mut writer, "title", &self.channel.title)?;
        write_cdata_element(&mut writer, "description", &self.channel.description)?;
        write_text_element(&mut writer, "link", &self.channel.site_url)?;
        write_text_element(&mut writer, "generator", GENERATOR)?;
        write_text_element(&mut writer, "lastBuildDate", &generated)?;
        writer
            .write_event(Event::Empty(BytesStart::new("atom:link").with_attributes([
                ("href", self.channel.feed_url.as_str()),
                ("rel", "self"),
                ("type", "application/rss+xml"),
            ])))
            .map_err(xml_error)?;
        write_text_element(&mut writer, "pubDate", &generated)?;
        write_cdata_element(&mut writer, "language", &self.channel.language)?;
        write_text_element(&mut writer, "ttl", &self.channel.ttl_minutes.to_string())?;

        for entry in entries {
            writer
                .write_event(Event::Start(BytesStart::new("item")))
                .map_err(xml_error)?;
            write_cdata_element(&mut writer, "title", &entry.title)?;
            write_cdata_element(&mut writer, "description", &entry.html_body)?;
            write_text_element(&mut writer, "link", &entry.link)?;
            writer
                .write_event(Event::Start(
                    BytesStart::new("guid").with_attributes([("isPermaLink", "false")]),
                ))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&entry.guid)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new("guid")))
                .map_err(xml_error)?;
            write_text_element(&mut writer, "pubDate", &rfc822(&entry.published_at))?;
            writer
                .write_event(Event::End(BytesEnd::new("item")))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("channel")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("rss")))
            .map_err(xml_error)?;

        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| FeedError::render(format!("feed is not UTF-8: {}", e)))
    }
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

/// Writes `text` as CDATA; a literal `]]>` is split across two sections.
fn write_cdata_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;

    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        writer
            .write_event(Event::CData(BytesCData::new(&rest[..pos + 2])))
            .map_err(xml_error)?;
        rest = &rest[pos + 2..];
    }
    writer
        .write_event(Event::CData(BytesCData::new(rest)))
        .map_err(xml_error)?;

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}
