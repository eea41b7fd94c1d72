//! CSV output writer.

use std::io::Write;

use crate::error::Result;
use crate::post::Post;

use super::PostWriter;

const HEADER: [&str; 10] = [
    "actor_id",
    "record_key",
    "sequence_time",
    "reply_parent_uri",
    "reply_root_uri",
    "quoted_uri",
    "images",
    "video",
    "external_uri",
    "text",
];

/// Writes one summary row per post.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `actor_id`, `record_key`, `sequence_time`, `reply_parent_uri`,
///   `reply_root_uri`, `quoted_uri`, `images` (count), `video` (`WxH`),
///   `external_uri`, `text`
/// - Encoding: UTF-8
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    wrote_header: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().delimiter(b';').from_writer(out),
            wrote_header: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.wrote_header {
            self.writer.write_record(HEADER)?;
            self.wrote_header = true;
        }
        Ok(())
    }
}

impl<W: Write> PostWriter for CsvWriter<W> {
    fn write_post(&mut self, post: &Post) -> Result<()> {
        self.write_header()?;
        self.writer.write_record(build_record(post))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Build CSV record for a single post.
fn build_record(post: &Post) -> [String; 10] {
    [
        post.actor_id.clone(),
        post.record_key.clone(),
        post.sequence_time.to_string(),
        post.reply_parent_uri().to_string(),
        post.reply_root_uri().to_string(),
        post.quoted_uri.clone().unwrap_or_default(),
        post.images.len().to_string(),
        post.video
            .as_ref()
            .map(|v| format!("{}x{}", v.width, v.height))
            .unwrap_or_default(),
        post.external_embed
            .as_ref()
            .map(|e| e.uri.clone())
            .unwrap_or_default(),
        post.text.clone(),
    ]
}

/// Converts posts to a CSV string.
pub fn to_csv(posts: &[Post]) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = CsvWriter::new(&mut buffer);
        for post in posts {
            writer.write_post(post)?;
        }
        writer.finish()?;
    }
    Ok(String::from_utf8(buffer).unwrap_or_default())
}
