//! JSON Lines (JSONL) output writer.
//!
//! Each line is a complete [`Post`] object, which keeps the output
//! streamable and easy to load back with `serde_json`.

use std::io::{BufWriter, Write};

use crate::error::{BayeskyError, Result};
use crate::post::Post;

use super::PostWriter;

/// Writes posts as JSON Lines.
///
/// ```jsonl
/// {"actor_id":"did:plc:abc","sequence_time":1,"record_key":"r1","text":"hello"}
/// ```
pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: BufWriter::new(out),
        }
    }
}

impl<W: Write> PostWriter for JsonlWriter<W> {
    fn write_post(&mut self, post: &Post) -> Result<()> {
        serde_json::to_writer(&mut self.writer, post).map_err(BayeskyError::Serialize)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Converts posts to a JSONL string.
pub fn to_jsonl(posts: &[Post]) -> Result<String> {
    let mut output = String::new();
    for post in posts {
        let line = serde_json::to_string(post).map_err(BayeskyError::Serialize)?;
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}
