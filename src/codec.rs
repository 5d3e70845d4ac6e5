//! JSON reader/writer pair for descriptor documents.
//!
//! Descriptors are exchanged as `serde_json::Value` trees. This codec is the
//! one format the crate ships; other formats plug in their own
//! `ModelReader`/`ModelWriter` implementations.

use crate::mapping::{ModelReader, ModelWriter, Options};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{Read, Write};

/// Option key requesting indented output from the writer.
pub const PRETTY_KEY: &str = "pretty";

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl ModelReader for JsonCodec {
    fn read(&self, input: &mut dyn Read, options: &Options) -> Result<Value> {
        serde_json::from_reader(input).with_context(|| match options.location() {
            Some(location) => format!("parsing JSON descriptor {location}"),
            None => "parsing JSON descriptor".to_string(),
        })
    }
}

impl ModelWriter for JsonCodec {
    fn write(&self, output: &mut dyn Write, options: &Options, model: &Value) -> Result<()> {
        let written = if options.is_truthy(PRETTY_KEY) {
            serde_json::to_writer_pretty(&mut *output, model)
        } else {
            serde_json::to_writer(&mut *output, model)
        };
        written.context("writing JSON descriptor")?;
        writeln!(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writer_honors_pretty_option() {
        let model = json!({"artifactId": "demo"});
        let mut compact = Vec::new();
        JsonCodec
            .write(&mut compact, &Options::new(), &model)
            .unwrap();
        assert_eq!(String::from_utf8(compact).unwrap(), "{\"artifactId\":\"demo\"}\n");

        let mut pretty = Vec::new();
        JsonCodec
            .write(&mut pretty, &Options::new().with(PRETTY_KEY, true), &model)
            .unwrap();
        assert!(String::from_utf8(pretty).unwrap().contains("\n  \"artifactId\""));
    }

    #[test]
    fn reader_reports_location_on_failure() {
        let mut input: &[u8] = b"{ not json";
        let err = JsonCodec
            .read(&mut input, &Options::for_location("pom.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("pom.json"));
    }
}
