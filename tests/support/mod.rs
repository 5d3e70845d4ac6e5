use anyhow::{Context, Result, bail};
use polyglot_registry::{
    Flavour, Mapping, ModelReader, ModelWriter, Options, Priority, Properties,
};
use serde_json::{Value, json};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

pub fn detect_flavour_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_detect-flavour"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Reader/writer that identifies which mapping handed it out.
pub struct TaggedCodec(pub String);

impl ModelReader for TaggedCodec {
    fn read(&self, _input: &mut dyn Read, _options: &Options) -> Result<Value> {
        Ok(json!({ "tag": self.0 }))
    }
}

impl ModelWriter for TaggedCodec {
    fn write(&self, output: &mut dyn Write, _options: &Options, _model: &Value) -> Result<()> {
        output.write_all(self.0.as_bytes())?;
        Ok(())
    }
}

pub fn reader_tag(reader: &dyn ModelReader) -> String {
    let mut empty: &[u8] = b"";
    let value = reader
        .read(&mut empty, &Options::new())
        .expect("tagged reader never fails");
    value["tag"].as_str().unwrap_or_default().to_string()
}

pub fn writer_tag(writer: &dyn ModelWriter) -> String {
    let mut out = Vec::new();
    writer
        .write(&mut out, &Options::new(), &Value::Null)
        .expect("tagged writer never fails");
    String::from_utf8(out).expect("tag is UTF-8")
}

/// Hand-rolled mapping: accepts requests whose location contains `token`,
/// locates `descriptor` when it exists in the searched directory.
pub struct StubMapping {
    pub flavour: Flavour,
    pub priority: Priority,
    pub token: String,
    pub descriptor: Option<String>,
    pub properties: Option<Properties>,
    pub fail_locate: bool,
    codec: Arc<TaggedCodec>,
}

impl StubMapping {
    pub fn new(flavour: &str, priority: Priority) -> Self {
        Self {
            flavour: Flavour::from(flavour),
            priority,
            token: flavour.to_string(),
            descriptor: None,
            properties: None,
            fail_locate: false,
            codec: Arc::new(TaggedCodec(flavour.to_string())),
        }
    }

    pub fn accepting(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    pub fn locating(mut self, descriptor: &str) -> Self {
        self.descriptor = Some(descriptor.to_string());
        self
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_locate = true;
        self
    }

    pub fn shared(self) -> Arc<dyn Mapping> {
        Arc::new(self)
    }
}

impl Mapping for StubMapping {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn flavour(&self) -> &Flavour {
        &self.flavour
    }

    fn accept(&self, options: &Options) -> bool {
        options
            .location()
            .map(|location| location.contains(&self.token))
            .unwrap_or(false)
    }

    fn locate(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        if self.fail_locate {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("lookup in {} denied", dir.display()),
            ));
        }
        match &self.descriptor {
            Some(name) => {
                let candidate = dir.join(name);
                Ok(candidate.try_exists()?.then_some(candidate))
            }
            None => Ok(None),
        }
    }

    fn reader(&self) -> Arc<dyn ModelReader> {
        self.codec.clone()
    }

    fn writer(&self) -> Arc<dyn ModelWriter> {
        self.codec.clone()
    }

    fn enhancement_properties(&self, _options: &Options) -> Option<Properties> {
        self.properties.clone()
    }
}

pub fn touch(dir: &Path, names: &[&str]) -> Result<()> {
    for name in names {
        std::fs::write(dir.join(name), "")
            .with_context(|| format!("creating {}", dir.join(name).display()))?;
    }
    Ok(())
}
