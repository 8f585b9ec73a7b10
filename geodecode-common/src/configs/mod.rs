use crate::error::{DecodeError, DecodeWarning, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings shared by the shapefile and attribute table decoders. Backed by
/// an optional JSON file; absent keys take their default values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DecoderConfigs {
    /// Log per-record progress at debug level.
    pub verbose_mode: bool,
    /// Promote recoverable warnings to `DecodeError::Strict`.
    pub strict_mode: bool,
    /// An encoding_rs label for single-byte text in attribute tables.
    pub text_encoding: String,
    /// Exchange x and y of every decoded coordinate.
    pub swap_xy: bool,
}

impl Default for DecoderConfigs {
    fn default() -> DecoderConfigs {
        DecoderConfigs {
            verbose_mode: false,
            strict_mode: false,
            text_encoding: "windows-1252".to_string(),
            swap_xy: false,
        }
    }
}

impl DecoderConfigs {
    pub fn new() -> DecoderConfigs {
        DecoderConfigs::default()
    }

    /// Reads configs from a JSON file, falling back to the defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<DecoderConfigs> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DecoderConfigs::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let configs_json = serde_json::to_string_pretty(self)?;
        fs::write(path, configs_json)?;
        Ok(())
    }

    /// Resolves `text_encoding` to an encoding_rs encoding.
    pub fn encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.text_encoding.as_bytes())
            .ok_or_else(|| DecodeError::UnknownEncoding(self.text_encoding.clone()))
    }

    /// Records a recoverable condition: logs it, then either keeps it for the
    /// caller or, in strict mode, turns it into an error.
    pub fn report(&self, warning: DecodeWarning, warnings: &mut Vec<DecodeWarning>) -> Result<()> {
        log::warn!("{}", warning);
        if self.strict_mode {
            return Err(DecodeError::Strict(warning));
        }
        warnings.push(warning);
        Ok(())
    }
}
