//! Language-region locale tags such as `en-US`.

use crate::error::{AssemblyError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A validated `ll-RR` locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Parse `en-US` or `en_US`. Anything that is not two lowercase ASCII
    /// letters, a separator, and two uppercase ASCII letters is rejected.
    pub fn parse(tag: &str) -> Result<Locale> {
        let normalized = tag.replace('_', "-");
        let bytes = normalized.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[0].is_ascii_lowercase()
            && bytes[1].is_ascii_lowercase()
            && bytes[2] == b'-'
            && bytes[3].is_ascii_uppercase()
            && bytes[4].is_ascii_uppercase();
        if !well_formed {
            return Err(AssemblyError::MalformedLocaleTag {
                tag: tag.to_string(),
            });
        }
        Ok(Locale { tag: normalized })
    }

    /// Derive the locale from a model file name such as `models/en-US.json`.
    pub fn from_file_name(path: &Path) -> Result<Locale> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AssemblyError::MalformedLocaleTag {
                tag: path.display().to_string(),
            })?;
        Locale::parse(stem)
    }

    /// The hyphenated tag, e.g. `en-US`.
    pub fn as_tag(&self) -> &str {
        &self.tag
    }

    /// The underscore form used in resource file names, e.g. `en_US`.
    pub fn file_suffix(&self) -> String {
        self.tag.replace('-', "_")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl std::str::FromStr for Locale {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Locale> {
        Locale::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag)
    }
}
