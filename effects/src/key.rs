//! Effect key parsing.

use std::fmt;

use shaderfx_vfs::path;

use crate::error::PreprocessError;

/// Compound name of one effect: `file-prefix` + separator + `effect-name`.
///
/// The prefix is a `/`-delimited path without the shader extension. It ends
/// at the first separator of the last path component, so effect names may
/// themselves contain the separator while directory names may not be split:
///
/// | Key | Prefix | Name |
/// |-----|--------|------|
/// | `Gravity.Vertex` | `Gravity` | `Vertex` |
/// | `fx.v2/Water.Fragment` | `fx.v2/Water` | `Fragment` |
/// | `Shadow.Pass.Depth` | `Shadow` | `Pass.Depth` |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectKey {
    prefix: String,
    name: String,
    separator: char,
}

impl EffectKey {
    /// Parse a key, normalizing the file prefix.
    pub fn parse(key: &str, separator: char) -> Result<Self, PreprocessError> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(PreprocessError::malformed(key, "empty key"));
        }

        let component_start = trimmed
            .rfind(|c: char| c == '/' || c == '\\')
            .map_or(0, |pos| pos + 1);
        let Some(offset) = trimmed[component_start..].find(separator) else {
            return Err(PreprocessError::malformed(
                key,
                format!("missing '{separator}' between file prefix and effect name"),
            ));
        };
        let split = component_start + offset;
        let (prefix, name) = (&trimmed[..split], &trimmed[split + separator.len_utf8()..]);

        if split == component_start {
            return Err(PreprocessError::malformed(key, "empty file prefix"));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(PreprocessError::malformed(key, "empty effect name"));
        }
        let prefix = path::normalize(prefix)
            .map_err(|err| PreprocessError::malformed(key, err.to_string()))?;

        Ok(Self {
            prefix,
            name: name.to_owned(),
            separator,
        })
    }

    /// Build a key from an already normalized prefix and a marker name.
    pub(crate) fn new(prefix: &str, name: &str, separator: char) -> Self {
        Self {
            prefix: prefix.to_owned(),
            name: name.trim().to_owned(),
            separator,
        }
    }

    /// File-scope prefix (path without extension).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Effect name within the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name for this key's prefix with the given extension appended.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}{extension}", self.prefix)
    }
}

impl fmt::Display for EffectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.separator, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(key: &str) -> Result<EffectKey, PreprocessError> {
        EffectKey::parse(key, '.')
    }

    #[test]
    fn simple_key() {
        let key = parse("Gravity.Vertex").unwrap();
        assert_eq!(key.prefix(), "Gravity");
        assert_eq!(key.name(), "Vertex");
        assert_eq!(key.to_string(), "Gravity.Vertex");
        assert_eq!(key.file_name(".glsl"), "Gravity.glsl");
    }

    #[test]
    fn directory_with_separator() {
        let key = parse("fx.v2/Water.Fragment").unwrap();
        assert_eq!(key.prefix(), "fx.v2/Water");
        assert_eq!(key.name(), "Fragment");
    }

    #[test]
    fn name_keeps_later_separators() {
        let key = parse("Shadow.Pass.Depth").unwrap();
        assert_eq!(key.prefix(), "Shadow");
        assert_eq!(key.name(), "Pass.Depth");
    }

    #[test]
    fn prefix_is_normalized() {
        let key = parse(" ./fx\\Water.Fragment ").unwrap();
        assert_eq!(key.prefix(), "fx/Water");
        assert_eq!(key.to_string(), "fx/Water.Fragment");
    }

    #[test]
    fn custom_separator() {
        let key = EffectKey::parse("Gravity:Vertex", ':').unwrap();
        assert_eq!(key.prefix(), "Gravity");
        assert_eq!(key.to_string(), "Gravity:Vertex");
    }

    #[test]
    fn malformed_keys() {
        let bad_keys = [
            "",
            "   ",
            "Gravity",
            ".Vertex",
            "fx/.Vertex",
            "Gravity.",
            "Gravity.  ",
            "../Gravity.Vertex",
        ];
        for bad in bad_keys {
            let err = parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedKey, "key {bad:?}");
        }
    }
}
