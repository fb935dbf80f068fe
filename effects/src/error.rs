//! Preprocessor error types.

use shaderfx_vfs::VfsError;

/// Errors that can occur while resolving an effect.
///
/// Every variant aborts the whole resolution; no partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    /// The key has an empty file prefix, an empty effect name, or maps to an invalid path.
    #[error("malformed effect key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    /// The source file could not be read.
    #[error("cannot read effect file '{path}'")]
    FileNotFound {
        path: String,
        #[source]
        source: VfsError,
    },

    /// The owning file was parsed but does not declare the requested effect.
    #[error("effect '{key}' not found in '{path}'")]
    EffectKeyNotFound { key: String, path: String },

    /// An include revisits a file that is still being parsed.
    #[error("cyclic include of '{key}' (via {})", .chain.join(" -> "))]
    CyclicInclude { key: String, chain: Vec<String> },

    /// The same effect name is declared twice in one file.
    #[error("effect '{key}' declared twice in '{path}' (second marker at line {line})")]
    DuplicateEffect {
        key: String,
        path: String,
        line: usize,
    },
}

/// Fieldless category of a [`PreprocessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedKey,
    FileNotFound,
    EffectKeyNotFound,
    CyclicInclude,
    DuplicateEffect,
}

impl PreprocessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedKey { .. } => ErrorKind::MalformedKey,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::EffectKeyNotFound { .. } => ErrorKind::EffectKeyNotFound,
            Self::CyclicInclude { .. } => ErrorKind::CyclicInclude,
            Self::DuplicateEffect { .. } => ErrorKind::DuplicateEffect,
        }
    }

    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PreprocessError::EffectKeyNotFound {
            key: "Gravity.Missing".into(),
            path: "Gravity.glsl".into(),
        };
        assert_eq!(
            err.to_string(),
            "effect 'Gravity.Missing' not found in 'Gravity.glsl'"
        );

        let err = PreprocessError::CyclicInclude {
            key: "A.X".into(),
            chain: vec!["A".into(), "B".into()],
        };
        assert_eq!(err.to_string(), "cyclic include of 'A.X' (via A -> B)");
    }

    #[test]
    fn test_file_not_found_keeps_source() {
        let err = PreprocessError::FileNotFound {
            path: "Gravity.glsl".into(),
            source: VfsError::NotFound("Gravity.glsl".into()),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            PreprocessError::malformed("x", "empty").kind(),
            ErrorKind::MalformedKey
        );
    }
}
