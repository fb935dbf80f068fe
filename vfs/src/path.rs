use crate::VfsError;

/// Normalize a source path.
///
/// - Replaces backslashes with forward slashes
/// - Collapses redundant separators (`a///b` → `a/b`)
/// - Drops `.` segments
/// - Rejects `..` segments (path traversal not allowed)
/// - Strips leading and trailing slashes
///
/// Returns `Err(VfsError::InvalidPath)` if the path is empty or contains `..`.
pub fn normalize(path: &str) -> Result<String, VfsError> {
    let replaced = path.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in replaced.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(VfsError::InvalidPath(
                "path traversal (..) not allowed".into(),
            ));
        }
        segments.push(segment);
    }

    if segments.is_empty() {
        return Err(VfsError::InvalidPath("empty path".into()));
    }

    Ok(segments.join("/"))
}

/// Join a base directory and a relative path, then normalize the result.
///
/// An empty base yields the normalized relative path.
pub fn join(base: &str, relative: &str) -> Result<String, VfsError> {
    if base.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{base}/{relative}"))
    }
}

/// Split a normalized path into source name and remainder.
///
/// Returns `(source, rest)` where `source` is the first path segment
/// and `rest` is everything after it. If there is only one segment,
/// `rest` is empty.
pub(crate) fn split_source(path: &str) -> (&str, &str) {
    match path.find('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_path() {
        assert_eq!(
            normalize("shaders/Gravity.glsl").unwrap(),
            "shaders/Gravity.glsl"
        );
    }

    #[test]
    fn leading_and_trailing_slashes() {
        assert_eq!(normalize("/shaders/").unwrap(), "shaders");
    }

    #[test]
    fn redundant_slashes_and_dots() {
        assert_eq!(
            normalize("shaders//./Gravity.glsl").unwrap(),
            "shaders/Gravity.glsl"
        );
    }

    #[test]
    fn backslashes() {
        assert_eq!(
            normalize("shaders\\Gravity.glsl").unwrap(),
            "shaders/Gravity.glsl"
        );
    }

    #[test]
    fn reject_dotdot() {
        assert!(normalize("shaders/../secret.glsl").is_err());
    }

    #[test]
    fn reject_empty() {
        assert!(normalize("").is_err());
        assert!(normalize("///").is_err());
        assert!(normalize("././.").is_err());
    }

    #[test]
    fn join_with_empty_base() {
        assert_eq!(join("", "Gravity.glsl").unwrap(), "Gravity.glsl");
    }

    #[test]
    fn join_with_base() {
        assert_eq!(
            join("assets/shaders/", "fx/Gravity.glsl").unwrap(),
            "assets/shaders/fx/Gravity.glsl"
        );
    }

    #[test]
    fn join_rejects_traversal() {
        assert!(join("shaders", "../Gravity.glsl").is_err());
    }

    #[test]
    fn split_source_with_rest() {
        assert_eq!(
            split_source("builtin/Common.glsl"),
            ("builtin", "Common.glsl")
        );
    }

    #[test]
    fn split_source_no_rest() {
        assert_eq!(split_source("Common.glsl"), ("Common.glsl", ""));
    }
}
