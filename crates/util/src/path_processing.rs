//! Helpers for user-supplied paths.

use std::path::PathBuf;

use dirs_next::home_dir;

/// Expand a leading `~`, alone or followed by a path separator, to the home
/// directory.
///
/// Input is trimmed first. `~user` forms and paths on systems without a known
/// home directory come back unchanged.
pub fn expand_tilde(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let Some(after_tilde) = trimmed.strip_prefix('~') else {
        return PathBuf::from(trimmed);
    };
    let relative = if after_tilde.is_empty() {
        Some("")
    } else {
        after_tilde.strip_prefix(['/', '\\'])
    };

    match (relative, home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(relative), Some(home)) => home.join(relative),
        _ => PathBuf::from(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_paths_untouched() {
        assert_eq!(expand_tilde(" /tmp/swatch "), PathBuf::from("/tmp/swatch"));
        assert_eq!(expand_tilde("~someone/palettes"), PathBuf::from("~someone/palettes"));
    }

    #[test]
    fn expands_home_prefix() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~/palettes"), home.join("palettes"));
            assert_eq!(expand_tilde("~\\palettes"), home.join("palettes"));
            assert_eq!(expand_tilde("~"), home);
        }
    }
}
