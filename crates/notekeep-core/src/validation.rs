//! Title and content validation for note writes.

use crate::defaults::TITLE_MAX_CHARS;
use crate::error::{Error, Result};
use crate::models::{NewNote, NotePatch};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_LONG: &str = "Title is too long";

/// Check a title against the at-rest rules.
///
/// Blank after trimming is "required"; length is counted on the raw string in
/// characters, not bytes. The title is stored exactly as given.
pub fn validate_title(title: Option<&str>) -> Result<String> {
    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(Error::InvalidTitle(TITLE_REQUIRED.to_string())),
    };
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(Error::InvalidTitle(TITLE_TOO_LONG.to_string()));
    }
    Ok(title.to_string())
}

/// Validate a create request and normalize it into a [`NewNote`].
pub fn validate_new_note(
    owner_id: &str,
    title: Option<&str>,
    content: Option<String>,
) -> Result<NewNote> {
    let title = validate_title(title)?;
    Ok(NewNote {
        owner_id: owner_id.to_string(),
        title,
        content: content.unwrap_or_default(),
    })
}

/// Validate an update request.
///
/// The title rules only apply when a title was sent.
pub fn validate_patch(title: Option<&str>, content: Option<String>) -> Result<NotePatch> {
    let title = match title {
        Some(t) => Some(validate_title(Some(t))?),
        None => None,
    };
    Ok(NotePatch { title, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_title_error(result: Result<impl std::fmt::Debug>, expected: &str) {
        match result {
            Err(Error::InvalidTitle(msg)) => assert_eq!(msg, expected),
            other => panic!("expected InvalidTitle({}), got {:?}", expected, other),
        }
    }

    #[test]
    fn test_missing_title_is_required() {
        expect_title_error(validate_title(None), TITLE_REQUIRED);
    }

    #[test]
    fn test_blank_titles_are_required() {
        for blank in ["", " ", "\t\n", "   \r\n  "] {
            expect_title_error(validate_title(Some(blank)), TITLE_REQUIRED);
        }
    }

    #[test]
    fn test_title_length_boundary() {
        let max = "a".repeat(TITLE_MAX_CHARS);
        assert_eq!(validate_title(Some(&max)).unwrap(), max);

        let over = "a".repeat(TITLE_MAX_CHARS + 1);
        expect_title_error(validate_title(Some(&over)), TITLE_TOO_LONG);
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 255 multi-byte characters are well over 255 bytes but still valid.
        let accented = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(Some(&accented)).is_ok());
    }

    #[test]
    fn test_length_is_checked_on_raw_title() {
        let padded = format!(" {} ", "a".repeat(TITLE_MAX_CHARS - 1));
        expect_title_error(validate_title(Some(&padded)), TITLE_TOO_LONG);
    }

    #[test]
    fn test_title_kept_verbatim() {
        assert_eq!(validate_title(Some("  Plan  ")).unwrap(), "  Plan  ");
    }

    #[test]
    fn test_new_note_defaults_content_to_empty() {
        let note = validate_new_note("user-1", Some("T"), None).unwrap();
        assert_eq!(note.owner_id, "user-1");
        assert_eq!(note.title, "T");
        assert_eq!(note.content, "");
    }

    #[test]
    fn test_new_note_content_taken_as_is() {
        let long = "x".repeat(100_000);
        let note = validate_new_note("user-1", Some("T"), Some(long.clone())).unwrap();
        assert_eq!(note.content, long);
    }

    #[test]
    fn test_patch_without_title_skips_title_rules() {
        let patch = validate_patch(None, Some("x".to_string())).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.content.as_deref(), Some("x"));
    }

    #[test]
    fn test_patch_with_blank_title_rejected() {
        expect_title_error(validate_patch(Some("  "), None), TITLE_REQUIRED);
    }

    #[test]
    fn test_patch_with_long_title_rejected() {
        let over = "b".repeat(TITLE_MAX_CHARS + 1);
        expect_title_error(validate_patch(Some(&over), None), TITLE_TOO_LONG);
    }
}
