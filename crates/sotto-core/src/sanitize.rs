//! Draft validation and broadcast-mention neutralization.
//!
//! The submission form enforces these limits as a soft cap, but the
//! boundary is trust-sensitive so they are re-checked here before any
//! id is allocated.

use crate::error::DraftError;

/// Maximum characters in a draft.
pub const MAX_CONTENT_CHARS: usize = 200;

/// Maximum line breaks in a draft.
pub const MAX_LINE_BREAKS: usize = 1;

/// Validate a raw draft against the relay's limits.
pub fn validate(draft: &str) -> Result<(), DraftError> {
    if draft.matches('\n').count() > MAX_LINE_BREAKS {
        return Err(DraftError::TooManyLineBreaks);
    }
    if draft.chars().count() > MAX_CONTENT_CHARS {
        return Err(DraftError::TooLong);
    }
    Ok(())
}

/// Neutralize platform-wide broadcast mentions by inserting a dash
/// inside the token. All other content is preserved byte for byte.
pub fn neutralize_mentions(draft: &str) -> String {
    draft
        .replace("@everyone", "@-everyone")
        .replace("@here", "@-here")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_break_is_allowed() {
        assert_eq!(validate("hello\nworld"), Ok(()));
    }

    #[test]
    fn two_line_breaks_are_rejected() {
        assert_eq!(validate("a\nb\nc"), Err(DraftError::TooManyLineBreaks));
    }

    #[test]
    fn overlong_draft_is_rejected() {
        let draft = "x".repeat(MAX_CONTENT_CHARS + 1);
        assert_eq!(validate(&draft), Err(DraftError::TooLong));

        let draft = "x".repeat(MAX_CONTENT_CHARS);
        assert_eq!(validate(&draft), Ok(()));
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // 200 three-byte characters is still within the limit.
        let draft = "あ".repeat(MAX_CONTENT_CHARS);
        assert_eq!(validate(&draft), Ok(()));
    }

    #[test]
    fn broadcast_mentions_are_neutralized() {
        assert_eq!(
            neutralize_mentions("hi @everyone and @here"),
            "hi @-everyone and @-here"
        );
    }

    #[test]
    fn every_occurrence_is_neutralized() {
        assert_eq!(
            neutralize_mentions("@everyone @everyone"),
            "@-everyone @-everyone"
        );
    }

    #[test]
    fn other_content_is_untouched() {
        let draft = "plain text with @mention and unicode ★";
        assert_eq!(neutralize_mentions(draft), draft);
    }
}
