//! Newline sanitizer.

use std::borrow::Cow;

/// Shown in place of every line feed (U+2424 SYMBOL FOR NEWLINE).
pub const NEWLINE_PLACEHOLDER: char = '\u{2424}';

/// Replace every line feed in `text` with [`NEWLINE_PLACEHOLDER`].
///
/// Borrows when there is nothing to replace. Idempotent.
pub fn sanitize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace('\n', NEWLINE_PLACEHOLDER.encode_utf8(&mut [0; 4])))
    } else {
        Cow::Borrowed(text)
    }
}
