use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use super::super::constants::{CHECKBOX_DONE, CHECKBOX_OPEN, PRIORITY_MARKER, PRIORITY_PLACEHOLDER};

pub(super) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = UnicodeSegmentation::graphemes(input, true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        let truncated: String = UnicodeSegmentation::graphemes(input, true)
            .take(max_graphemes)
            .collect();
        return Cow::Owned(truncated);
    }

    let keep = max_graphemes - ELLIPSIS_GRAPHEMES;
    let mut truncated: String = UnicodeSegmentation::graphemes(input, true).take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

pub(super) const fn checkbox(completed: bool) -> &'static str {
    if completed { CHECKBOX_DONE } else { CHECKBOX_OPEN }
}

pub(super) const fn priority_marker(priority: bool) -> &'static str {
    if priority {
        PRIORITY_MARKER
    } else {
        PRIORITY_PLACEHOLDER
    }
}
