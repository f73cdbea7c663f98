use regex::{Captures, Regex};
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```([\w+-]*)(\r?\n|[ \t]+)?([\s\S]*?)```").expect("fence pattern is valid")
});

/// Unwraps every markdown fenced block to its inner content, then trims the
/// whole string. Unterminated fences are left alone.
///
/// A word right after the opening backticks is a language tag and is
/// dropped, unless it is all the block holds: "```a```" is a fenced "a".
pub fn strip_code_fences(text: &str) -> String {
    FENCED_BLOCK
        .replace_all(text, |caps: &Captures| {
            let tag = &caps[1];
            let body = &caps[3];
            if body.is_empty() && caps.get(2).is_none() {
                tag.to_string()
            } else {
                body.to_string()
            }
        })
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tagged_html_fence() {
        assert_eq!(strip_code_fences("```html\n<div>x</div>\n```"), "<div>x</div>");
    }

    #[test]
    fn test_tag_without_newline_is_dropped() {
        assert_eq!(strip_code_fences("```html<div>x</div>```"), "<div>x</div>");
        assert_eq!(strip_code_fences("```html <div>x</div>```"), "<div>x</div>");
    }

    #[test]
    fn test_crlf_after_tag() {
        assert_eq!(strip_code_fences("```html\r\n<div>x</div>\r\n```"), "<div>x</div>");
    }

    #[test]
    fn test_tag_with_empty_body() {
        assert_eq!(strip_code_fences("```html\n```"), "");
    }

    #[test]
    fn test_strip_untagged_fence() {
        assert_eq!(strip_code_fences("```\n<p>hi</p>\n```\n"), "<p>hi</p>");
    }

    #[test]
    fn test_strip_multiple_blocks() {
        assert_eq!(strip_code_fences("```a```\nmid\n```b```"), "a\nmid\nb");
    }

    #[test]
    fn test_strip_keeps_surrounding_text() {
        let text = "Report:\n```c++\nint x;\n```\ndone";
        assert_eq!(strip_code_fences(text), "Report:\nint x;\n\ndone");
    }

    #[test]
    fn test_inner_content_preserved_verbatim() {
        let text = "```html\n  <ul>\n    <li>a</li>\n  </ul>\n```";
        // leading indentation of the first inner line falls to the final trim
        assert_eq!(strip_code_fences(text), "<ul>\n    <li>a</li>\n  </ul>");
    }

    #[test]
    fn test_unterminated_fence_untouched() {
        assert_eq!(strip_code_fences("```html\n<div>"), "```html\n<div>");
    }

    #[test]
    fn test_plain_text_only_trimmed() {
        assert_eq!(strip_code_fences("  <div>x</div>\n"), "<div>x</div>");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "```html\n<div>x</div>\n```",
            "```a```\nmid\n```b```",
            "```html<div>x</div>```",
            "```html\r\n<div>x</div>\r\n```",
            "\n<section>plain</section>  ",
        ] {
            let once = strip_code_fences(input);
            assert_eq!(strip_code_fences(&once), once);
        }
    }
}
