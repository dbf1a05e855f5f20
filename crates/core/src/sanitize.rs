use std::sync::LazyLock;

use regex::Regex;

/// A leaked stylesheet rule: `.css-<hash>` marker, selector-ish text, one brace block.
static STYLE_LEAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.css-[\w-]+[^{}\n]*\{[^{}\n]*\}").unwrap());

/// Removes inline stylesheet fragments that leak into rendered text when a
/// page embeds raw CSS next to its content.
///
/// Best effort: only single-line `.css-…{…}` rules are recognized, and text
/// without such a rule is returned unchanged.
pub fn sanitize(text: &str) -> String {
    STYLE_LEAK.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_emotion_rule() {
        let text = "casa s. f..css-1x2y3z{margin:0;padding:0}Edificio adibito ad abitazione.";
        assert_eq!(sanitize(text), "casa s. f.Edificio adibito ad abitazione.");
    }

    #[test]
    fn test_removes_several_rules() {
        let text = ".css-a{color:red}uno .css-b .x{display:none} due";
        assert_eq!(sanitize(text), "uno  due");
    }

    #[test]
    fn test_leaves_ordinary_text_alone() {
        let text = "Il file style.css contiene regole {in parentesi} e graffe.";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_does_not_span_lines() {
        let text = ".css-a\n{color:red}";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_keeps_ansi_markers() {
        let text = "\x1b[1mcasa\x1b[22m";
        assert_eq!(sanitize(text), text);
    }
}
