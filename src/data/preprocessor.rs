// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans one raw corpus sentence before tokenisation. Exported
// datasets carry non-breaking spaces, zero-width characters and
// stray control bytes; left in place they turn into junk
// vocabulary entries that steal ids from real words.
//
// A sentence has no internal line structure to preserve, so the
// whole job reduces to: neutralise the odd characters, then let
// `split_whitespace` collapse and trim in one pass.
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean one raw sentence for downstream tokenisation.
    pub fn clean(&self, text: &str) -> String {
        let neutralised: String = text
            .chars()
            .map(|c| match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect();

        // split_whitespace drops empty fields, which collapses
        // space runs and trims both edges at once.
        neutralised.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_and_trims_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  a   great   film  "), "a great film");
    }

    #[test]
    fn test_flattens_tabs_and_newlines() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("one\ttwo\r\nthree"), "one two three");
    }

    #[test]
    fn test_neutralises_invisible_unicode() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("good\u{00A0}movie\u{200B}!"), "good movie !");
    }

    #[test]
    fn test_drops_control_bytes() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_whitespace_only_input_cleans_to_empty() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(" \t \u{00A0} "), "");
    }
}
