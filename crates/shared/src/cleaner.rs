use scraper::Html;

/// Plain-text extraction from possibly-HTML input.
///
/// The cleaner only needs "string in, text out"; anything that can strip
/// markup and decode entities can stand in for the default implementation.
pub trait MarkupStripper {
    fn strip(&self, raw: &str) -> String;
}

/// Default stripper backed by scraper's HTML parser. The parser is lenient:
/// malformed markup yields a best-effort tree instead of an error, so this
/// never fails.
#[derive(Debug, Default)]
pub struct ScraperStripper;

impl MarkupStripper for ScraperStripper {
    fn strip(&self, raw: &str) -> String {
        let fragment = Html::parse_fragment(raw);
        fragment.root_element().text().collect::<Vec<_>>().join("")
    }
}

/// Accented letters kept alongside ASCII alphanumerics (Portuguese
/// orthography).
const ACCENTED: &str = "áéíóúÁÉÍÓÚâêîôÂÊÎÔãõÃÕçÇ";

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || ACCENTED.contains(c)
}

/// Normalizes raw feed text: strips markup, drops characters outside the
/// whitelist, collapses whitespace. Never panics; degraded output is the
/// empty string.
pub struct TextCleaner {
    stripper: Box<dyn MarkupStripper + Send + Sync>,
}

impl TextCleaner {
    pub fn new() -> Self {
        Self::with_stripper(Box::new(ScraperStripper))
    }

    pub fn with_stripper(stripper: Box<dyn MarkupStripper + Send + Sync>) -> Self {
        Self { stripper }
    }

    pub fn clean(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let stripped = self.stripper.strip(text);

        let filtered: String = stripped.chars().filter(|c| is_allowed(*c)).collect();

        filtered.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelisted_input_is_noop_modulo_whitespace() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean("Olá   mundo  123"), "Olá mundo 123");
        assert_eq!(cleaner.clean("ação coração Çç"), "ação coração Çç");
    }

    #[test]
    fn test_strips_markup_tags() {
        let cleaner = TextCleaner::new();
        let result = cleaner.clean("<p>IA <b>avança</b> no Piauí</p>");
        assert_eq!(result, "IA avança no Piauí");
        assert!(!result.contains('<'));
        assert!(!result.contains('>'));
    }

    #[test]
    fn test_decodes_entities_then_filters() {
        let cleaner = TextCleaner::new();
        // &amp; decodes to '&', which is outside the whitelist
        assert_eq!(cleaner.clean("Lei &amp; ordem"), "Lei ordem");
    }

    #[test]
    fn test_removes_punctuation_and_symbols() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean("Economia: alta de 5%!"), "Economia alta de 5");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("   \t\n "), "");
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        let cleaner = TextCleaner::new();
        let result = cleaner.clean("<div<b>quebrado</div");
        assert!(!result.contains('<'));
        assert!(!result.contains('>'));
    }

    #[test]
    fn test_markup_only_input_degrades_to_empty() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean("<br/><img src=\"x.png\"/>"), "");
    }

    #[test]
    fn test_nested_link_markup() {
        let cleaner = TextCleaner::new();
        let result =
            cleaner.clean("<a href=\"https://example.com\">Governo investe</a> em tecnologia");
        assert_eq!(result, "Governo investe em tecnologia");
    }
}
