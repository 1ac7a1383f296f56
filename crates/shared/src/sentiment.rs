use crate::models::Sentiment;

/// Immutable keyword sets used for classification. Always passed explicitly
/// into the classifier, never read from ambient state.
///
/// Keywords are lowercase substrings; a keyword counts once if present in
/// the text, no matter how many times it occurs.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    positive: Vec<String>,
    negative: Vec<String>,
    neutral: Vec<String>,
}

impl SentimentLexicon {
    pub fn new(
        positive: Vec<String>,
        negative: Vec<String>,
        neutral: Vec<String>,
    ) -> Self {
        let lower = |words: Vec<String>| -> Vec<String> {
            words.into_iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            positive: lower(positive),
            negative: lower(negative),
            neutral: lower(neutral),
        }
    }

    /// Curated Portuguese word lists for the AI-news domain. The neutral set
    /// is empty, which makes `classify` behave as a plain two-way
    /// comparison.
    pub fn default_pt() -> Self {
        let positive = [
            "avanço",
            "inovação",
            "benefício",
            "crescimento",
            "oportunidade",
            "desenvolvimento",
            "tecnologia",
            "educação",
            "investimento",
            "futuro",
        ];
        let negative = [
            "risco",
            "ameaça",
            "desemprego",
            "problema",
            "preocupação",
            "perigo",
            "vício",
            "viés",
            "invasão",
            "culpa",
        ];
        Self::new(
            positive.iter().map(|s| s.to_string()).collect(),
            negative.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
        )
    }

    fn count_hits(words: &[String], text: &str) -> usize {
        words.iter().filter(|w| text.contains(w.as_str())).count()
    }

    /// Classifies cleaned text. Pure function of the text and this lexicon.
    ///
    /// Policy: a positive/negative tie (including zero/zero) is always
    /// Neutral, regardless of the neutral count. Otherwise the label whose
    /// count is strictly greater than both others wins; when no count is
    /// strictly greatest the result is Neutral. With an empty neutral set
    /// this reduces to the plain two-way comparison.
    pub fn classify(&self, text: &str) -> Sentiment {
        let text = text.to_lowercase();
        let positive = Self::count_hits(&self.positive, &text);
        let negative = Self::count_hits(&self.negative, &text);
        let neutral = Self::count_hits(&self.neutral, &text);

        if positive == negative {
            Sentiment::Neutral
        } else if positive > negative && positive > neutral {
            Sentiment::Positive
        } else if negative > positive && negative > neutral {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Classifies a title/description pair as the pipeline does: joined with
    /// a single space.
    pub fn classify_parts(&self, title: &str, description: &str) -> Sentiment {
        self.classify(&format!("{} {}", title, description))
    }
}
