//! Text normalisation applied before encoding.
//!
//! Pure functions, no error paths: URLs and @-mentions are stripped, anything
//! outside `[a-zA-Z\s]` is dropped, the rest is lowercased, stopwords are
//! removed, and the surviving tokens are rejoined with single spaces.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn url_mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"http\S+|www\S+|@\S+").expect("static regex"))
}

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Strip URL-like and mention-like substrings, drop everything that is not an
/// ASCII letter or whitespace, and lowercase.
pub fn clean_text(text: &str) -> String {
    let without_links = url_mention_re().replace_all(text, "");
    without_links
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Drop stopword tokens and rejoin with single spaces.
pub fn strip_stopwords(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| !stopwords().contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The full normalisation pipeline. Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    strip_stopwords(&clean_text(text))
}

/// The NLTK English stopword list the original pipeline filtered against.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve", "youll",
    "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
    "shes", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
    "themselves", "what", "which", "who", "whom", "this", "that", "thatll", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on",
    "off", "over", "under", "again", "further", "then", "once", "here", "there", "when", "where",
    "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "dont", "should", "shouldve", "now", "d", "ll", "m", "o", "re", "ve",
    "y", "ain", "aren", "arent", "couldn", "couldnt", "didn", "didnt", "doesn", "doesnt", "hadn",
    "hadnt", "hasn", "hasnt", "haven", "havent", "isn", "isnt", "ma", "mightn", "mightnt",
    "mustn", "mustnt", "needn", "neednt", "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt",
    "weren", "werent", "won", "wont", "wouldn", "wouldnt",
];
