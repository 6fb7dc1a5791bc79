// file: src/chunker/paragraph.rs
// description: paragraph and sentence segmentation helpers for the chunker
// reference: blank-line paragraphs, terminal punctuation sentence boundaries

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLANK_LINE: Regex =
        Regex::new(r"\n[ \t\r\f\v]*\n").expect("BLANK_LINE regex is valid");
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits on blank lines and collapses each paragraph's whitespace to single
/// spaces. Empty paragraphs are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");

    BLANK_LINE
        .split(text.trim())
        .map(|para| para.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|para| !para.is_empty())
        .collect()
}

/// Sentence boundary: `.`, `!` or `?` followed by whitespace. The punctuation
/// stays with the sentence it ends.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        let end = idx + ch.len_utf8();
        let mut next_start = end;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            next_start = ws_idx + ws.len_utf8();
            chars.next();
        }

        if next_start > end {
            sentences.push(paragraph[start..end].to_string());
            start = next_start;
        }
    }

    if start < paragraph.len() {
        let tail = paragraph[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }

    sentences
}

/// Greedily packs sentences into sections of at most `chunk_size` words. A
/// single sentence longer than the budget becomes its own section.
pub fn regroup_sentences(sentences: &[String], chunk_size: usize) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0;

    for sentence in sentences {
        let words = word_count(sentence);

        if current_words + words > chunk_size && !current.is_empty() {
            sections.push(current.join(" "));
            current.clear();
            current_words = 0;
        }

        current.push(sentence);
        current_words += words;
    }

    if !current.is_empty() {
        sections.push(current.join(" "));
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_paragraphs_collapses_whitespace() {
        let text = "  First   line\nstill first.\n\n\n\nSecond\tparagraph  \n \n\nThird";
        assert_eq!(
            split_paragraphs(text),
            vec!["First line still first.", "Second paragraph", "Third"]
        );
    }

    #[test]
    fn test_split_paragraphs_handles_crlf() {
        let text = "One\r\n\r\nTwo\r\nmore";
        assert_eq!(split_paragraphs(text), vec!["One", "Two more"]);
    }

    #[test]
    fn test_split_paragraphs_whitespace_only() {
        assert!(split_paragraphs(" \n\n\t \n").is_empty());
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Is it? Yes! It is. 3.14 stays whole");
        assert_eq!(sentences, vec!["Is it?", "Yes!", "It is.", "3.14 stays whole"]);
    }

    #[test]
    fn test_split_sentences_trailing_punctuation() {
        assert_eq!(split_sentences("Done."), vec!["Done."]);
    }

    #[test]
    fn test_regroup_respects_budget() {
        let sentences: Vec<String> = ["a b c.", "d e.", "f g h i.", "j."]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            regroup_sentences(&sentences, 5),
            vec!["a b c. d e.", "f g h i. j."]
        );
    }

    #[test]
    fn test_regroup_oversized_sentence_stands_alone() {
        let sentences = vec!["one two three four five six.".to_string(), "seven.".to_string()];
        assert_eq!(
            regroup_sentences(&sentences, 3),
            vec!["one two three four five six.", "seven."]
        );
    }
}
