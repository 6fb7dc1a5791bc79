// file: src/parser/question.rs
// description: line-oriented grammar for generated multiple-choice questions
// reference: body lines, A-D option lines, an `Answer:` line, an optional `Quote:` line

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub const ANSWER_MARKER: &str = "Answer:";
pub const QUOTE_MARKER: &str = "Quote:";
pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

lazy_static! {
    static ref OPTION_LINE: Regex = Regex::new(
        r"^\s*\**\(?([A-D])[\).:]\**\s+(.+?)\s*$"
    ).expect("OPTION_LINE regex is valid");

    static ref ANSWER_LINE: Regex = Regex::new(
        r"(?i)^\s*\**\s*(?:correct\s+)?answer\s*\**\s*:\s*\**\s*\(?([A-D])\b"
    ).expect("ANSWER_LINE regex is valid");

    static ref QUOTE_LINE: Regex = Regex::new(
        r"(?i)^\s*\**\s*(?:supporting\s+)?quote\s*\**\s*:\s*\**\s*(.*?)\s*$"
    ).expect("QUOTE_LINE regex is valid");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub label: char,
    pub text: String,
}

/// Best-effort split of question text into its parts. Parsing never fails;
/// missing parts are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuestion {
    raw: String,
    pub body: String,
    pub options: Vec<QuestionOption>,
    pub answer: Option<char>,
    pub quote: Option<String>,
    /// Byte offset where the answer or quote section begins.
    #[serde(skip)]
    reveal_offset: Option<usize>,
}

impl ParsedQuestion {
    pub fn parse(text: &str) -> Self {
        let mut body_lines: Vec<&str> = Vec::new();
        let mut options = Vec::new();
        let mut answer = None;
        let mut quote_lines: Vec<String> = Vec::new();
        let mut in_quote = false;
        let mut reveal_offset: Option<usize> = None;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();
            let line = line.trim_end_matches(['\r', '\n']);

            if in_quote {
                if line.trim().is_empty() || (answer.is_none() && ANSWER_LINE.is_match(line)) {
                    in_quote = false;
                } else {
                    quote_lines.push(line.trim().to_string());
                    continue;
                }
            }

            if answer.is_none()
                && let Some(caps) = ANSWER_LINE.captures(line)
            {
                answer = caps[1].chars().next().map(|c| c.to_ascii_uppercase());
                reveal_offset.get_or_insert(line_start);
                continue;
            }

            if quote_lines.is_empty()
                && let Some(caps) = QUOTE_LINE.captures(line)
            {
                reveal_offset.get_or_insert(line_start);
                in_quote = true;
                if !caps[1].is_empty() {
                    quote_lines.push(caps[1].to_string());
                }
                continue;
            }

            if reveal_offset.is_some() {
                continue;
            }

            if let Some(caps) = OPTION_LINE.captures(line) {
                if let Some(label) = caps[1].chars().next() {
                    options.push(QuestionOption {
                        label,
                        text: caps[2].to_string(),
                    });
                }
            } else if options.is_empty() {
                body_lines.push(line);
            }
        }

        let quote = Some(quote_lines.join(" "))
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        Self {
            raw: text.to_string(),
            body: body_lines.join("\n").trim().to_string(),
            options,
            answer,
            quote,
            reveal_offset,
        }
    }

    /// Everything before the answer and quote sections; the whole text when
    /// neither marker is present.
    pub fn question_only(&self) -> &str {
        match self.reveal_offset {
            Some(offset) => self.raw[..offset].trim_end(),
            None => self.raw.trim_end(),
        }
    }

    pub fn full(&self) -> &str {
        self.raw.trim_end()
    }

    pub fn answer(&self) -> Option<char> {
        self.answer
    }

    pub fn quote(&self) -> Option<&str> {
        self.quote.as_deref()
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    pub fn correct_option(&self) -> Option<&QuestionOption> {
        let answer = self.answer?;
        self.options.iter().find(|opt| opt.label == answer)
    }

    /// Four options labelled A-D in order and an answer naming one of them.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTION_LABELS.len()
            && self
                .options
                .iter()
                .zip(OPTION_LABELS)
                .all(|(opt, label)| opt.label == label)
            && self.correct_option().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "What does the author claim about dreams?\n\nA) They are random\nB) They fulfil wishes\nC) They predict the future\nD) They are meaningless\n\nAnswer: B\n\nQuote: \"the dream is the fulfilment of a wish\"\n";

    #[test]
    fn test_parse_well_formed_question() {
        let parsed = ParsedQuestion::parse(SAMPLE);

        assert_eq!(parsed.body, "What does the author claim about dreams?");
        assert_eq!(parsed.options.len(), 4);
        assert_eq!(parsed.options[1].text, "They fulfil wishes");
        assert_eq!(parsed.answer(), Some('B'));
        assert_eq!(
            parsed.quote(),
            Some("\"the dream is the fulfilment of a wish\"")
        );
        assert_eq!(parsed.correct_option().unwrap().label, 'B');
        assert!(parsed.is_well_formed());
    }

    #[test]
    fn test_question_only_hides_answer_and_quote() {
        let parsed = ParsedQuestion::parse(SAMPLE);
        let view = parsed.question_only();

        assert!(view.ends_with("D) They are meaningless"));
        assert!(!view.contains(ANSWER_MARKER));
        assert!(!view.contains(QUOTE_MARKER));
        assert_eq!(parsed.full(), SAMPLE.trim_end());
    }

    #[test]
    fn test_markdown_bold_markers() {
        let text = "**Question:** Which?\n**A.** one\n**B.** two\n**C.** three\n**D.** four\n**Answer:** c\n**Supporting Quote:** some words\nthat continue";
        let parsed = ParsedQuestion::parse(text);

        assert_eq!(parsed.options.len(), 4);
        assert_eq!(parsed.answer(), Some('C'));
        assert_eq!(parsed.quote(), Some("some words that continue"));
        assert!(parsed.is_well_formed());
    }

    #[test]
    fn test_no_markers_shows_everything() {
        let parsed = ParsedQuestion::parse("Just some free text\nwith no structure");
        assert_eq!(parsed.question_only(), "Just some free text\nwith no structure");
        assert_eq!(parsed.answer(), None);
        assert!(!parsed.is_well_formed());
    }

    #[test]
    fn test_quote_before_answer_is_hidden() {
        let text = "Q?\nA) a\nB) b\nC) c\nD) d\nQuote: hidden\n\nAnswer: A";
        let parsed = ParsedQuestion::parse(text);

        assert_eq!(parsed.question_only(), "Q?\nA) a\nB) b\nC) c\nD) d");
        assert_eq!(parsed.answer(), Some('A'));
        assert_eq!(parsed.quote(), Some("hidden"));
    }

    #[test]
    fn test_correct_answer_prefix() {
        let parsed = ParsedQuestion::parse("Q?\nA) a\nB) b\nC) c\nD) d\nCorrect answer: (D)");
        assert_eq!(parsed.answer(), Some('D'));
    }
}
