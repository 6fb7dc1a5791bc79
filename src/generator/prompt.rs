// file: src/generator/prompt.rs
// description: prompt construction for distinct per-chunk questions
// reference: existing questions are passed back with ordinal labels

use crate::generator::QuestionRequest;
use crate::parser::{ANSWER_MARKER, QUOTE_MARKER};

pub fn existing_question_label(ordinal: usize) -> String {
    format!("EXISTING QUESTION {}", ordinal)
}

pub fn build_prompt(request: &QuestionRequest) -> String {
    let mut prompt = format!(
        "Text to analyze ({}):\n{}\n\n",
        request.chunk_label, request.chunk_text
    );

    if !request.existing.is_empty() {
        prompt.push_str(
            "The following questions have already been written for this text. \
             Your question must test a different aspect or theme than every one of them.\n\n",
        );
        for (idx, existing) in request.existing.iter().enumerate() {
            prompt.push_str(&format!(
                "{}:\n{}\n\n",
                existing_question_label(idx + 1),
                existing.trim()
            ));
        }
    }

    prompt.push_str(&format!(
        "Task:\n\
         - Write 1 multiple-choice comprehension question testing understanding of this text.\n\
         - Provide 4 answer options, one per line, labelled A) to D).\n\
         - Mark the correct answer clearly on its own line as \"{} X\".\n\
         - Finally add a short supporting quotation copied exactly from the text on a line starting with \"{}\".\n",
        ANSWER_MARKER, QUOTE_MARKER
    ));

    prompt
}
