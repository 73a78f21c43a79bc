//! Prompt templates for each generation kind.
//!
//! Prompts are deterministic: the same kind, parameter and text always
//! produce the same string. Quiz and flashcard prompts embed the
//! `question<TAB>answer` line contract that the parser relies on.

use indoc::formatdoc;

use super::types::{GenerationKind, GenerationRequest};

pub const QUIZ_MAX_QUESTIONS: usize = 5;
pub const DEFAULT_FLASHCARD_COUNT: usize = 15;

const RECORD_FORMAT: &str = "Put each item on its own line. On every line write the question, \
then exactly one tab character, then the answer. Do not use tab characters anywhere else and \
do not add headings, blank lines or any other commentary.";

/// Build the prompt for `request`.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request.kind {
        GenerationKind::Quiz => quiz_prompt(&request.text),
        GenerationKind::Flashcards => flashcard_prompt(&request.text, request.flashcard_count),
        GenerationKind::Topics => topics_prompt(&request.text),
    }
}

fn quiz_prompt(text: &str) -> String {
    formatdoc! {"
        Generate at most {QUIZ_MAX_QUESTIONS} fill-in-the-blank quiz questions from the text below. \
        Each question must be answerable solely from the information in the text. \
        Replace one key word of the question with _____ and give that word as the answer. \
        If the text only supports fewer questions, generate fewer.
        {RECORD_FORMAT}
        Example line: The _____ is the main heat source for the Earth.\tSun

        Text:
        {text}"}
}

fn flashcard_prompt(text: &str, count: usize) -> String {
    formatdoc! {"
        Create exactly {count} study flashcards from the text below. \
        Each flashcard has a short question on the front and a concise answer on the back, \
        both based only on the text.
        {RECORD_FORMAT}
        Example line: How many hearts does an octopus have?\tThree

        Text:
        {text}"}
}

fn topics_prompt(text: &str) -> String {
    formatdoc! {"
        Identify the key topics covered in the text below. \
        Return them as a bullet list, one topic per line, each line starting with \"• \" \
        followed by the topic name, a dash, and a one-sentence description.

        Text:
        {text}"}
}
