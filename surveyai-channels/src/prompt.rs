//! Text prompts for conversational channels.

use surveyai_types::{Question, QuestionKind};

/// A question as typed out by a chat bot: the text, then how to answer.
pub(crate) fn chat_prompt(question: &Question, text: &str) -> String {
    match question.kind() {
        QuestionKind::MultipleChoice(choice) => {
            format!("{text}\n{}", numbered(&choice.options))
        }
        QuestionKind::MultipleSelect(choice) => format!(
            "{text}\n{}\n(Pick one or more, separated by commas)",
            numbered(&choice.options)
        ),
        QuestionKind::Number(number) => match number.describe_range().as_str() {
            "" => format!("{text}\n(Enter a number)"),
            range => format!("{text}\n(Enter a number{range})"),
        },
        QuestionKind::Rating(rating) => {
            format!("{text}\n(Rate from 1 to {})", rating.scale)
        }
        QuestionKind::Text => text.to_string(),
    }
}

fn numbered(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {option}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
