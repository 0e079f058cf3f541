//! Quiz, question and answer tags.
//!
//! ```xml
//! <quiz>
//!   Pick one.
//!   <question>
//!     What does `?` do?
//!     <answer value="1">Propagates the error</answer>
//!     <answer value="0">Panics</answer>
//!   </question>
//! </quiz>
//! ```
//!
//! A quiz becomes a `GET` form, each question a `div`, each answer a radio
//! input with a status marker. Ids are issued from the render context:
//! `quiz-{q}`, `question-{q}-{n}` and `answer-{q}-{n}-{a}`.

use crate::behavior::Behavior;
use crate::context::RenderContext;
use crate::element::ElementRef;
use crate::util::{escape_html, normalize_whitespace};

const QUIZ: &str = "quiz";
const QUESTION: &str = "question";
const ANSWER: &str = "answer";

/// `<quiz>`: a form holding questions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Quiz;

impl Behavior for Quiz {
    fn on_start(&self, _element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let id = ctx.next_id(QUIZ);
        format!("\n<form method=\"get\" class=\"quiz\" id=\"quiz-{id}\">\n")
    }

    fn on_data(&self, text: &str, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return String::new();
        }
        format!("\n<div class=\"quiz-data\">{text}</div>\n")
    }

    fn on_end(&self, _element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        format!(
            "<div class=\"buttons\"><button>{}</button></div></form>",
            escape_html(ctx.submit_label())
        )
    }
}

/// `<question>`: a group of answers. Must sit directly inside a quiz.
#[derive(Debug, Default, Clone, Copy)]
pub struct Question;

impl Behavior for Question {
    fn on_start(&self, _element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let id = ctx.next_id(QUESTION);
        let quiz = ctx.current_id(QUIZ);
        format!("\n<div class=\"question\" id=\"question-{quiz}-{id}\">")
    }

    fn on_data(&self, text: &str, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return String::new();
        }
        format!("\n  <div class=\"question-data\">{text}</div>")
    }

    fn on_end(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        "\n</div>\n".to_owned()
    }

    fn validate(&self, element: ElementRef<'_>) -> Result<(), String> {
        match element.parent() {
            Some(parent) if parent.name() == QUIZ => Ok(()),
            Some(parent) if parent.is_root() => Err(
                "Question must be inside a Quiz element, currently at the top level".to_owned(),
            ),
            Some(parent) => Err(format!(
                "Question must be inside a Quiz element, currently in: {}",
                parent.name()
            )),
            None => Err("Question must be inside a Quiz element".to_owned()),
        }
    }
}

/// Visual state of an answer after a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerStatus {
    /// Not selected.
    Unknown,
    /// Selected and marked correct (`value="1"`).
    Correct,
    /// Selected and marked wrong (`value="0"`).
    Incorrect,
    /// Selected with any other value.
    Selected,
}

impl AnswerStatus {
    /// Status for an answer with the given `value` attribute.
    #[must_use]
    pub fn evaluate(selected: bool, value: i64) -> Self {
        match (selected, value) {
            (false, _) => Self::Unknown,
            (true, 1) => Self::Correct,
            (true, 0) => Self::Incorrect,
            (true, _) => Self::Selected,
        }
    }

    /// CSS class for the status marker.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Correct => "correct",
            Self::Incorrect => "error",
            Self::Selected => "selected",
        }
    }
}

/// `<answer value="0|1">`: one radio choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct Answer;

impl Behavior for Answer {
    fn on_start(&self, element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let id = ctx.next_id(ANSWER);
        let quiz = ctx.current_id(QUIZ);
        let question = ctx.current_id(QUESTION);

        let group = format!("question-{quiz}-{question}");
        let answer_id = format!("answer-{quiz}-{question}-{id}");
        let value = element
            .attribute("value")
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let selected = ctx.selections().get(&group) == Some(answer_id.as_str());
        let status = AnswerStatus::evaluate(selected, value);
        let checked = if selected { "checked " } else { "" };

        format!(
            "\n  <div class=\"answer-container\">\
             \n    <input type=\"radio\" {checked}name=\"{group}\" class=\"answer\" id=\"{answer_id}\" value=\"{answer_id}\">\
             \n    <span class=\"answer-status {status}\">&nbsp;</span><label for=\"{answer_id}\" class=\"answer-data\">",
            status = status.css_class(),
        )
    }

    fn on_data(&self, text: &str, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        normalize_whitespace(text)
    }

    fn on_end(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        "</label>\n  </div>".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Selections, Translator};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<quiz><question>Q1?<answer value="1">A</answer><answer value="0">B</answer></question></quiz>"#;

    fn render(source: &str, selections: &Selections) -> String {
        Translator::new().translate(source, selections).unwrap().html
    }

    #[test]
    fn test_quiz_sample_output() {
        let html = render(SAMPLE, &Selections::new());
        let expected = concat!(
            "\n<form method=\"get\" class=\"quiz\" id=\"quiz-1\">\n",
            "\n<div class=\"question\" id=\"question-1-1\">",
            "\n  <div class=\"question-data\">Q1?</div>",
            "\n  <div class=\"answer-container\">",
            "\n    <input type=\"radio\" name=\"question-1-1\" class=\"answer\" id=\"answer-1-1-1\" value=\"answer-1-1-1\">",
            "\n    <span class=\"answer-status unknown\">&nbsp;</span><label for=\"answer-1-1-1\" class=\"answer-data\">A</label>\n  </div>",
            "\n  <div class=\"answer-container\">",
            "\n    <input type=\"radio\" name=\"question-1-1\" class=\"answer\" id=\"answer-1-1-2\" value=\"answer-1-1-2\">",
            "\n    <span class=\"answer-status unknown\">&nbsp;</span><label for=\"answer-1-1-2\" class=\"answer-data\">B</label>\n  </div>",
            "\n</div>\n",
            "<div class=\"buttons\"><button>Submit</button></div></form>",
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_quiz_translation_is_deterministic() {
        let selections = Selections::new();
        let translator = Translator::new();
        let first = translator.translate(SAMPLE, &selections).unwrap();
        let second = translator.translate(SAMPLE, &selections).unwrap();
        assert_eq!(first.html, second.html);
        assert!(second.html.contains("id=\"quiz-1\""));
        assert!(!second.html.contains("quiz-2"));
    }

    #[test]
    fn test_selected_correct_answer() {
        let selections = Selections::from_query("question-1-1=answer-1-1-1");
        let html = render(SAMPLE, &selections);
        assert!(html.contains(r#"<input type="radio" checked name="question-1-1" class="answer" id="answer-1-1-1""#));
        assert!(html.contains(r#"<span class="answer-status correct">"#));
        assert_eq!(html.matches("answer-status unknown").count(), 1);
    }

    #[test]
    fn test_selected_wrong_answer() {
        let selections = Selections::from_query("question-1-1=answer-1-1-2");
        let html = render(SAMPLE, &selections);
        assert!(html.contains(r#"<span class="answer-status error">"#));
        assert!(!html.contains("answer-status correct"));
    }

    #[test]
    fn test_selection_for_other_question_is_ignored() {
        let selections = Selections::from_query("question-2-1=answer-1-1-1");
        let html = render(SAMPLE, &selections);
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_missing_value_counts_as_wrong() {
        let selections = Selections::from_query("question-1-1=answer-1-1-1");
        let html = render("<quiz><question><answer>X</answer></question></quiz>", &selections);
        assert!(html.contains("answer-status error"));
    }

    #[test]
    fn test_unusual_value_is_selected() {
        let selections = Selections::from_query("question-1-1=answer-1-1-1");
        let html = render(
            r#"<quiz><question><answer value="7">X</answer></question></quiz>"#,
            &selections,
        );
        assert!(html.contains("answer-status selected"));
    }

    #[test]
    fn test_whitespace_only_text_is_suppressed() {
        let html = render("<quiz>\n  <question>\n   \n</question>\n</quiz>", &Selections::new());
        assert!(!html.contains("quiz-data"));
        assert!(!html.contains("question-data"));
    }

    #[test]
    fn test_quiz_text_is_normalized() {
        let html = render("<quiz>\n  Pick   the\n  right one\n</quiz>", &Selections::new());
        assert!(html.contains("<div class=\"quiz-data\">Pick the right one</div>"));
    }

    #[test]
    fn test_ids_continue_across_quizzes() {
        let source = "<quiz><question><answer>a</answer></question></quiz>\
                      <quiz><question><answer>b</answer></question></quiz>";
        let html = render(source, &Selections::new());
        assert!(html.contains(r#"id="quiz-2""#));
        assert!(html.contains(r#"id="question-2-2""#));
        assert!(html.contains(r#"id="answer-2-2-2""#));
    }

    #[test]
    fn test_submit_label_is_configurable() {
        let html = Translator::new()
            .with_submit_label("Verstuur")
            .translate("<quiz></quiz>", &Selections::new())
            .unwrap()
            .html;
        assert!(html.ends_with("<button>Verstuur</button></div></form>"));
    }

    #[test]
    fn test_answer_status_classes() {
        assert_eq!(AnswerStatus::evaluate(false, 1).css_class(), "unknown");
        assert_eq!(AnswerStatus::evaluate(true, 1).css_class(), "correct");
        assert_eq!(AnswerStatus::evaluate(true, 0).css_class(), "error");
        assert_eq!(AnswerStatus::evaluate(true, -3).css_class(), "selected");
    }
}
