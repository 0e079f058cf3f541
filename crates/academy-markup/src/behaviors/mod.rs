//! Built-in behaviors: quizzes and tabbed code blocks.

mod code;
mod quiz;

pub use code::{Code, LANGUAGES, Language};
pub use quiz::{Answer, AnswerStatus, Question, Quiz};

use crate::behavior::BehaviorRegistry;

pub(crate) fn register_builtin(registry: &mut BehaviorRegistry) {
    registry.register("quiz", Quiz);
    registry.register("question", Question);
    registry.register("answer", Answer);
    registry.register("code", Code);
    for (name, caption) in LANGUAGES {
        registry.register(name, Language::with_caption(name, caption));
    }
}
