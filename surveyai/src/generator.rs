//! Mock AI question generation.

use tracing::info;

use crate::{Question, QuestionGenerator, SurveyError, catalog};

/// Stand-in for an AI generation service.
///
/// Ignores the prompt and always returns `catalog::generated_questions` at once.
/// Front ends simulate the wait with `Timings::generation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl QuestionGenerator for MockGenerator {
    fn generate(&self, prompt: &str) -> Result<Vec<Question>, SurveyError> {
        info!(prompt_chars = prompt.chars().count(), "mock generation");
        Ok(catalog::generated_questions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_ignores_prompt() {
        let generator = MockGenerator;
        let a = generator.generate("digital literacy in rural households").unwrap();
        let b = generator.generate("x").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }
}
