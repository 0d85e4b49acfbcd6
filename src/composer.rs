use crate::schema::{QUESTION_SEPARATOR, SCHEMA_PROMPT};

/// A question that is worth sending to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question<'a>(&'a str);

impl<'a> Question<'a> {
    /// Gate applied before composing: an empty question never reaches the
    /// model. Anything else, whitespace included, is kept exactly as typed.
    pub fn new(raw: &'a str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Builds the single user message: schema description, separator, question.
pub fn compose_prompt(question: &Question<'_>) -> String {
    let question = question.as_str();
    let mut prompt =
        String::with_capacity(SCHEMA_PROMPT.len() + QUESTION_SEPARATOR.len() + question.len());
    prompt.push_str(SCHEMA_PROMPT);
    prompt.push_str(QUESTION_SEPARATOR);
    prompt.push_str(question);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION: &str = "Can you give me top conditions reported by patients?";

    #[test]
    fn prompt_is_schema_separator_question() {
        let question = Question::new(QUESTION).unwrap();
        let prompt = compose_prompt(&question);

        assert!(prompt.starts_with(SCHEMA_PROMPT));
        assert!(prompt.ends_with(QUESTION));
        assert_eq!(prompt, format!("{SCHEMA_PROMPT}{QUESTION_SEPARATOR}{QUESTION}"));
    }

    #[test]
    fn question_is_not_escaped_or_trimmed() {
        let raw = "  how many rows in \"salesforce.contact\"?\n-- ignore';  ";
        let prompt = compose_prompt(&Question::new(raw).unwrap());
        assert_eq!(&prompt[SCHEMA_PROMPT.len() + QUESTION_SEPARATOR.len()..], raw);
    }

    #[test]
    fn composing_twice_is_identical() {
        let question = Question::new("count opted out users").unwrap();
        assert_eq!(compose_prompt(&question), compose_prompt(&question));
    }

    #[test]
    fn empty_question_is_gated() {
        assert!(Question::new("").is_none());
    }

    #[test]
    fn whitespace_question_is_composed_verbatim() {
        for raw in ["   ", " \t\n"] {
            let question = Question::new(raw).expect("whitespace is not empty");
            assert_eq!(
                compose_prompt(&question),
                format!("{SCHEMA_PROMPT}{QUESTION_SEPARATOR}{raw}")
            );
        }
    }
}
