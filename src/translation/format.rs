use crate::i18n::Language;

/// How several short metadata values travel through one generator call.
///
/// Implementations own both directions: the prompt that tells the model what
/// shape to answer in, and the parser that maps the answer back onto the
/// values that were sent.
pub trait FieldFormat: Send + Sync {
    fn system_prompt(&self, target: Language) -> String;

    fn render(&self, values: &[&str]) -> String;

    /// Translated values in the order they were sent. May be shorter than
    /// `expected`; never longer.
    fn parse(&self, response: &str, expected: usize) -> Vec<String>;
}

/// One value per line, matched back by position.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalLines;

/// Collapse a possibly multi-line value into one line.
fn flatten_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl FieldFormat for PositionalLines {
    fn system_prompt(&self, target: Language) -> String {
        format!(
            r#"You are a professional translator. Translate each line of the user message from Italian to {}.

Rules:
- Answer with exactly one translated line per input line, in the same order
- Do not number, quote or label the lines
- Do not add explanations, blank lines or extra text
- Keep proper names, brand names and acronyms unchanged"#,
            target.name()
        )
    }

    fn render(&self, values: &[&str]) -> String {
        values
            .iter()
            .map(|value| flatten_line(value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn parse(&self, response: &str, expected: usize) -> Vec<String> {
        response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(expected)
            .map(str::to_string)
            .collect()
    }
}
