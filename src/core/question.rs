//! Question records and the ordered, immutable question set.
//!
//! A [`QuestionSet`] is built once (either the builtin ML/NLP bank or a TOML
//! file handed in on the command line) and never mutated afterwards.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

use super::error::{BankError, InvalidArgument};

/// Default title shown on the start screen.
pub const DEFAULT_TITLE: &str = "ML/NLP Quiz";

// ───────────────────────────────────────── option key ────────

/// One of the four answer letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    /// Position of this key inside a question's `options` array.
    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }

    pub fn letter(self) -> char {
        match self {
            OptionKey::A => 'A',
            OptionKey::B => 'B',
            OptionKey::C => 'C',
            OptionKey::D => 'D',
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for OptionKey {
    type Error = InvalidArgument;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(OptionKey::A),
            'B' => Ok(OptionKey::B),
            'C' => Ok(OptionKey::C),
            'D' => Ok(OptionKey::D),
            _ => Err(InvalidArgument::UnknownOption(c.to_string())),
        }
    }
}

impl FromStr for OptionKey {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => OptionKey::try_from(c),
            _ => Err(InvalidArgument::UnknownOption(s.to_string())),
        }
    }
}

// ───────────────────────────────────────── question ──────────

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    /// Option texts in A–D order.
    pub options: [String; 4],
    pub answer: OptionKey,
}

impl Question {
    pub fn new(prompt: &str, options: [&str; 4], answer: OptionKey) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.map(str::to_string),
            answer,
        }
    }

    /// Text of the option labelled `key`.
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.answer == key
    }
}

// ───────────────────────────────────────── question set ──────

/// Non-empty, ordered, immutable sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    title: String,
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        Self::with_title(DEFAULT_TITLE, questions)
    }

    pub fn with_title(title: &str, questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self {
            title: title.to_string(),
            questions,
        })
    }

    /// The twenty-question ML/NLP reference bank.
    pub fn builtin() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            questions: super::builtin::questions(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

// ───────────────────────────────────────── TOML banks ────────

#[derive(Debug, Deserialize)]
struct TomlBank {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    a: String,
    b: String,
    c: String,
    d: String,
    answer: String,
}

/// Load and validate a question bank from a TOML file.
///
/// ```toml
/// title = "Rust basics"
///
/// [[questions]]
/// prompt = "Which keyword declares an immutable binding?"
/// a = "let"
/// b = "mut"
/// c = "var"
/// d = "const fn"
/// answer = "A"
/// ```
pub fn load_question_file(path: &Path) -> anyhow::Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_str(&content, path)
}

/// Parse a TOML string into a [`QuestionSet`].  `origin` is only used in
/// error messages.
pub fn parse_question_str(content: &str, origin: &Path) -> anyhow::Result<QuestionSet> {
    let parsed: TomlBank = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", origin.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| validate(i + 1, q))
        .collect::<Result<Vec<_>, BankError>>()
        .with_context(|| format!("invalid question bank: {}", origin.display()))?;

    let title = parsed
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let set = QuestionSet::with_title(&title, questions)
        .with_context(|| format!("invalid question bank: {}", origin.display()))?;

    tracing::debug!(count = set.len(), path = %origin.display(), "loaded question bank");
    Ok(set)
}

fn validate(number: usize, q: TomlQuestion) -> Result<Question, BankError> {
    if q.prompt.trim().is_empty() {
        return Err(BankError::EmptyPrompt { number });
    }
    let options = [q.a, q.b, q.c, q.d];
    for key in OptionKey::ALL {
        if options[key.index()].trim().is_empty() {
            return Err(BankError::EmptyOption {
                number,
                key: key.letter(),
            });
        }
    }
    let answer = q.answer.parse::<OptionKey>().map_err(|_| BankError::BadAnswer {
        number,
        answer: q.answer.clone(),
    })?;

    Ok(Question {
        prompt: q.prompt,
        options,
        answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> &'static Path {
        Path::new("bank.toml")
    }

    #[test]
    fn option_key_parses_case_insensitively() {
        assert_eq!(OptionKey::try_from('a'), Ok(OptionKey::A));
        assert_eq!(OptionKey::try_from('D'), Ok(OptionKey::D));
        assert_eq!(" c ".parse::<OptionKey>(), Ok(OptionKey::C));
    }

    #[test]
    fn option_key_rejects_other_input() {
        assert!(matches!(
            OptionKey::try_from('E'),
            Err(InvalidArgument::UnknownOption(_))
        ));
        assert!("AB".parse::<OptionKey>().is_err());
        assert!("".parse::<OptionKey>().is_err());
    }

    #[test]
    fn builtin_bank_has_twenty_questions() {
        let set = QuestionSet::builtin();
        assert_eq!(set.len(), 20);
        assert_eq!(set.title(), DEFAULT_TITLE);
        assert_eq!(set.get(0).map(|q| q.answer), Some(OptionKey::B));
        assert_eq!(set.get(6).map(|q| q.answer), Some(OptionKey::A));
        assert_eq!(set.get(18).map(|q| q.answer), Some(OptionKey::C));
        assert!(set.get(20).is_none());
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(QuestionSet::new(Vec::new()), Err(BankError::Empty));
    }

    #[test]
    fn parses_toml_bank() {
        let src = r#"
title = "Rust basics"

[[questions]]
prompt = "Which keyword declares a binding?"
a = "let"
b = "var"
c = "def"
d = "dim"
answer = "a"
"#;
        let set = parse_question_str(src, origin()).unwrap();
        assert_eq!(set.title(), "Rust basics");
        assert_eq!(set.len(), 1);
        let q = set.get(0).unwrap();
        assert_eq!(q.answer, OptionKey::A);
        assert_eq!(q.option(OptionKey::B), "var");
    }

    #[test]
    fn missing_title_falls_back_to_default() {
        let src = r#"
[[questions]]
prompt = "p"
a = "1"
b = "2"
c = "3"
d = "4"
answer = "D"
"#;
        let set = parse_question_str(src, origin()).unwrap();
        assert_eq!(set.title(), DEFAULT_TITLE);
    }

    #[test]
    fn bad_answer_names_the_question() {
        let src = r#"
[[questions]]
prompt = "first"
a = "1"
b = "2"
c = "3"
d = "4"
answer = "A"

[[questions]]
prompt = "second"
a = "1"
b = "2"
c = "3"
d = "4"
answer = "E"
"#;
        let err = parse_question_str(src, origin()).unwrap_err();
        let bank = err.downcast_ref::<BankError>().unwrap();
        assert_eq!(
            bank,
            &BankError::BadAnswer {
                number: 2,
                answer: "E".into()
            }
        );
    }

    #[test]
    fn empty_option_is_rejected() {
        let src = r#"
[[questions]]
prompt = "p"
a = "1"
b = "  "
c = "3"
d = "4"
answer = "A"
"#;
        let err = parse_question_str(src, origin()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BankError>(),
            Some(&BankError::EmptyOption { number: 1, key: 'B' })
        );
    }

    #[test]
    fn bank_without_questions_is_empty() {
        let err = parse_question_str("title = \"nothing\"\n", origin()).unwrap_err();
        assert_eq!(err.downcast_ref::<BankError>(), Some(&BankError::Empty));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(
            &path,
            "[[questions]]\nprompt = \"p\"\na = \"1\"\nb = \"2\"\nc = \"3\"\nd = \"4\"\nanswer = \"C\"\n",
        )
        .unwrap();
        let set = load_question_file(&path).unwrap();
        assert_eq!(set.get(0).map(|q| q.answer), Some(OptionKey::C));

        assert!(load_question_file(&dir.path().join("missing.toml")).is_err());
    }
}
