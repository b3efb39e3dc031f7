// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// Options offered by a choice exercise that does not list its own.
pub const DEFAULT_CHOICE_OPTIONS: [&str; 2] = ["als", "wenn"];

/// The type tag of an exercise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    Choice,
    Fill,
    TrueFalse,
    Match,
    Order,
}

impl ExerciseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Choice => "choice",
            ExerciseKind::Fill => "fill",
            ExerciseKind::TrueFalse => "truefalse",
            ExerciseKind::Match => "match",
            ExerciseKind::Order => "order",
        }
    }

    /// The instruction shown when an exercise does not override it.
    pub fn default_instruction(&self) -> &'static str {
        match self {
            ExerciseKind::Choice => "Kreuzen Sie an",
            ExerciseKind::Fill => "Ergänzen Sie",
            ExerciseKind::TrueFalse => "Richtig oder falsch?",
            ExerciseKind::Match => "Ordnen Sie zu",
            ExerciseKind::Order => "Bringen Sie in die richtige Reihenfolge",
        }
    }
}

impl Display for ExerciseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "choice" => Ok(ExerciseKind::Choice),
            "fill" => Ok(ExerciseKind::Fill),
            "truefalse" => Ok(ExerciseKind::TrueFalse),
            "match" => Ok(ExerciseKind::Match),
            "order" => Ok(ExerciseKind::Order),
            _ => Err(ErrorReport::new(format!("Unknown exercise type: {s}"))),
        }
    }
}

/// The acceptable answers of a fill-in-the-blank exercise.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerSet(Vec<String>);

impl AnswerSet {
    pub fn new(answers: Vec<String>) -> Fallible<Self> {
        if answers.is_empty() {
            return fail("answer list is empty");
        }
        Ok(Self(answers))
    }

    pub fn single(answer: impl Into<String>) -> Self {
        Self(vec![answer.into()])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Display for AnswerSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" / "))
    }
}

/// The type-specific content of an exercise.
#[derive(Clone, Debug, PartialEq)]
pub enum ExerciseBody {
    Choice {
        sentence: String,
        options: Vec<String>,
        answer: String,
    },
    Fill {
        /// Sentence with each blank written as `___`.
        sentence: String,
        answers: AnswerSet,
    },
    TrueFalse {
        sentence: String,
        answer: String,
    },
    Match {
        sentence: String,
        options: Vec<String>,
        answer: String,
    },
    Order {
        /// The words offered to the learner.
        words: Vec<String>,
        /// The target sequence.
        answer: Vec<String>,
    },
    /// An exercise whose type tag is not recognised. It loads but renders as
    /// nothing.
    Unknown { tag: String },
}

/// A single exercise of a lesson.
#[derive(Clone, Debug, PartialEq)]
pub struct Exercise {
    body: ExerciseBody,
    instruction: Option<String>,
    explanation: Option<String>,
}

impl Exercise {
    pub fn new(body: ExerciseBody) -> Self {
        Self {
            body,
            instruction: None,
            explanation: None,
        }
    }

    pub fn with_instruction(self, instruction: impl Into<String>) -> Self {
        Self {
            instruction: Some(instruction.into()),
            ..self
        }
    }

    pub fn with_explanation(self, explanation: impl Into<String>) -> Self {
        Self {
            explanation: Some(explanation.into()),
            ..self
        }
    }

    pub fn body(&self) -> &ExerciseBody {
        &self.body
    }

    /// The type tag, or `None` for an unknown exercise.
    pub fn kind(&self) -> Option<ExerciseKind> {
        match &self.body {
            ExerciseBody::Choice { .. } => Some(ExerciseKind::Choice),
            ExerciseBody::Fill { .. } => Some(ExerciseKind::Fill),
            ExerciseBody::TrueFalse { .. } => Some(ExerciseKind::TrueFalse),
            ExerciseBody::Match { .. } => Some(ExerciseKind::Match),
            ExerciseBody::Order { .. } => Some(ExerciseKind::Order),
            ExerciseBody::Unknown { .. } => None,
        }
    }

    pub fn tag(&self) -> &str {
        match (&self.body, self.kind()) {
            (ExerciseBody::Unknown { tag }, _) => tag.as_str(),
            (_, Some(kind)) => kind.as_str(),
            (_, None) => "",
        }
    }

    /// The instruction line: the exercise's own, else the type's default.
    pub fn instruction(&self) -> &str {
        match (&self.instruction, self.kind()) {
            (Some(instruction), _) => instruction.as_str(),
            (None, Some(kind)) => kind.default_instruction(),
            (None, None) => "",
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

/// A text field that holds either one string or a list of strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    One(String),
    Many(Vec<String>),
}

/// An exercise as written in a lesson file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<Text>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Text>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

fn one(field: &str, text: Option<Text>) -> Fallible<String> {
    match text {
        Some(Text::One(s)) => Ok(s),
        Some(Text::Many(_)) => fail(format!("expected a single string for `{field}`")),
        None => fail(format!("missing `{field}`")),
    }
}

fn many(field: &str, text: Option<Text>) -> Fallible<Vec<String>> {
    match text {
        Some(Text::Many(list)) if !list.is_empty() => Ok(list),
        Some(Text::Many(_)) => fail(format!("`{field}` is empty")),
        Some(Text::One(_)) => fail(format!("expected a list of words for `{field}`")),
        None => fail(format!("missing `{field}`")),
    }
}

impl TryFrom<ExerciseRecord> for Exercise {
    type Error = ErrorReport;

    fn try_from(record: ExerciseRecord) -> Result<Self, Self::Error> {
        let tag = record.kind.unwrap_or_else(|| "choice".to_string());
        let body = match tag.parse::<ExerciseKind>() {
            Ok(ExerciseKind::Choice) => ExerciseBody::Choice {
                sentence: one("sentence", record.sentence)?,
                options: record.options.unwrap_or_else(|| {
                    DEFAULT_CHOICE_OPTIONS.iter().map(|s| s.to_string()).collect()
                }),
                answer: one("answer", record.answer)?,
            },
            Ok(ExerciseKind::Fill) => ExerciseBody::Fill {
                sentence: one("sentence", record.sentence)?,
                answers: match record.answer {
                    Some(Text::One(answer)) => AnswerSet::single(answer),
                    Some(Text::Many(answers)) => AnswerSet::new(answers)?,
                    None => return fail("missing `answer`"),
                },
            },
            Ok(ExerciseKind::TrueFalse) => ExerciseBody::TrueFalse {
                sentence: one("sentence", record.sentence)?,
                answer: one("answer", record.answer)?,
            },
            Ok(ExerciseKind::Match) => ExerciseBody::Match {
                sentence: one("sentence", record.sentence)?,
                options: match record.options {
                    Some(options) => options,
                    None => return fail("match exercise without `options`"),
                },
                answer: one("answer", record.answer)?,
            },
            Ok(ExerciseKind::Order) => ExerciseBody::Order {
                words: many("sentence", record.sentence)?,
                answer: many("answer", record.answer)?,
            },
            Err(_) => ExerciseBody::Unknown { tag },
        };
        Ok(Exercise {
            body,
            instruction: record.instruction,
            explanation: record.explain,
        })
    }
}

impl From<Exercise> for ExerciseRecord {
    fn from(exercise: Exercise) -> Self {
        let kind = Some(exercise.tag().to_string());
        let mut record = ExerciseRecord {
            kind,
            explain: exercise.explanation,
            instruction: exercise.instruction,
            ..ExerciseRecord::default()
        };
        match exercise.body {
            ExerciseBody::Choice {
                sentence,
                options,
                answer,
            }
            | ExerciseBody::Match {
                sentence,
                options,
                answer,
            } => {
                record.sentence = Some(Text::One(sentence));
                record.options = Some(options);
                record.answer = Some(Text::One(answer));
            }
            ExerciseBody::Fill { sentence, answers } => {
                record.sentence = Some(Text::One(sentence));
                record.answer = Some(Text::Many(answers.0));
            }
            ExerciseBody::TrueFalse { sentence, answer } => {
                record.sentence = Some(Text::One(sentence));
                record.answer = Some(Text::One(answer));
            }
            ExerciseBody::Order { words, answer } => {
                record.sentence = Some(Text::Many(words));
                record.answer = Some(Text::Many(answer));
            }
            ExerciseBody::Unknown { .. } => {}
        }
        record
    }
}
