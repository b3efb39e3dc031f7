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

//! Answer checking. Every grader is pure: it looks at an exercise and the
//! learner's input and returns a [`Verdict`] describing what the page should
//! show. Recording the attempt is the session's job.

use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::exercise::AnswerSet;
use crate::types::exercise::Exercise;
use crate::types::exercise::ExerciseBody;

/// The two fixed slots of a true/false exercise, in display order.
pub const TRUE_FALSE_SLOTS: [&str; 2] = ["richtig", "falsch"];

/// Trim and case-fold user input for comparison.
pub fn normalize_answer(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Whether `user` matches any of the accepted answers, ignoring case. The
/// user's input is also trimmed; the accepted answers are taken as written.
pub fn is_answer_correct(user: &str, accepted: &[impl AsRef<str>]) -> bool {
    let user = normalize_answer(user);
    accepted
        .iter()
        .any(|answer| answer.as_ref().to_lowercase() == user)
}

/// Map German and English true/false tokens onto `richtig`/`falsch`.
/// Anything else is returned case-folded.
pub fn canonical_true_false(value: &str) -> String {
    let folded = value.to_lowercase();
    match folded.as_str() {
        "richtig" | "true" => "richtig".to_string(),
        "falsch" | "false" => "falsch".to_string(),
        _ => folded,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Correct,
    Incorrect,
}

impl Mark {
    pub fn from_correct(correct: bool) -> Self {
        if correct { Mark::Correct } else { Mark::Incorrect }
    }

    /// The CSS class for this mark.
    pub fn class(&self) -> &'static str {
        match self {
            Mark::Correct => "correct",
            Mark::Incorrect => "incorrect",
        }
    }
}

/// How a single option control should look after grading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionMark {
    /// The control's `data-value`.
    pub value: String,
    pub selected: bool,
    pub mark: Option<Mark>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionLabel {
    Answer,
    Mapping,
    Sequence,
}

impl SolutionLabel {
    pub fn text(&self) -> &'static str {
        match self {
            SolutionLabel::Answer => "Richtige Antwort",
            SolutionLabel::Mapping => "Richtige Zuordnung",
            SolutionLabel::Sequence => "Richtige Reihenfolge",
        }
    }
}

/// The correct answer, shown after a wrong attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub label: SolutionLabel,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Feedback {
    pub correct: bool,
    pub solution: Option<Solution>,
    pub explanation: Option<String>,
}

impl Feedback {
    pub fn headline(&self) -> &'static str {
        if self.correct {
            "✓ Richtig!"
        } else {
            "✗ Leider falsch."
        }
    }

    /// The feedback as plain text.
    pub fn text(&self) -> String {
        let mut parts = vec![self.headline().to_string()];
        if let Some(solution) = &self.solution {
            parts.push(format!("{}: {}.", solution.label.text(), solution.text));
        }
        if let Some(explanation) = &self.explanation {
            parts.push(explanation.clone());
        }
        parts.join(" ")
    }
}

/// The outcome of grading one attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Verdict {
    pub index: usize,
    pub correct: bool,
    /// One entry per option control. Empty for fill and ordering exercises,
    /// whose single input or result line is styled from `correct`.
    pub marks: Vec<OptionMark>,
    pub feedback: Feedback,
}

fn mark_options(options: &[&str], selected: &str, answer: &str, correct: bool) -> Vec<OptionMark> {
    options
        .iter()
        .map(|&value| {
            let selected = value == selected;
            let mark = if selected {
                Some(Mark::from_correct(correct))
            } else if !correct && value == answer {
                Some(Mark::Correct)
            } else {
                None
            };
            OptionMark {
                value: value.to_string(),
                selected,
                mark,
            }
        })
        .collect()
}

fn feedback(exercise: &Exercise, correct: bool, solution: Option<Solution>) -> Feedback {
    Feedback {
        correct,
        solution: if correct { None } else { solution },
        explanation: exercise.explanation().map(str::to_string),
    }
}

fn wrong_kind<T>(index: usize, exercise: &Exercise, expected: &str) -> Fallible<T> {
    fail(format!(
        "exercise {index} is a {} exercise, not {expected}",
        exercise.tag()
    ))
}

pub fn grade_choice(index: usize, exercise: &Exercise, selected: &str) -> Fallible<Verdict> {
    let ExerciseBody::Choice {
        options, answer, ..
    } = exercise.body()
    else {
        return wrong_kind(index, exercise, "choice");
    };
    let correct = selected == answer.as_str();
    let options: Vec<&str> = options.iter().map(String::as_str).collect();
    Ok(Verdict {
        index,
        correct,
        marks: mark_options(&options, selected, answer, correct),
        feedback: feedback(
            exercise,
            correct,
            Some(Solution {
                label: SolutionLabel::Answer,
                text: answer.clone(),
            }),
        ),
    })
}

pub fn grade_fill(index: usize, exercise: &Exercise, input: &str) -> Fallible<Verdict> {
    let ExerciseBody::Fill { answers, .. } = exercise.body() else {
        return wrong_kind(index, exercise, "fill");
    };
    let correct = is_answer_correct(input, answers.as_slice());
    Ok(Verdict {
        index,
        correct,
        marks: Vec::new(),
        feedback: feedback(exercise, correct, Some(fill_solution(answers))),
    })
}

fn fill_solution(answers: &AnswerSet) -> Solution {
    Solution {
        label: SolutionLabel::Answer,
        text: answers.to_string(),
    }
}

pub fn grade_match(index: usize, exercise: &Exercise, selected: &str) -> Fallible<Verdict> {
    let ExerciseBody::Match {
        sentence,
        options,
        answer,
    } = exercise.body()
    else {
        return wrong_kind(index, exercise, "match");
    };
    let correct = selected == answer.as_str();
    let options: Vec<&str> = options.iter().map(String::as_str).collect();
    Ok(Verdict {
        index,
        correct,
        marks: mark_options(&options, selected, answer, correct),
        feedback: feedback(
            exercise,
            correct,
            Some(Solution {
                label: SolutionLabel::Mapping,
                text: format!("{sentence} → {answer}"),
            }),
        ),
    })
}

pub fn grade_true_false(index: usize, exercise: &Exercise, selected: &str) -> Fallible<Verdict> {
    let ExerciseBody::TrueFalse { answer, .. } = exercise.body() else {
        return wrong_kind(index, exercise, "truefalse");
    };
    let expected = canonical_true_false(answer);
    let given = canonical_true_false(selected);
    let correct = given == expected;
    Ok(Verdict {
        index,
        correct,
        marks: mark_options(&TRUE_FALSE_SLOTS, &given, &expected, correct),
        feedback: feedback(exercise, correct, None),
    })
}

/// Compare an assembled word sequence against the target, position by
/// position.
pub fn grade_order(index: usize, exercise: &Exercise, selection: &[String]) -> Fallible<Verdict> {
    let ExerciseBody::Order { answer, .. } = exercise.body() else {
        return wrong_kind(index, exercise, "order");
    };
    let correct = selection == answer.as_slice();
    Ok(Verdict {
        index,
        correct,
        marks: Vec::new(),
        feedback: feedback(
            exercise,
            correct,
            Some(Solution {
                label: SolutionLabel::Sequence,
                text: answer.join(" "),
            }),
        ),
    })
}
