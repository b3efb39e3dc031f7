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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// Running tally of first attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
}

impl Score {
    pub fn add(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseStats {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Correct answers as a rounded percentage of all exercises, answered or
    /// not.
    pub percentage: u32,
}

impl ExerciseStats {
    pub fn new(total: usize, answers: &BTreeMap<usize, bool>) -> Self {
        let correct = answers.values().filter(|&&v| v).count();
        let incorrect = answers.len() - correct;
        let percentage = if total > 0 {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total,
            answered: answers.len(),
            correct,
            incorrect,
            percentage,
        }
    }

    /// A one-line summary for the page header.
    pub fn summary(&self) -> String {
        format!(
            "{} von {} richtig ({} %)",
            self.correct, self.total, self.percentage
        )
    }
}

/// A snapshot of a lesson's results, for handing to the outside world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LessonResults {
    pub lesson: u32,
    pub title: String,
    pub timestamp: Timestamp,
    pub stats: ExerciseStats,
    pub answers: BTreeMap<usize, bool>,
}
