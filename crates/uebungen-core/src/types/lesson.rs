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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::types::exercise::Exercise;
use crate::types::exercise::ExerciseRecord;

/// An ordered list of exercises plus the lesson's number and title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LessonRecord", into = "LessonRecord")]
pub struct Lesson {
    number: u32,
    title: String,
    exercises: Vec<Exercise>,
}

impl Lesson {
    pub fn new(number: u32, title: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            number,
            title: title.into(),
            exercises,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn exercise(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// A lesson as written in a lesson file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseRecord>,
}

impl TryFrom<LessonRecord> for Lesson {
    type Error = ErrorReport;

    fn try_from(record: LessonRecord) -> Result<Self, Self::Error> {
        let exercises = record
            .exercises
            .into_iter()
            .enumerate()
            .map(|(idx, ex)| {
                Exercise::try_from(ex).map_err(|e| {
                    ErrorReport::new(format!("exercise {}: {}", idx + 1, e.message()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Lesson {
            number: record.number,
            title: record.title,
            exercises,
        })
    }
}

impl From<Lesson> for LessonRecord {
    fn from(lesson: Lesson) -> Self {
        LessonRecord {
            number: lesson.number,
            title: lesson.title,
            exercises: lesson.exercises.into_iter().map(Into::into).collect(),
        }
    }
}
