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

//! The state of one learner working through one lesson.

use std::collections::BTreeMap;

use maud::Markup;

use crate::error::Fallible;
use crate::error::fail;
use crate::grade::Verdict;
use crate::grade::grade_choice;
use crate::grade::grade_fill;
use crate::grade::grade_match;
use crate::grade::grade_order;
use crate::grade::grade_true_false;
use crate::order::OrderView;
use crate::order::OrderWidget;
use crate::render::render_lesson;
use crate::results::ExerciseStats;
use crate::results::LessonResults;
use crate::results::Score;
use crate::rng::TinyRng;
use crate::types::exercise::Exercise;
use crate::types::exercise::ExerciseBody;
use crate::types::lesson::Lesson;
use crate::types::timestamp::Timestamp;

/// A lesson together with the learner's answers.
///
/// Only the first attempt at an exercise counts: later attempts are still
/// graded, so the page can show the verdict again, but never change the
/// recorded answer or the score.
pub struct Session {
    lesson: Lesson,
    /// Exercise index to first-attempt correctness.
    answers: BTreeMap<usize, bool>,
    score: Score,
    /// Widget state for ordering exercises, by exercise index.
    ordering: BTreeMap<usize, OrderWidget>,
}

impl Session {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            answers: BTreeMap::new(),
            score: Score::default(),
            ordering: BTreeMap::new(),
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn answers(&self) -> &BTreeMap<usize, bool> {
        &self.answers
    }

    pub fn score(&self) -> Score {
        self.score
    }

    fn exercise(&self, index: usize) -> Fallible<&Exercise> {
        match self.lesson.exercise(index) {
            Some(exercise) => Ok(exercise),
            None => fail(format!(
                "no exercise {index} (lesson has {})",
                self.lesson.len()
            )),
        }
    }

    /// Store the verdict's correctness unless the exercise already has an
    /// answer. Returns whether it was stored.
    fn record(&mut self, verdict: &Verdict) -> bool {
        if self.answers.contains_key(&verdict.index) {
            return false;
        }
        self.answers.insert(verdict.index, verdict.correct);
        self.score.add(verdict.correct);
        log::debug!(
            "Exercise {} answered {}",
            verdict.index,
            if verdict.correct { "correctly" } else { "incorrectly" }
        );
        true
    }

    pub fn answer_choice(&mut self, index: usize, selected: &str) -> Fallible<Verdict> {
        let verdict = grade_choice(index, self.exercise(index)?, selected)?;
        self.record(&verdict);
        Ok(verdict)
    }

    pub fn answer_fill(&mut self, index: usize, input: &str) -> Fallible<Verdict> {
        let verdict = grade_fill(index, self.exercise(index)?, input)?;
        self.record(&verdict);
        Ok(verdict)
    }

    pub fn answer_match(&mut self, index: usize, selected: &str) -> Fallible<Verdict> {
        let verdict = grade_match(index, self.exercise(index)?, selected)?;
        self.record(&verdict);
        Ok(verdict)
    }

    pub fn answer_true_false(&mut self, index: usize, selected: &str) -> Fallible<Verdict> {
        let verdict = grade_true_false(index, self.exercise(index)?, selected)?;
        self.record(&verdict);
        Ok(verdict)
    }

    /// Render the whole lesson. Ordering exercises get freshly scrambled words.
    pub fn render_lesson(&self, rng: &mut TinyRng) -> Markup {
        render_lesson(&self.lesson, rng)
    }

    /// Set up per-exercise state after the lesson has been rendered. Only
    /// ordering exercises need any.
    pub fn initialize_exercises(&mut self) {
        self.ordering.clear();
        for (idx, exercise) in self.lesson.exercises().iter().enumerate() {
            if let ExerciseBody::Order { words, .. } = exercise.body() {
                self.ordering.insert(idx, OrderWidget::new(words.len()));
            }
        }
    }

    fn widget_mut(&mut self, index: usize) -> Fallible<&mut OrderWidget> {
        if !matches!(self.exercise(index)?.body(), ExerciseBody::Order { .. }) {
            return fail(format!("exercise {index} is not an ordering exercise"));
        }
        match self.ordering.get_mut(&index) {
            Some(widget) => Ok(widget),
            None => fail(format!("ordering exercise {index} has not been initialized")),
        }
    }

    pub fn order_view(&self, index: usize) -> Option<OrderView> {
        self.ordering.get(&index).map(|widget| widget.view(index))
    }

    /// The learner clicked word control `slot`, labelled `word`.
    pub fn select_word(&mut self, index: usize, slot: usize, word: &str) -> Fallible<OrderView> {
        let widget = self.widget_mut(index)?;
        widget.select(slot, word);
        Ok(widget.view(index))
    }

    pub fn reset_order(&mut self, index: usize) -> Fallible<OrderView> {
        let widget = self.widget_mut(index)?;
        widget.reset();
        Ok(widget.view(index))
    }

    /// Lock the ordering exercise and grade the assembled sentence.
    pub fn check_order(&mut self, index: usize) -> Fallible<Verdict> {
        let widget = self.widget_mut(index)?;
        widget.check();
        let selection = widget.selection().to_vec();
        let verdict = grade_order(index, self.exercise(index)?, &selection)?;
        self.record(&verdict);
        Ok(verdict)
    }

    pub fn stats(&self) -> ExerciseStats {
        ExerciseStats::new(self.lesson.len(), &self.answers)
    }

    /// Forget every answer and all widget state, then render the lesson from
    /// scratch.
    pub fn reset_all_exercises(&mut self, rng: &mut TinyRng) -> Markup {
        self.answers.clear();
        self.score = Score::default();
        let markup = self.render_lesson(rng);
        self.initialize_exercises();
        log::debug!("Lesson {} reset", self.lesson.number());
        markup
    }

    pub fn export_results(&self, timestamp: Timestamp) -> LessonResults {
        LessonResults {
            lesson: self.lesson.number(),
            title: self.lesson.title().to_string(),
            timestamp,
            stats: self.stats(),
            answers: self.answers.clone(),
        }
    }
}
