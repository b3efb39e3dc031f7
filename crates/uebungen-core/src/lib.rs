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

//! uebungen-core: Core library for the uebungen exercise widgets.
//!
//! This library provides WASM-compatible types and logic for:
//! - Loading lessons from JSON or TOML
//! - Grading choice, fill-in-the-blank, true/false, matching and ordering
//!   exercises
//! - Tracking a learner's first attempts, statistics and exported results
//! - Rendering exercises to HTML

pub mod error;
pub mod grade;
pub mod keyboard;
pub mod markdown;
pub mod order;
pub mod parser;
pub mod render;
pub mod results;
pub mod rng;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use grade::{Feedback, Mark, OptionMark, Verdict, is_answer_correct, normalize_answer};
pub use keyboard::{Shortcut, Target};
pub use order::{OrderState, OrderView, OrderWidget};
pub use parser::{LessonFormat, parse_lesson, parse_lesson_as};
pub use render::{render_exercise, render_feedback, render_lesson};
pub use results::{ExerciseStats, LessonResults, Score};
pub use rng::{TinyRng, shuffle};
pub use session::Session;
pub use types::exercise::{AnswerSet, Exercise, ExerciseBody, ExerciseKind};
pub use types::lesson::Lesson;
pub use types::timestamp::Timestamp;
