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

//! Lesson files. A lesson is written either as JSON or as TOML, with the same
//! shape in both:
//!
//! ```toml
//! number = 4
//! title = "Temporale Nebensätze"
//!
//! [[exercises]]
//! type = "choice"
//! sentence = "___ ich klein war, wohnten wir in Köln."
//! options = ["als", "wenn"]
//! answer = "als"
//! explain = "Einmalige Vergangenheit: als."
//! ```

use std::path::Path;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::lesson::Lesson;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LessonFormat {
    Json,
    Toml,
}

impl LessonFormat {
    /// Guess the format from a file name's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(LessonFormat::Json),
            "toml" => Some(LessonFormat::Toml),
            _ => None,
        }
    }
}

/// Parse a lesson file's content. The format is chosen by the file name.
pub fn parse_lesson(filename: &str, text: &str) -> Fallible<Lesson> {
    match LessonFormat::from_path(filename) {
        Some(format) => parse_lesson_as(format, text)
            .map_err(|e| ErrorReport::new(format!("{filename}: {}", e.message()))),
        None => fail(format!(
            "{filename}: unsupported lesson file (expected .json or .toml)"
        )),
    }
}

pub fn parse_lesson_as(format: LessonFormat, text: &str) -> Fallible<Lesson> {
    let lesson = match format {
        LessonFormat::Json => serde_json::from_str(text)?,
        LessonFormat::Toml => toml::from_str(text)?,
    };
    Ok(lesson)
}
