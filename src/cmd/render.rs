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

use std::fs::write;

use uebungen_core::ErrorReport;
use uebungen_core::Fallible;
use uebungen_core::TinyRng;

use crate::cmd::serve::template::PageAssets;
use crate::cmd::serve::template::lesson_page;
use crate::utils::clock_seed;
use crate::utils::read_lesson;

/// Render a lesson to a self-contained page: the stylesheet is inlined and
/// no script is attached, so the exercises are shown but not interactive.
pub fn render_page(lesson_path: &str, output: Option<String>, seed: Option<u64>) -> Fallible<()> {
    let html = render_to_string(lesson_path, seed)?;
    match output {
        Some(output) => {
            write(&output, html)
                .map_err(|e| ErrorReport::new(format!("failed to write {output}: {e}")))?;
            log::info!("Wrote {output}");
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn render_to_string(lesson_path: &str, seed: Option<u64>) -> Fallible<String> {
    let lesson = read_lesson(lesson_path)?;
    let mut rng = TinyRng::from_seed(seed.unwrap_or_else(clock_seed));
    let assets = PageAssets {
        inline_style: true,
        script: None,
    };
    Ok(lesson_page(&lesson, &mut rng, &assets)?.into_string())
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use tempfile::tempdir;

    use super::*;

    const LESSON: &str = r#"
number = 7
title = "Satzbau"

[[exercises]]
type = "order"
sentence = ["gestern", "Ich", "war", "krank"]
answer = ["Ich", "war", "gestern", "krank"]

[[exercises]]
type = "truefalse"
sentence = "Das Verb steht an zweiter Stelle."
answer = "richtig"
"#;

    #[test]
    fn test_render_page_to_file() -> Fallible<()> {
        let dir = tempdir()?;
        let lesson = dir.path().join("lesson-07.toml");
        std::fs::write(&lesson, LESSON)?;
        let output = dir.path().join("lesson-07.html");
        render_page(
            &lesson.display().to_string(),
            Some(output.display().to_string()),
            Some(42),
        )?;
        let html = read_to_string(&output)?;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Lektion 7: Satzbau</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains(r#"class="exercise ordering-exercise" data-exercise-index="0""#));
        assert!(html.contains(r#"data-exercise-index="1""#));
        assert!(!html.contains(r#"id="reset-all""#));
        assert!(!html.contains(r#"id="lesson-stats""#));
        Ok(())
    }

    #[test]
    fn test_same_seed_same_page() -> Fallible<()> {
        let dir = tempdir()?;
        let lesson = dir.path().join("lesson-07.toml");
        std::fs::write(&lesson, LESSON)?;
        let path = lesson.display().to_string();
        assert_eq!(
            render_to_string(&path, Some(9))?,
            render_to_string(&path, Some(9))?
        );
        Ok(())
    }

    #[test]
    fn test_render_missing_lesson() -> Fallible<()> {
        let result = render_page("./nope.toml", None, Some(1));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: lesson file does not exist: ./nope.toml".to_string())
        );
        Ok(())
    }
}
