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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use uebungen_core::ErrorReport;
use uebungen_core::ExerciseBody;
use uebungen_core::Fallible;
use uebungen_core::LessonFormat;
use uebungen_core::fail;
use uebungen_core::parse_lesson;
use walkdir::WalkDir;

/// What a lesson file contains, as far as `check` cares.
#[derive(Debug)]
pub struct LessonReport {
    pub path: PathBuf,
    pub number: u32,
    pub title: String,
    pub exercises: usize,
    /// Positions and tags of exercises whose type isn't known. They parse,
    /// but render as nothing.
    pub unknown: Vec<(usize, String)>,
}

pub fn check_lessons(path: Option<String>) -> Fallible<()> {
    let root: PathBuf = match path {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };
    let files = lesson_files(&root)?;
    if files.is_empty() {
        log::warn!("No lesson files found in {}", root.display());
        return Ok(());
    }
    let mut failures = 0;
    for file in &files {
        match check_file(file) {
            Ok(report) => {
                println!(
                    "ok {}: Lektion {}: {} ({} exercises)",
                    report.path.display(),
                    report.number,
                    report.title,
                    report.exercises
                );
                for (idx, tag) in &report.unknown {
                    log::warn!(
                        "{}: exercise {} has unknown type {tag:?}",
                        report.path.display(),
                        idx + 1
                    );
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{e}");
            }
        }
    }
    if failures > 0 {
        return fail(format!(
            "{failures} of {} lesson files failed to parse.",
            files.len()
        ));
    }
    Ok(())
}

/// The lesson files under `root`, sorted by path. A file given directly is
/// checked whatever its extension.
fn lesson_files(root: &Path) -> Fallible<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return fail(format!("path does not exist: {}", root.display()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ErrorReport::new(e.to_string()))?;
        let path = entry.path();
        let is_lesson = path
            .to_str()
            .and_then(LessonFormat::from_path)
            .is_some();
        if path.is_file() && is_lesson {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn check_file(path: &Path) -> Fallible<LessonReport> {
    let name = path.display().to_string();
    let text = read_to_string(path)
        .map_err(|e| ErrorReport::new(format!("failed to read {name}: {e}")))?;
    let lesson = parse_lesson(&name, &text)?;
    let unknown = lesson
        .exercises()
        .iter()
        .enumerate()
        .filter_map(|(idx, exercise)| match exercise.body() {
            ExerciseBody::Unknown { tag } => Some((idx, tag.clone())),
            _ => None,
        })
        .collect();
    Ok(LessonReport {
        path: path.to_path_buf(),
        number: lesson.number(),
        title: lesson.title().to_string(),
        exercises: lesson.len(),
        unknown,
    })
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    const GOOD: &str = r#"{
        "number": 1,
        "title": "Artikel",
        "exercises": [
            {"type": "fill", "sentence": "Das ist ___ Hund.", "answer": "ein"},
            {"type": "cloze", "sentence": "?", "answer": "x"}
        ]
    }"#;

    #[test]
    fn test_check_file_reports_unknown_types() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lesson-01.json");
        write(&path, GOOD)?;
        let report = check_file(&path)?;
        assert_eq!(report.number, 1);
        assert_eq!(report.title, "Artikel");
        assert_eq!(report.exercises, 2);
        assert_eq!(report.unknown, vec![(1, "cloze".to_string())]);
        Ok(())
    }

    #[test]
    fn test_lesson_files_are_found_recursively() -> Fallible<()> {
        let dir = tempdir()?;
        create_dir_all(dir.path().join("b1"))?;
        write(dir.path().join("b1").join("lesson-02.toml"), "")?;
        write(dir.path().join("lesson-01.json"), "")?;
        write(dir.path().join("notes.md"), "")?;
        let files = lesson_files(dir.path())?;
        assert_eq!(
            files,
            vec![
                dir.path().join("b1").join("lesson-02.toml"),
                dir.path().join("lesson-01.json"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_check_lessons_fails_on_bad_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("good.json"), GOOD)?;
        write(
            dir.path().join("bad.toml"),
            "number = 2\ntitle = \"Kaputt\"\n[[exercises]]\ntype = \"choice\"\n",
        )?;
        let result = check_lessons(Some(dir.path().display().to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: 1 of 2 lesson files failed to parse.".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_check_lessons_on_missing_path() -> Fallible<()> {
        let result = check_lessons(Some("./no-such-lessons".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: path does not exist: ./no-such-lessons".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_check_lessons_on_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        check_lessons(Some(dir.path().display().to_string()))
    }
}
