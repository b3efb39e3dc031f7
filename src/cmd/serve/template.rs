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

use maud::DOCTYPE;
use maud::Markup;
use maud::PreEscaped;
use maud::html;
use uebungen_core::ExerciseStats;
use uebungen_core::Fallible;
use uebungen_core::Lesson;
use uebungen_core::TinyRng;
use uebungen_core::render::EXERCISES_ID;
use uebungen_core::render::LESSON_DATA_ID;
use uebungen_core::render::RESET_ALL_ID;
use uebungen_core::render::STATS_ID;
use uebungen_core::render_lesson;

pub const STYLE: &str = include_str!("style.css");

/// How a page pulls in its stylesheet and script.
pub struct PageAssets {
    /// Inline the stylesheet instead of linking `/style.css`.
    pub inline_style: bool,
    /// URL of the module script that boots the widgets, if any.
    pub script: Option<String>,
}

pub fn page_title(lesson: &Lesson) -> String {
    format!("Lektion {}: {}", lesson.number(), lesson.title())
}

/// A complete lesson page. The lesson itself is embedded as JSON so the
/// browser side can grade without another request.
pub fn lesson_page(lesson: &Lesson, rng: &mut TinyRng, assets: &PageAssets) -> Fallible<Markup> {
    let title = page_title(lesson);
    let stats = ExerciseStats::new(lesson.len(), &BTreeMap::new());
    // `</script>` inside the JSON would end the script element early.
    let lesson_json = serde_json::to_string(lesson)?.replace("</", "<\\/");
    Ok(html! {
        (DOCTYPE)
        html lang="de" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                @if assets.inline_style {
                    style { (PreEscaped(STYLE)) }
                } @else {
                    link rel="stylesheet" href="/style.css";
                }
            }
            body {
                div.root {
                    div.header {
                        h1 { (title) }
                        // Both only work once the script has booted.
                        @if assets.script.is_some() {
                            div.stats id=(STATS_ID) { (stats.summary()) }
                            button.reset-all id=(RESET_ALL_ID) type="button" { "Alle zurücksetzen" }
                        }
                    }
                    div.exercises id=(EXERCISES_ID) {
                        (render_lesson(lesson, rng))
                    }
                }
                script type="application/json" id=(LESSON_DATA_ID) { (PreEscaped(lesson_json)) }
                @if let Some(src) = &assets.script {
                    script type="module" src=(src) {}
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use uebungen_core::LessonFormat;
    use uebungen_core::parse_lesson_as;

    use super::*;

    #[test]
    fn test_page_embeds_escaped_lesson() -> Fallible<()> {
        let lesson = parse_lesson_as(
            LessonFormat::Json,
            r#"{"number": 2, "title": "Skripte", "exercises": [
                {"type": "truefalse", "sentence": "Ein </script> Tag.", "answer": "falsch"}
            ]}"#,
        )?;
        let assets = PageAssets {
            inline_style: true,
            script: None,
        };
        let html = lesson_page(&lesson, &mut TinyRng::from_seed(0), &assets)?.into_string();
        assert!(html.contains("<title>Lektion 2: Skripte</title>"));
        assert!(html.contains(r#"Ein <\/script> Tag."#));
        assert!(!html.contains(r#"id="lesson-stats""#));
        assert!(!html.contains(r#"id="reset-all""#));
        assert!(!html.contains(r#"<link rel="stylesheet""#));
        assert!(!html.contains(r#"type="module""#));
        Ok(())
    }

    #[test]
    fn test_served_page_links_assets() -> Fallible<()> {
        let lesson = Lesson::new(1, "Leer", Vec::new());
        let assets = PageAssets {
            inline_style: false,
            script: Some("/script.js".to_string()),
        };
        let html = lesson_page(&lesson, &mut TinyRng::from_seed(0), &assets)?.into_string();
        assert!(html.contains(r#"<link rel="stylesheet" href="/style.css">"#));
        assert!(html.contains(r#"<script type="module" src="/script.js"></script>"#));
        assert!(html.contains(r#"<div class="stats" id="lesson-stats">0 von 0 richtig (0 %)</div>"#));
        assert!(html.contains(r#"<button class="reset-all" id="reset-all" type="button">"#));
        Ok(())
    }
}
