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

//! Exercise markup. The class names and `data-*` attributes written here are
//! what the browser side queries to find controls again, so they must not
//! change.

use maud::Markup;
use maud::html;

use crate::grade::Feedback;
use crate::grade::SolutionLabel;
use crate::markdown::inline;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::types::exercise::Exercise;
use crate::types::exercise::ExerciseBody;
use crate::types::lesson::Lesson;

/// Id of the element holding the rendered exercises on a lesson page.
pub const EXERCISES_ID: &str = "exercises";
/// Id of the element showing the running statistics.
pub const STATS_ID: &str = "lesson-stats";
/// Id of the button that resets the whole lesson.
pub const RESET_ALL_ID: &str = "reset-all";
/// Id of the script element carrying the lesson as JSON.
pub const LESSON_DATA_ID: &str = "lesson-data";

/// Render an exercise by its type. Unknown types are logged and render as
/// nothing, so one bad record does not take the lesson down.
pub fn render_exercise(exercise: &Exercise, index: usize, rng: &mut TinyRng) -> Markup {
    match exercise.body() {
        ExerciseBody::Choice {
            sentence, options, ..
        } => render_choice(exercise, index, sentence, options),
        ExerciseBody::Fill { sentence, .. } => render_fill(exercise, index, sentence),
        ExerciseBody::TrueFalse { sentence, .. } => render_true_false(exercise, index, sentence),
        ExerciseBody::Match {
            sentence, options, ..
        } => render_match(exercise, index, sentence, options),
        ExerciseBody::Order { words, .. } => render_order(exercise, index, &shuffle(words, rng)),
        ExerciseBody::Unknown { tag } => {
            log::error!("Unknown exercise type: {tag}");
            html! {}
        }
    }
}

/// Render every exercise of a lesson, in order.
pub fn render_lesson(lesson: &Lesson, rng: &mut TinyRng) -> Markup {
    html! {
        @for (idx, exercise) in lesson.exercises().iter().enumerate() {
            (render_exercise(exercise, idx, rng))
        }
    }
}

pub fn render_choice(exercise: &Exercise, index: usize, sentence: &str, options: &[String]) -> Markup {
    html! {
        div.exercise data-exercise-index=(index) {
            div.exercise-instruction { (exercise.instruction()) }
            div.exercise-sentence { (inline(sentence)) }
            div.exercise-options {
                @for option in options {
                    button.option-btn type="button" data-value=(option) { (option) }
                }
            }
            div.exercise-feedback {}
        }
    }
}

pub fn render_fill(exercise: &Exercise, index: usize, sentence: &str) -> Markup {
    let parts: Vec<&str> = sentence.split("___").collect();
    let blanks = parts.len() - 1;
    html! {
        div.exercise data-exercise-index=(index) {
            div.exercise-instruction { (exercise.instruction()) }
            div.exercise-sentence {
                @for (i, part) in parts.iter().enumerate() {
                    span.sentence-part { (inline(part.trim())) }
                    @if i < blanks {
                        " "
                        input.fill-input type="text" placeholder="___";
                        " "
                    }
                }
            }
            button.check-btn type="button" { "Prüfen" }
            div.exercise-feedback {}
        }
    }
}

pub fn render_true_false(exercise: &Exercise, index: usize, sentence: &str) -> Markup {
    html! {
        div.exercise data-exercise-index=(index) {
            div.exercise-instruction { (exercise.instruction()) }
            div.exercise-sentence { (inline(sentence)) }
            div.exercise-options.tf-options {
                button.option-btn.tf-btn type="button" data-value="richtig" {
                    span.tf-icon { "✓" }
                    span.tf-label { "Richtig" }
                }
                button.option-btn.tf-btn type="button" data-value="falsch" {
                    span.tf-icon { "✗" }
                    span.tf-label { "Falsch" }
                }
            }
            div.exercise-feedback {}
        }
    }
}

pub fn render_match(exercise: &Exercise, index: usize, sentence: &str, options: &[String]) -> Markup {
    html! {
        div.exercise.matching-exercise data-exercise-index=(index) {
            div.exercise-instruction { (exercise.instruction()) }
            div.matching-container {
                div.match-left {
                    div.match-item { (inline(sentence)) }
                }
                div.match-right {
                    @for option in options {
                        button.match-option type="button" data-value=(option) { (option) }
                    }
                }
            }
            div.exercise-feedback {}
        }
    }
}

/// Render an ordering exercise with its words already scrambled.
pub fn render_order(exercise: &Exercise, index: usize, scrambled: &[String]) -> Markup {
    html! {
        div.exercise.ordering-exercise data-exercise-index=(index) {
            div.exercise-instruction { (exercise.instruction()) }
            div.order-hint { "Klicken Sie die Wörter in der richtigen Reihenfolge an:" }
            div.order-words {
                @for (i, word) in scrambled.iter().enumerate() {
                    button.word-btn type="button" data-word=(word) data-index=(i) { (word) }
                }
            }
            div.order-result {
                div.result-label { "Ihre Antwort:" }
                div.result-sentence {}
            }
            button.check-btn type="button" disabled { "Prüfen" }
            button.reset-btn type="button" { "Zurücksetzen" }
            div.exercise-feedback {}
        }
    }
}

/// The contents of an `.exercise-feedback` element.
pub fn render_feedback(feedback: &Feedback) -> Markup {
    html! {
        (feedback.headline())
        @if let Some(solution) = &feedback.solution {
            " " (solution.label.text()) ": "
            @if solution.label == SolutionLabel::Sequence {
                strong { (solution.text) }
            } @else {
                (solution.text)
            }
            "."
        }
        @if let Some(explanation) = &feedback.explanation {
            " " (explanation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Solution;
    use crate::types::exercise::AnswerSet;

    fn rng() -> TinyRng {
        TinyRng::from_seed(3)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let ex = Exercise::new(ExerciseBody::Unknown {
            tag: "essay".to_string(),
        });
        assert_eq!(render_exercise(&ex, 0, &mut rng()).into_string(), "");
    }

    #[test]
    fn test_choice_markup() {
        let ex = Exercise::new(ExerciseBody::Choice {
            sentence: "___ ich klein war".to_string(),
            options: strings(&["als", "wenn"]),
            answer: "als".to_string(),
        });
        let html = render_exercise(&ex, 2, &mut rng()).into_string();
        assert!(html.starts_with(r#"<div class="exercise" data-exercise-index="2">"#));
        assert!(html.contains(r#"<div class="exercise-instruction">Kreuzen Sie an</div>"#));
        assert!(html.contains(r#"<button class="option-btn" type="button" data-value="wenn">wenn</button>"#));
        assert!(html.contains(r#"<div class="exercise-feedback"></div>"#));
    }

    #[test]
    fn test_fill_has_input_per_blank() {
        let ex = Exercise::new(ExerciseBody::Fill {
            sentence: "Ich ___ nach ___.".to_string(),
            answers: AnswerSet::single("gehe"),
        })
        .with_instruction("Ergänzen Sie das Verb");
        let html = render_exercise(&ex, 0, &mut rng()).into_string();
        assert_eq!(html.matches(r#"class="fill-input""#).count(), 2);
        assert_eq!(html.matches(r#"class="sentence-part""#).count(), 3);
        assert!(html.contains("Ergänzen Sie das Verb"));
        assert!(html.contains(r#"<button class="check-btn" type="button">Prüfen</button>"#));
    }

    #[test]
    fn test_true_false_slots() {
        let ex = Exercise::new(ExerciseBody::TrueFalse {
            sentence: "Berlin ist groß.".to_string(),
            answer: "richtig".to_string(),
        });
        let html = render_exercise(&ex, 1, &mut rng()).into_string();
        assert!(html.contains(r#"class="option-btn tf-btn" type="button" data-value="richtig""#));
        assert!(html.contains(r#"class="option-btn tf-btn" type="button" data-value="falsch""#));
        assert!(html.contains("Richtig oder falsch?"));
    }

    #[test]
    fn test_match_markup() {
        let ex = Exercise::new(ExerciseBody::Match {
            sentence: "der Hund".to_string(),
            options: strings(&["dog", "cat"]),
            answer: "dog".to_string(),
        });
        let html = render_exercise(&ex, 0, &mut rng()).into_string();
        assert!(html.contains(r#"<div class="exercise matching-exercise" data-exercise-index="0">"#));
        assert!(html.contains(r#"<div class="match-item">der Hund</div>"#));
        assert!(html.contains(r#"<button class="match-option" type="button" data-value="cat">cat</button>"#));
    }

    #[test]
    fn test_order_renders_every_word_once() {
        let words = strings(&["Ich", "gehe", "nach", "Hause"]);
        let ex = Exercise::new(ExerciseBody::Order {
            words: words.clone(),
            answer: words.clone(),
        });
        let html = render_exercise(&ex, 0, &mut rng()).into_string();
        for word in &words {
            assert_eq!(html.matches(&format!(r#"data-word="{word}""#)).count(), 1);
        }
        for i in 0..4 {
            assert!(html.contains(&format!(r#"data-index="{i}""#)));
        }
        assert!(html.contains(r#"<button class="check-btn" type="button" disabled>Prüfen</button>"#));
        assert!(html.contains(r#"<div class="result-sentence"></div>"#));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let ex = Exercise::new(ExerciseBody::Choice {
            sentence: "x".to_string(),
            options: strings(&["\"quoted\""]),
            answer: "x".to_string(),
        });
        let html = render_exercise(&ex, 0, &mut rng()).into_string();
        assert!(html.contains(r#"data-value="&quot;quoted&quot;""#));
    }

    #[test]
    fn test_lesson_skips_unknown_exercises() {
        let lesson = Lesson::new(
            1,
            "Test",
            vec![
                Exercise::new(ExerciseBody::Unknown {
                    tag: "essay".to_string(),
                }),
                Exercise::new(ExerciseBody::TrueFalse {
                    sentence: "Ja.".to_string(),
                    answer: "richtig".to_string(),
                }),
            ],
        );
        let html = render_lesson(&lesson, &mut rng()).into_string();
        assert_eq!(html.matches(r#"class="exercise""#).count(), 1);
        assert!(html.contains(r#"data-exercise-index="1""#));
    }

    #[test]
    fn test_sequence_feedback_is_emphasised() {
        let feedback = Feedback {
            correct: false,
            solution: Some(Solution {
                label: SolutionLabel::Sequence,
                text: "Ich gehe nach Hause".to_string(),
            }),
            explanation: Some("Verb an Position 2.".to_string()),
        };
        assert_eq!(
            render_feedback(&feedback).into_string(),
            "✗ Leider falsch. Richtige Reihenfolge: <strong>Ich gehe nach Hause</strong>. Verb an Position 2."
        );
    }

    #[test]
    fn test_correct_feedback_without_explanation() {
        let feedback = Feedback {
            correct: true,
            solution: None,
            explanation: None,
        };
        assert_eq!(render_feedback(&feedback).into_string(), "✓ Richtig!");
    }

    fn choice_sentence(sentence: &str) -> String {
        let ex = Exercise::new(ExerciseBody::Choice {
            sentence: sentence.to_string(),
            options: strings(&["als", "wenn"]),
            answer: "als".to_string(),
        });
        render_exercise(&ex, 0, &mut rng()).into_string()
    }

    #[test]
    fn test_dated_prompt_stays_a_sentence() {
        let html = choice_sentence("3. Oktober ist der Nationalfeiertag.");
        assert!(html.contains(
            r#"<div class="exercise-sentence">3. Oktober ist der Nationalfeiertag.</div>"#
        ));
        assert!(!html.contains("<ol"));
    }

    #[test]
    fn test_dialogue_prompt_stays_a_sentence() {
        let html = choice_sentence("- Wie geht es dir? - ___ gut.");
        assert!(html.contains(
            r#"<div class="exercise-sentence">- Wie geht es dir? - ___ gut.</div>"#
        ));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_bare_blank_prompt() {
        let html = choice_sentence("___");
        assert!(html.contains(r#"<div class="exercise-sentence">___</div>"#));
        assert!(!html.contains("<hr"));
    }

    #[test]
    fn test_fill_part_with_leading_number() {
        let ex = Exercise::new(ExerciseBody::Fill {
            sentence: "1. ___ ist der erste Tag.".to_string(),
            answers: AnswerSet::single("Montag"),
        });
        let html = render_exercise(&ex, 0, &mut rng()).into_string();
        assert!(html.contains(r#"<span class="sentence-part">1.</span>"#));
        assert!(!html.contains("<ol"));
    }
}
