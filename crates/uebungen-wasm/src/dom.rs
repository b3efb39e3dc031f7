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

//! Applies grading results to the page. Everything here is lookup by the
//! class names and `data-*` attributes the core renderer writes.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;
use web_sys::Element;
use web_sys::HtmlButtonElement;
use web_sys::HtmlInputElement;
use web_sys::NodeList;

use uebungen_core::ExerciseKind;
use uebungen_core::ExerciseStats;
use uebungen_core::Mark;
use uebungen_core::OrderState;
use uebungen_core::OrderView;
use uebungen_core::Shortcut;
use uebungen_core::Target;
use uebungen_core::Verdict;
use uebungen_core::render::STATS_ID;
use uebungen_core::render_feedback;

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(root.query_selector_all(selector)?))
}

fn set_disabled(el: &Element, disabled: bool) {
    if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    }
}

pub fn exercise_element(index: usize) -> Result<Element, JsValue> {
    document()?
        .query_selector(&format!(".exercise[data-exercise-index=\"{index}\"]"))?
        .ok_or_else(|| JsValue::from_str(&format!("No element for exercise {index}")))
}

/// The parsed `data-exercise-index` of the exercise containing `el`.
pub fn exercise_index(el: &Element) -> Result<Option<usize>, JsValue> {
    let Some(exercise) = el.closest(".exercise")? else {
        return Ok(None);
    };
    Ok(exercise
        .get_attribute("data-exercise-index")
        .and_then(|s| s.parse().ok()))
}

/// Value of the first fill-in input of an exercise.
pub fn fill_input_value(index: usize) -> Result<String, JsValue> {
    let exercise = exercise_element(index)?;
    let input = exercise
        .query_selector(".fill-input")?
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("Exercise {index} has no input")))?;
    Ok(input.value())
}

fn option_selector(kind: ExerciseKind) -> Option<&'static str> {
    match kind {
        ExerciseKind::Choice => Some(".option-btn"),
        ExerciseKind::Match => Some(".match-option"),
        ExerciseKind::TrueFalse => Some(".tf-btn"),
        ExerciseKind::Fill | ExerciseKind::Order => None,
    }
}

pub fn apply_verdict(kind: ExerciseKind, verdict: &Verdict) -> Result<(), JsValue> {
    let exercise = exercise_element(verdict.index)?;
    let mark = Mark::from_correct(verdict.correct);

    match kind {
        ExerciseKind::Choice | ExerciseKind::Match | ExerciseKind::TrueFalse => {
            let selector = option_selector(kind).unwrap_or(".option-btn");
            for button in query_all(&exercise, selector)? {
                set_disabled(&button, true);
                let value = button.get_attribute("data-value").unwrap_or_default();
                let Some(option) = verdict.marks.iter().find(|m| m.value == value) else {
                    continue;
                };
                if option.selected {
                    button.class_list().add_1("selected")?;
                }
                if let Some(mark) = option.mark {
                    button.class_list().add_1(mark.class())?;
                }
            }
        }
        ExerciseKind::Fill => {
            let inputs = query_all(&exercise, ".fill-input")?;
            for input in &inputs {
                set_disabled(input, true);
            }
            if let Some(first) = inputs.first() {
                first.class_list().add_1(mark.class())?;
            }
            for button in query_all(&exercise, ".check-btn")? {
                set_disabled(&button, true);
            }
        }
        ExerciseKind::Order => {
            for control in query_all(&exercise, ".check-btn, .reset-btn, .word-btn")? {
                set_disabled(&control, true);
            }
            if let Some(result) = exercise.query_selector(".result-sentence")? {
                let class = if verdict.correct {
                    "correct-answer"
                } else {
                    "incorrect-answer"
                };
                result.class_list().add_1(class)?;
            }
        }
    }

    if let Some(feedback) = exercise.query_selector(".exercise-feedback")? {
        feedback.set_inner_html(&render_feedback(&verdict.feedback).into_string());
        feedback.class_list().add_2("show", mark.class())?;
    }
    Ok(())
}

pub fn apply_order_view(view: &OrderView) -> Result<(), JsValue> {
    let exercise = exercise_element(view.index)?;
    let checked = view.state == OrderState::Checked;
    for button in query_all(&exercise, ".word-btn")? {
        let used = button
            .get_attribute("data-index")
            .and_then(|s| s.parse::<usize>().ok())
            .and_then(|slot| view.used.get(slot).copied())
            .unwrap_or(false);
        button.class_list().toggle_with_force("selected", used)?;
        set_disabled(&button, used || checked);
    }
    if let Some(result) = exercise.query_selector(".result-sentence")? {
        result.set_text_content(Some(&view.preview));
    }
    if let Some(check) = exercise.query_selector(".check-btn")? {
        set_disabled(&check, !view.can_check);
    }
    Ok(())
}

pub fn update_stats(stats: &ExerciseStats) -> Result<(), JsValue> {
    if let Some(el) = document()?.get_element_by_id(STATS_ID) {
        el.set_text_content(Some(&stats.summary()));
    }
    Ok(())
}

/// The enabled controls a shortcut acts on.
pub fn shortcut_targets(shortcut: Shortcut) -> Result<Vec<Element>, JsValue> {
    let document = document()?;
    let targets = match shortcut.target() {
        Target::NthInEachExercise(n) => {
            let mut targets = Vec::new();
            for exercise in elements(document.query_selector_all(".exercise")?) {
                if let Some(button) = query_all(&exercise, shortcut.selector())?.into_iter().nth(n) {
                    targets.push(button);
                }
            }
            targets
        }
        Target::FirstOnPage => document
            .query_selector(shortcut.selector())?
            .into_iter()
            .collect(),
    };
    Ok(targets)
}
