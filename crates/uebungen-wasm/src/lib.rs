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

//! WASM bindings for uebungen - runs the exercise widgets in the browser.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use web_sys::Event;
use web_sys::KeyboardEvent;
use web_sys::console;

use uebungen_core::ErrorReport;
use uebungen_core::ExerciseKind;
use uebungen_core::LessonFormat;
use uebungen_core::Session;
use uebungen_core::Shortcut;
use uebungen_core::Timestamp;
use uebungen_core::TinyRng;
use uebungen_core::Verdict;
use uebungen_core::parse_lesson_as;
use uebungen_core::render::EXERCISES_ID;
use uebungen_core::render::RESET_ALL_ID;

mod dom;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"uebungen WASM initialized".into());
}

fn js_error(e: ErrorReport) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => js_sys::Date::now() as u64,
    }
}

/// The exercise page's state, driven from JavaScript.
#[wasm_bindgen]
pub struct ExerciseApp {
    /// The loaded lesson and the learner's answers
    session: Option<Session>,
    /// Scrambles ordering exercises on every render
    rng: TinyRng,
}

#[wasm_bindgen]
impl ExerciseApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: None,
            rng: TinyRng::from_seed(seed()),
        }
    }

    /// Load a lesson from its JSON form. Returns the number of exercises.
    #[wasm_bindgen]
    pub fn load_lesson(&mut self, lesson_json: &str) -> Result<usize, JsValue> {
        let lesson = parse_lesson_as(LessonFormat::Json, lesson_json).map_err(js_error)?;
        let count = lesson.len();
        self.session = Some(Session::new(lesson));
        Ok(count)
    }

    /// Render all exercises as HTML.
    #[wasm_bindgen]
    pub fn render_lesson(&mut self) -> Result<String, JsValue> {
        let session = self.session.as_ref().ok_or_else(no_lesson)?;
        Ok(session.render_lesson(&mut self.rng).into_string())
    }

    /// Set up widget state for exercises already on the page.
    #[wasm_bindgen]
    pub fn initialize_exercises(&mut self) -> Result<(), JsValue> {
        self.session_mut()?.initialize_exercises();
        dom::update_stats(&self.session_mut()?.stats())
    }

    /// Render the lesson into the exercises container and initialize it.
    #[wasm_bindgen]
    pub fn mount(&mut self) -> Result<(), JsValue> {
        let html = self.render_lesson()?;
        exercises_container()?.set_inner_html(&html);
        self.initialize_exercises()
    }

    /// Route a click anywhere on the page to the right exercise handler.
    #[wasm_bindgen]
    pub fn handle_click(&mut self, event: Event) -> Result<(), JsValue> {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return Ok(());
        };
        if target.closest(&format!("#{RESET_ALL_ID}"))?.is_some() {
            return self.reset_all();
        }
        match target.closest("button")? {
            Some(control) => self.activate(&control),
            None => Ok(()),
        }
    }

    /// Keyboard shortcuts: 1-4 pick an option, r/f answer true/false, Enter
    /// checks. Letters and digits are ignored while typing into a blank.
    #[wasm_bindgen]
    pub fn handle_key(&mut self, event: KeyboardEvent) -> Result<(), JsValue> {
        let Some(shortcut) = Shortcut::from_key(&event.key()) else {
            return Ok(());
        };
        let typing = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|el| el.closest(".fill-input").ok().flatten().is_some())
            .unwrap_or(false);
        if typing && shortcut != Shortcut::Submit {
            return Ok(());
        }
        for control in dom::shortcut_targets(shortcut)? {
            self.activate(&control)?;
        }
        Ok(())
    }

    #[wasm_bindgen]
    pub fn handle_choice(&mut self, index: usize, selected: &str) -> Result<(), JsValue> {
        let verdict = self
            .session_mut()?
            .answer_choice(index, selected)
            .map_err(js_error)?;
        self.show(ExerciseKind::Choice, &verdict)
    }

    #[wasm_bindgen]
    pub fn handle_fill(&mut self, index: usize) -> Result<(), JsValue> {
        let input = dom::fill_input_value(index)?;
        let verdict = self
            .session_mut()?
            .answer_fill(index, &input)
            .map_err(js_error)?;
        self.show(ExerciseKind::Fill, &verdict)
    }

    #[wasm_bindgen]
    pub fn handle_match(&mut self, index: usize, selected: &str) -> Result<(), JsValue> {
        let verdict = self
            .session_mut()?
            .answer_match(index, selected)
            .map_err(js_error)?;
        self.show(ExerciseKind::Match, &verdict)
    }

    #[wasm_bindgen]
    pub fn handle_true_false(&mut self, index: usize, selected: &str) -> Result<(), JsValue> {
        let verdict = self
            .session_mut()?
            .answer_true_false(index, selected)
            .map_err(js_error)?;
        self.show(ExerciseKind::TrueFalse, &verdict)
    }

    #[wasm_bindgen]
    pub fn handle_order_word(&mut self, index: usize, slot: usize, word: &str) -> Result<(), JsValue> {
        let view = self
            .session_mut()?
            .select_word(index, slot, word)
            .map_err(js_error)?;
        dom::apply_order_view(&view)
    }

    #[wasm_bindgen]
    pub fn handle_order_reset(&mut self, index: usize) -> Result<(), JsValue> {
        let view = self
            .session_mut()?
            .reset_order(index)
            .map_err(js_error)?;
        dom::apply_order_view(&view)
    }

    #[wasm_bindgen]
    pub fn handle_order_check(&mut self, index: usize) -> Result<(), JsValue> {
        let verdict = self.session_mut()?.check_order(index).map_err(js_error)?;
        self.show(ExerciseKind::Order, &verdict)
    }

    /// Forget all answers and render the lesson again.
    #[wasm_bindgen]
    pub fn reset_all(&mut self) -> Result<(), JsValue> {
        let session = self.session.as_mut().ok_or_else(no_lesson)?;
        let html = session.reset_all_exercises(&mut self.rng).into_string();
        exercises_container()?.set_inner_html(&html);
        dom::update_stats(&session.stats())
    }

    /// Current statistics as JSON.
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<String, JsValue> {
        let session = self.session.as_ref().ok_or_else(no_lesson)?;
        serde_json::to_string(&session.stats())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize stats: {}", e)))
    }

    /// Snapshot of the lesson's results as JSON.
    #[wasm_bindgen]
    pub fn export_results(&self) -> Result<String, JsValue> {
        let session = self.session.as_ref().ok_or_else(no_lesson)?;
        let now = Timestamp::try_from(String::from(js_sys::Date::new_0().to_iso_string()))
            .map_err(js_error)?;
        serde_json::to_string(&session.export_results(now))
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize results: {}", e)))
    }

    // Private helper methods

    fn session_mut(&mut self) -> Result<&mut Session, JsValue> {
        self.session.as_mut().ok_or_else(no_lesson)
    }

    fn show(&mut self, kind: ExerciseKind, verdict: &Verdict) -> Result<(), JsValue> {
        dom::apply_verdict(kind, verdict)?;
        dom::update_stats(&self.session_mut()?.stats())
    }

    /// Dispatch a control of an exercise to its handler.
    fn activate(&mut self, control: &Element) -> Result<(), JsValue> {
        let Some(index) = dom::exercise_index(control)? else {
            return Ok(());
        };
        let kind = self
            .session
            .as_ref()
            .and_then(|s| s.lesson().exercise(index))
            .and_then(|ex| ex.kind());
        let Some(kind) = kind else {
            return Ok(());
        };
        let classes = control.class_list();
        let value = control.get_attribute("data-value").unwrap_or_default();
        match kind {
            ExerciseKind::Choice if classes.contains("option-btn") => self.handle_choice(index, &value),
            ExerciseKind::TrueFalse if classes.contains("tf-btn") => {
                self.handle_true_false(index, &value)
            }
            ExerciseKind::Match if classes.contains("match-option") => self.handle_match(index, &value),
            ExerciseKind::Fill if classes.contains("check-btn") => self.handle_fill(index),
            ExerciseKind::Order if classes.contains("word-btn") => {
                let word = control.get_attribute("data-word").unwrap_or_default();
                let slot = control
                    .get_attribute("data-index")
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| JsValue::from_str("Word control without data-index"))?;
                self.handle_order_word(index, slot, &word)
            }
            ExerciseKind::Order if classes.contains("reset-btn") => self.handle_order_reset(index),
            ExerciseKind::Order if classes.contains("check-btn") => self.handle_order_check(index),
            _ => Ok(()),
        }
    }
}

impl Default for ExerciseApp {
    fn default() -> Self {
        Self::new()
    }
}

fn no_lesson() -> JsValue {
    JsValue::from_str("No lesson loaded")
}

fn exercises_container() -> Result<Element, JsValue> {
    dom::document()?
        .get_element_by_id(EXERCISES_ID)
        .ok_or_else(|| JsValue::from_str(&format!("No #{EXERCISES_ID} element")))
}
