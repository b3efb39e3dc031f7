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

//! State of an ordering exercise. The learner clicks the scrambled words one
//! by one to build a sentence, may start over, and finally checks it.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Building,
    Checked,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderWidget {
    /// One flag per word control, in display order.
    used: Vec<bool>,
    selected: Vec<String>,
    state: OrderState,
}

/// What the page should show for an ordering exercise.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderView {
    pub index: usize,
    /// The assembled sentence so far.
    pub preview: String,
    /// Per word control: has it been used.
    pub used: Vec<bool>,
    pub can_check: bool,
    pub state: OrderState,
}

impl OrderWidget {
    pub fn new(word_count: usize) -> Self {
        Self {
            used: vec![false; word_count],
            selected: Vec::new(),
            state: OrderState::Building,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.state == OrderState::Checked
    }

    pub fn selection(&self) -> &[String] {
        &self.selected
    }

    /// Checking is allowed once every word has been placed.
    pub fn can_check(&self) -> bool {
        !self.is_checked() && self.selected.len() == self.used.len()
    }

    /// Append the word on control `slot`. The word is taken from the control's
    /// label, so identical words on different controls are interchangeable.
    /// Ignored once checked, for a used slot, or for a slot out of range.
    pub fn select(&mut self, slot: usize, word: &str) {
        if self.is_checked() {
            return;
        }
        match self.used.get_mut(slot) {
            Some(used) if !*used => {
                *used = true;
                self.selected.push(word.to_string());
            }
            _ => {}
        }
    }

    /// Start over. Ignored once checked.
    pub fn reset(&mut self) {
        if self.is_checked() {
            return;
        }
        self.selected.clear();
        self.used.iter_mut().for_each(|used| *used = false);
    }

    pub fn check(&mut self) {
        self.state = OrderState::Checked;
    }

    pub fn view(&self, index: usize) -> OrderView {
        OrderView {
            index,
            preview: self.selected.join(" "),
            used: self.used.clone(),
            can_check: self.can_check(),
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_enabled_only_when_complete() {
        let mut widget = OrderWidget::new(3);
        widget.select(2, "Ich");
        widget.select(0, "gehe");
        assert!(!widget.can_check());
        widget.select(1, "heim");
        assert!(widget.can_check());
        assert_eq!(widget.view(0).preview, "Ich gehe heim");
    }

    #[test]
    fn test_used_slot_is_ignored() {
        let mut widget = OrderWidget::new(2);
        widget.select(0, "Ich");
        widget.select(0, "Ich");
        assert_eq!(widget.selection(), ["Ich"]);
        assert_eq!(widget.view(0).used, vec![true, false]);
    }

    #[test]
    fn test_out_of_range_slot_is_ignored() {
        let mut widget = OrderWidget::new(1);
        widget.select(5, "x");
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut widget = OrderWidget::new(2);
        widget.select(1, "b");
        widget.reset();
        let view = widget.view(4);
        assert_eq!(view.preview, "");
        assert_eq!(view.used, vec![false, false]);
        assert!(!view.can_check);
        assert_eq!(view.state, OrderState::Building);
    }

    #[test]
    fn test_checked_is_final() {
        let mut widget = OrderWidget::new(2);
        widget.select(0, "a");
        widget.select(1, "b");
        widget.check();
        widget.reset();
        widget.select(0, "c");
        assert_eq!(widget.selection(), ["a", "b"]);
        assert!(widget.is_checked());
        assert!(!widget.can_check());
    }

    #[test]
    fn test_duplicate_words_are_interchangeable() {
        let mut first = OrderWidget::new(3);
        first.select(0, "die");
        first.select(2, "die");
        first.select(1, "Katze");
        let mut second = OrderWidget::new(3);
        second.select(2, "die");
        second.select(0, "die");
        second.select(1, "Katze");
        assert_eq!(first.selection(), second.selection());
    }
}
