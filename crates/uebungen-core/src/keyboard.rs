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

//! Keyboard shortcuts. These are conveniences layered on top of the click
//! handlers: a shortcut names which enabled control to click.

/// Which controls a shortcut acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The n-th (zero-based) matching control inside every exercise.
    NthInEachExercise(usize),
    /// The first matching control on the page.
    FirstOnPage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Keys `1` to `4`: pick that option.
    Option(usize),
    /// `r`: answer "richtig".
    Richtig,
    /// `f`: answer "falsch".
    Falsch,
    /// `Enter`: press the first enabled check button.
    Submit,
}

impl Shortcut {
    /// Map a `KeyboardEvent.key` value to a shortcut.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" | "2" | "3" | "4" => key.parse::<usize>().ok().map(|n| Shortcut::Option(n - 1)),
            "Enter" => Some(Shortcut::Submit),
            "r" | "R" => Some(Shortcut::Richtig),
            "f" | "F" => Some(Shortcut::Falsch),
            _ => None,
        }
    }

    /// CSS selector for the enabled controls this shortcut may click.
    pub fn selector(&self) -> &'static str {
        match self {
            Shortcut::Option(_) => ".option-btn:not(:disabled)",
            Shortcut::Richtig => ".tf-btn[data-value=\"richtig\"]:not(:disabled)",
            Shortcut::Falsch => ".tf-btn[data-value=\"falsch\"]:not(:disabled)",
            Shortcut::Submit => ".check-btn:not(:disabled)",
        }
    }

    pub fn target(&self) -> Target {
        match self {
            Shortcut::Option(n) => Target::NthInEachExercise(*n),
            Shortcut::Richtig | Shortcut::Falsch | Shortcut::Submit => Target::FirstOnPage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(Shortcut::from_key("1"), Some(Shortcut::Option(0)));
        assert_eq!(Shortcut::from_key("4"), Some(Shortcut::Option(3)));
        assert_eq!(Shortcut::from_key("5"), None);
        assert_eq!(Shortcut::from_key("0"), None);
    }

    #[test]
    fn test_letters_ignore_case() {
        assert_eq!(Shortcut::from_key("r"), Some(Shortcut::Richtig));
        assert_eq!(Shortcut::from_key("F"), Some(Shortcut::Falsch));
        assert_eq!(Shortcut::from_key("x"), None);
    }

    #[test]
    fn test_targets() {
        assert_eq!(
            Shortcut::Option(2).target(),
            Target::NthInEachExercise(2)
        );
        assert_eq!(Shortcut::Submit.target(), Target::FirstOnPage);
        assert_eq!(Shortcut::Submit.selector(), ".check-btn:not(:disabled)");
    }
}
