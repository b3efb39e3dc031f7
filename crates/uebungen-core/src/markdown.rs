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

use maud::Markup;
use maud::PreEscaped;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::html::push_html;

/// Convert Markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut html_output: String = String::new();
    push_html(&mut html_output, parser);
    html_output
}

/// Backslash-escape a marker at the start of a line that would open a list,
/// heading, quote, rule or fence, or underline the previous line. Emphasis at
/// the start of a line is kept.
fn escape_block_marker(line: &str) -> String {
    let line = line.trim_start();
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let (number, rest) = line.split_at(digits);
        if rest.starts_with('.') || rest.starts_with(')') {
            return format!("{number}\\{rest}");
        }
        return line.to_string();
    }
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let list_marker = matches!(first, '-' | '+' | '*')
        && chars.next().is_none_or(|c| c == ' ' || c == '\t');
    let uniform = line.chars().filter(|c| !c.is_whitespace()).all(|c| c == first);
    let rule = matches!(first, '-' | '*' | '_')
        && uniform
        && line.chars().filter(|&c| c == first).count() >= 3;
    let underline = matches!(first, '=' | '-') && uniform;
    let fence = line.starts_with("```") || line.starts_with("~~~");
    if list_marker || rule || underline || fence || matches!(first, '#' | '>') {
        format!("\\{line}")
    } else {
        line.to_string()
    }
}

/// Convert Markdown to HTML, dropping the paragraph wrapper around a single
/// line of text. Block syntax is not interpreted, so `3. Oktober` stays a
/// sentence rather than becoming a list.
pub fn markdown_to_html_inline(markdown: &str) -> String {
    let escaped: Vec<String> = markdown.lines().map(escape_block_marker).collect();
    let text = markdown_to_html(&escaped.join("\n"));
    if text.starts_with("<p>") && text.ends_with("</p>\n") {
        let len = text.len();
        text[3..len - 5].to_string()
    } else {
        text
    }
}

/// Inline Markdown as markup, for prompts and sentence fragments.
pub fn inline(markdown: &str) -> Markup {
    PreEscaped(markdown_to_html_inline(markdown))
}
