/*!
 * Databend REPL helper
 *
 * Wires the suggestion engine into rustyline: tab completion, inline hints,
 * keyword highlighting and bracket validation.
 */

use super::engine::SuggestionEngine;
use super::keywords::keywords;
use super::metadata::SessionMetadata;
use regex::Regex;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::{self, MatchingBracketValidator, Validator};
use rustyline::Context;
use std::borrow::Cow;
use std::sync::{Arc, Mutex};

const MAX_CANDIDATES: usize = 15;

pub struct DatabendCompleter {
    suggestion_engine: SuggestionEngine,
}

impl DatabendCompleter {
    pub fn with_metadata(metadata: Arc<Mutex<SessionMetadata>>) -> Self {
        Self {
            suggestion_engine: SuggestionEngine::new(metadata),
        }
    }

    /// Start of the word under the cursor
    fn get_word_start(&self, line: &str, pos: usize) -> usize {
        line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == ',' || c == ';')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn set_current_database(&self, database: Option<String>) {
        self.suggestion_engine.set_current_database(database);
    }
}

impl Completer for DatabendCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let start = self.get_word_start(line, pos);
        let word = &line[start..pos];

        let completions = self
            .suggestion_engine
            .get_suggestions(&line[..pos], word)
            .into_iter()
            .take(MAX_CANDIDATES)
            .map(|suggestion| Pair {
                display: suggestion.format_display(),
                replacement: suggestion.text,
            })
            .collect();

        Ok((start, completions))
    }
}

/// Databend Helper (integrating all functionality)
pub struct DatabendHelper {
    completer: DatabendCompleter,
    highlighter: MatchingBracketHighlighter,
    validator: MatchingBracketValidator,
    hinter: HistoryHinter,
    keyword_pattern: Option<Regex>,
}

impl DatabendHelper {
    pub fn with_metadata(metadata: Arc<Mutex<SessionMetadata>>) -> Self {
        Self {
            completer: DatabendCompleter::with_metadata(metadata),
            highlighter: MatchingBracketHighlighter::new(),
            validator: MatchingBracketValidator::new(),
            hinter: HistoryHinter::new(),
            keyword_pattern: reserved_keyword_pattern(),
        }
    }

    pub fn set_current_database(&self, database: Option<String>) {
        self.completer.set_current_database(database);
    }
}

/// One case-insensitive alternation over the reserved keywords
fn reserved_keyword_pattern() -> Option<Regex> {
    let table = keywords().ok()?;
    let alternatives: Vec<String> = table
        .iter()
        .filter(|k| k.is_reserved())
        .map(|k| regex::escape(&k.name))
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).ok()
}

impl Completer for DatabendHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for DatabendHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if let Some(history_hint) = self.hinter.hint(line, pos, ctx) {
            return Some(history_hint);
        }

        let start = self.completer.get_word_start(line, pos);
        let word = &line[start..pos];
        if word.is_empty() {
            return None;
        }

        // Only the untyped tail of the best prefix match
        let suggestions = self.completer.suggestion_engine.get_suggestions(&line[..pos], word);
        let top = suggestions.first()?;
        let tail = top
            .text
            .get(..word.len())
            .filter(|head| head.eq_ignore_ascii_case(word))
            .map(|_| &top.text[word.len()..])?;
        (!tail.is_empty()).then(|| tail.to_string())
    }
}

impl Highlighter for DatabendHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match &self.keyword_pattern {
            Some(re) => re.replace_all(line, "\x1b[1m$0\x1b[0m"),
            None => Cow::Borrowed(line),
        }
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Borrowed(prompt)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced) || self.keyword_pattern.is_some()
    }
}

impl Validator for DatabendHelper {
    fn validate(
        &self,
        ctx: &mut validate::ValidationContext,
    ) -> Result<validate::ValidationResult, ReadlineError> {
        self.validator.validate(ctx)
    }

    fn validate_while_typing(&self) -> bool {
        self.validator.validate_while_typing()
    }
}

impl rustyline::Helper for DatabendHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_highlighting() {
        let helper = DatabendHelper::with_metadata(Arc::new(Mutex::new(SessionMetadata::new())));
        let highlighted = helper.highlight("select 1 from t", 0);
        assert_eq!(highlighted, "\x1b[1mselect\x1b[0m 1 \x1b[1mfrom\x1b[0m t");
    }

    #[test]
    fn test_word_start() {
        let completer = DatabendCompleter::with_metadata(Arc::new(Mutex::new(SessionMetadata::new())));
        assert_eq!(completer.get_word_start("SELECT count(us", 15), 13);
        assert_eq!(completer.get_word_start("sel", 3), 0);
        assert_eq!(completer.get_word_start("FROM db.sch", 11), 5);
    }
}
