//! Reduction of raw LaTeX fragments to countable prose.
//!
//! The reducer runs a fixed sequence of passes:
//!
//! 1. line comments (`%` to end of line, `\%` survives)
//! 2. environments from the policy skip set, matched by name with a stack of open names
//! 3. math spans: `$$...$$`, `$...$`, `\[...\]`, `\(...\)`
//! 4. commands, keeping or dropping braced arguments according to the policy
//! 5. stray braces, then whitespace tokenisation
//!
//! Every pass only deletes characters, so a reduced fragment never has more
//! whitespace-separated tokens than the raw one.

use crate::policy::{CommandAction, Policy};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::trace;

static RE_ENVIRONMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(begin|end)\{([^{}]*)\}").expect("valid environment regex"));
static RE_PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\r?\n").expect("valid paragraph regex"));

static DEFAULT_REDUCER: LazyLock<Reducer> = LazyLock::new(Reducer::default);

/// Counts prose words in `fragment` using the built-in policy.
#[must_use]
pub fn count_words(fragment: &str) -> usize {
    DEFAULT_REDUCER.count_words(fragment)
}

/// Countable tokens of already-reduced text: whitespace-separated runs with a letter or digit.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
}

#[derive(Clone, Debug, Default)]
/// Applies the reduction passes under a given [`Policy`].
pub struct Reducer {
    policy: Policy,
}

impl Reducer {
    #[must_use]
    /// Creates a reducer with a custom policy.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    #[must_use]
    /// The policy this reducer consults.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    #[must_use]
    /// Strips comments, skipped environments, math and commands from `fragment`.
    pub fn reduce(&self, fragment: &str) -> String {
        let text = strip_comments(fragment);
        let text = self.strip_environments(&text);
        let text = strip_math(&text);
        let text = self.strip_commands(&text);
        text.replace(['{', '}'], "")
    }

    #[must_use]
    /// Number of prose tokens left after reduction.
    pub fn count_words(&self, fragment: &str) -> usize {
        let reduced = self.reduce(fragment);
        let count = tokens(&reduced).count();
        trace!(raw_len = fragment.len(), count, "reduced fragment");
        count
    }

    fn strip_environments(&self, text: &str) -> String {
        let mut open: Vec<OpenEnvironment> = Vec::new();
        let mut spans = Vec::new();

        for caps in RE_ENVIRONMENT.captures_iter(text) {
            let (Some(whole), Some(verb), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if is_escaped(text, whole.start()) {
                continue;
            }
            let name = name.as_str().trim();

            if verb.as_str() == "begin" {
                if self.policy.skips(name) {
                    open.push(OpenEnvironment {
                        name,
                        start: whole.start(),
                        closed: Vec::new(),
                    });
                }
            } else if let Some(depth) = open.iter().rposition(|env| env.name == name) {
                // Closing an outer environment also closes anything left open inside it.
                let span = (open[depth].start, whole.end());
                open.truncate(depth);
                match open.last_mut() {
                    Some(parent) => parent.closed.push(span),
                    None => spans.push(span),
                }
            }
        }

        // An environment that never closes keeps its text, minus the ones closed inside it.
        spans.extend(open.into_iter().flat_map(|env| env.closed));

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        for (start, end) in spans {
            out.push_str(&text[copied..start]);
            copied = end;
        }
        out.push_str(&text[copied..]);
        out
    }

    fn strip_commands(&self, text: &str) -> String {
        let bytes = text.as_bytes();
        let groups = Groups::new(text);
        let mut out = String::with_capacity(text.len());
        // Closing braces of the preserved arguments being scanned, innermost last.
        let mut frames: Vec<usize> = Vec::new();
        let mut copied = 0;
        let mut i = 0;

        loop {
            let limit = frames.last().copied().unwrap_or(bytes.len());
            if i >= limit {
                out.push_str(&text[copied..limit]);
                let Some(close) = frames.pop() else {
                    break;
                };
                // Further arguments of the same command follow the closing brace.
                let outer = frames.last().copied().unwrap_or(bytes.len());
                i = groups.arguments(close + 1, outer, CommandAction::Preserve, &mut frames);
                copied = i;
                continue;
            }
            if bytes[i] != b'\\' {
                i += 1;
                continue;
            }

            let name_len = bytes[i + 1..limit]
                .iter()
                .take_while(|b| b.is_ascii_alphabetic())
                .count();

            if name_len == 0 {
                if bytes.get(i + 1) == Some(&b'\\') {
                    // Line break, with its optional star and spacing argument.
                    out.push_str(&text[copied..i]);
                    let mut pos = i + 2;
                    if pos < limit && bytes[pos] == b'*' {
                        pos += 1;
                    }
                    if pos < limit && bytes[pos] == b'[' {
                        if let Some(close) = groups.close_of(pos, limit) {
                            pos = close + 1;
                        }
                    }
                    copied = pos;
                    i = pos;
                } else {
                    // Control symbols such as `\%` or `\&` are literal text.
                    i += 2;
                }
                continue;
            }

            out.push_str(&text[copied..i]);
            let name = &text[i + 1..=i + name_len];
            let mut pos = i + 1 + name_len;
            if pos < limit && bytes[pos] == b'*' {
                pos += 1;
            }

            i = groups.arguments(pos, limit, self.policy.action(name), &mut frames);
            copied = i;
        }

        out
    }
}

/// A skipped environment whose `\end` has not been seen yet.
struct OpenEnvironment<'t> {
    name: &'t str,
    start: usize,
    /// Spans of environments opened and closed inside this one.
    closed: Vec<(usize, usize)>,
}

/// Matching `{}` and `[]` pairs of a text, found in one pass.
///
/// A pair's closing offset is the one a forward scan from its opening delimiter would find,
/// honouring nesting and escapes. Unclosed openers have no entry.
pub(crate) struct Groups {
    braces: HashMap<usize, usize>,
    brackets: HashMap<usize, usize>,
}

impl Groups {
    #[must_use]
    pub(crate) fn new(text: &str) -> Self {
        let mut braces = HashMap::new();
        let mut brackets = HashMap::new();
        let mut open_braces = Vec::new();
        let mut open_brackets = Vec::new();
        let mut escaped = false;

        for (i, &b) in text.as_bytes().iter().enumerate() {
            if escaped {
                escaped = false;
                continue;
            }
            match b {
                b'\\' => escaped = true,
                b'{' => open_braces.push(i),
                b'[' => open_brackets.push(i),
                b'}' => {
                    if let Some(open) = open_braces.pop() {
                        braces.insert(open, i);
                    }
                }
                b']' => {
                    if let Some(open) = open_brackets.pop() {
                        brackets.insert(open, i);
                    }
                }
                _ => {}
            }
        }

        Self { braces, brackets }
    }

    #[must_use]
    /// Offset of the delimiter closing the group opened at `open_at`, if it lies before `limit`.
    pub(crate) fn close_of(&self, open_at: usize, limit: usize) -> Option<usize> {
        self.braces
            .get(&open_at)
            .or_else(|| self.brackets.get(&open_at))
            .copied()
            .filter(|&close| close < limit)
    }

    /// Drops the `{...}` and `[...]` groups following a command, starting at `pos`.
    ///
    /// The first braced group of a content-preserving command is kept instead: its closing brace
    /// is pushed onto `frames` and scanning resumes inside it. Returns the offset to scan from.
    fn arguments(
        &self,
        mut pos: usize,
        limit: usize,
        action: CommandAction,
        frames: &mut Vec<usize>,
    ) -> usize {
        while let Some(close) = self.close_of(pos, limit) {
            if action == CommandAction::Preserve && self.braces.contains_key(&pos) {
                frames.push(close);
                return pos + 1;
            }
            pos = close + 1;
        }
        pos
    }
}

/// Whether the byte at `pos` is escaped by an odd run of backslashes.
pub(crate) fn is_escaped(text: &str, pos: usize) -> bool {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}

/// Byte offset of the first unescaped `%` in `line`.
pub(crate) fn comment_start(line: &str) -> Option<usize> {
    line.match_indices('%')
        .map(|(i, _)| i)
        .find(|&i| !is_escaped(line, i))
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match comment_start(line) {
            Some(i) => {
                out.push_str(&line[..i]);
                if line.ends_with('\n') {
                    out.push('\n');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}

fn strip_math(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let (open_len, span_end) = match (bytes[i], bytes.get(i + 1)) {
            (b'\\', Some(b'[')) => (2, find_closing(text, i + 2, r"\]")),
            (b'\\', Some(b'(')) => (2, find_closing(text, i + 2, r"\)")),
            (b'\\', _) => {
                i += 2;
                continue;
            }
            (b'$', Some(b'$')) => (2, find_closing(text, i + 2, "$$")),
            (b'$', _) => (
                1,
                find_closing(text, i + 1, "$")
                    .filter(|&end| !RE_PARAGRAPH_BREAK.is_match(&text[i + 1..end])),
            ),
            _ => {
                i += 1;
                continue;
            }
        };

        match span_end {
            Some(end) => {
                out.push_str(&text[copied..i]);
                copied = end;
                i = end;
            }
            // Unclosed delimiters stay as text.
            None => i += open_len,
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Offset just past the first unescaped `delim` at or after `from`.
fn find_closing(text: &str, from: usize, delim: &str) -> Option<usize> {
    let mut search = from;
    while let Some(offset) = text[search..].find(delim) {
        let pos = search + offset;
        if !is_escaped(text, pos) {
            return Some(pos + delim.len());
        }
        search = pos + 1;
    }
    None
}

#[cfg(test)]
#[path = "tests/reduce.rs"]
mod tests;
