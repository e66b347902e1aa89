//! Shell-style argument splitting as a pattern
//!
//! Not a regular expression at all: the input is split into words the way a
//! POSIX shell would, then sorted into positionals and `--options`.
//!
//! ```text
//! p1 'p2 two' --o1=one --o2 a b -- p3
//!   group 1: ["p1","p2 two","p3"]
//!   group 2: {"o1":"one","o2":["a","b"]}
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::{ArgPattern, GroupMatch};

const SOURCE: &str = "shlex argparse";

/// `--key=value` | `--key` | positional
static CLASSIFY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:--(\w+)=([\s\S]*)|--(\w+)|(\S[\s\S]*))$").expect("valid classifier regex")
});

/// Two-group matcher: positionals (JSON array) and options (JSON object).
///
/// Both groups are always present on a match, so pair them with
/// [`crate::Converter::Json`] to get structured values back.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShlexPattern;

impl ShlexPattern {
    pub fn new() -> Self {
        Self
    }

    fn classify(words: &[String]) -> Option<(Vec<Value>, Map<String, Value>)> {
        let mut positionals = Vec::new();
        let mut options = Map::new();

        let mut i = 0;
        while i < words.len() {
            let caps = CLASSIFY.captures(&words[i])?;

            if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
                options.insert(key.as_str().to_string(), Value::from(value.as_str()));
            } else if let Some(key) = caps.get(3) {
                let (values, consumed) = until_double_hyphen(&words[i + 1..]);
                options.insert(key.as_str().to_string(), Value::from(values));
                i += consumed;
            } else if let Some(pos) = caps.get(4) {
                if pos.as_str() != "--" {
                    positionals.push(Value::from(pos.as_str()));
                }
            }
            i += 1;
        }

        Some((positionals, options))
    }
}

/// Values of a variadic `--key`: everything up to a bare `--` (consumed)
/// or the next `--option` (left in place).
fn until_double_hyphen(rest: &[String]) -> (Vec<String>, usize) {
    for (i, word) in rest.iter().enumerate() {
        if word == "--" {
            return (rest[..i].to_vec(), i + 1);
        }
        if word.starts_with("--") {
            return (rest[..i].to_vec(), i);
        }
    }
    (rest.to_vec(), rest.len())
}

impl ArgPattern for ShlexPattern {
    fn source(&self) -> &str {
        SOURCE
    }

    fn group_count(&self) -> usize {
        2
    }

    fn match_groups(&self, input: &str) -> Option<Vec<GroupMatch>> {
        let words = split_words(input)?;
        let (positionals, options) = Self::classify(&words)?;

        Some(vec![
            GroupMatch::Present(Value::Array(positionals).to_string()),
            GroupMatch::Present(Value::Object(options).to_string()),
        ])
    }
}

/// Split text into words using POSIX shell quoting rules.
///
/// Returns `None` on an unterminated quote or a trailing backslash.
pub fn split_words(input: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        c => current.push(c),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            c @ ('"' | '\\' | '$' | '`') => current.push(c),
                            '\n' => {}
                            c => {
                                current.push('\\');
                                current.push(c);
                            }
                        },
                        c => current.push(c),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next()? {
                    '\n' => {}
                    c => current.push(c),
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Some(words)
}
