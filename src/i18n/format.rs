//! Placeholder substitution for message templates
//!
//! Templates use `{}` for the next positional argument and `{N}` for the
//! argument at index N. `{{` and `}}` escape literal braces. A placeholder
//! that names a missing argument is left in the output untouched.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// A value substituted into a message template
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Text(String),
    /// Rendered in whole currency units
    Price(Decimal),
    /// Rendered without trailing zeros ("10", "12.5")
    Percent(Decimal),
}

impl Arg {
    pub fn text(value: impl Into<String>) -> Self {
        Arg::Text(value.into())
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(text) => write!(f, "{}", text),
            Arg::Price(price) => write!(
                f,
                "{}",
                price.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            ),
            Arg::Percent(percent) => write!(f, "{}", percent.normalize()),
        }
    }
}

/// Substitute `args` into `template`
pub fn render(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_positional = 0;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(inner);
                }

                if !closed {
                    out.push('{');
                    out.push_str(&spec);
                    continue;
                }

                let index = if spec.is_empty() {
                    let index = next_positional;
                    next_positional += 1;
                    Some(index)
                } else {
                    spec.trim().parse::<usize>().ok()
                };

                match index.and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(&spec);
                        out.push('}');
                    }
                }
            }
            other => out.push(other),
        }
    }

    out
}
