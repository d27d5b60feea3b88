//! Assignment rendering helpers, plus the option-value reader shared by the
//! command-line tools.
//!
//! Assignments render as one glyph per node in node order: `+` for up, `-` for
//! down.

use crate::error::{IsingError, Result};
use crate::model::Spin;

/// Render spins as a `+`/`-` string.
pub fn render_assignment(assignment: &[Spin]) -> String {
    assignment.iter().map(|s| s.glyph()).collect()
}

/// Parse a `+`/`-` string back into spins. Surrounding whitespace is ignored.
pub fn parse_assignment(glyphs: &str) -> Result<Vec<Spin>> {
    glyphs
        .trim()
        .chars()
        .enumerate()
        .map(|(pos, ch)| match ch {
            '+' => Ok(Spin::Up),
            '-' => Ok(Spin::Down),
            other => Err(IsingError::Parse {
                line: 1,
                message: format!("unexpected glyph '{other}' at position {pos}"),
            }),
        })
        .collect()
}

/// Read the value of option `name` if `arg` is that option.
///
/// Accepts `--name=value` as well as `--name value`, pulling the value from
/// `rest` in the second form. Returns `Ok(None)` when `arg` is some other
/// argument.
pub fn option_value<I, T>(
    arg: &str,
    name: &str,
    rest: &mut I,
) -> std::result::Result<Option<String>, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    if let Some(value) = arg.strip_prefix(name).and_then(|tail| tail.strip_prefix('=')) {
        return Ok(Some(value.to_string()));
    }
    if arg != name {
        return Ok(None);
    }
    rest.next()
        .map(|value| Some(value.into()))
        .ok_or_else(|| format!("missing value after {name}"))
}
