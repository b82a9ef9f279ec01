//! Region-scoped line interpolation.
//!
//! Only lines between `-- +goose ENVSUB ON` and `-- +goose ENVSUB OFF` are
//! interpolated. A region that is never closed runs to the end of the
//! document. Marker lines themselves are copied verbatim.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use cooked_goose::envsub::process;
//!
//! let mut env = HashMap::new();
//! env.insert("FOO".to_string(), "bar".to_string());
//!
//! let sql = "-- +goose ENVSUB ON\nSELECT '${FOO}';\n-- +goose ENVSUB OFF\nSELECT '${FOO}';\n";
//! let cooked = process(sql, &env).unwrap();
//! assert_eq!(
//!     cooked,
//!     "-- +goose ENVSUB ON\nSELECT 'bar';\n-- +goose ENVSUB OFF\nSELECT '${FOO}';\n"
//! );
//! ```

use crate::error::{CookedGooseError, Result};

use super::env::Environment;
use super::interpolate::{interpolate, InterpolationError};
use super::observer::{InterpolationObserver, NoopObserver};

/// Marker that opens an interpolation region.
pub const ENVSUB_ON: &str = "-- +goose ENVSUB ON";

/// Marker that closes an interpolation region.
pub const ENVSUB_OFF: &str = "-- +goose ENVSUB OFF";

/// A region marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    On,
    Off,
}

impl Marker {
    /// Classify a line. Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            ENVSUB_ON => Some(Self::On),
            ENVSUB_OFF => Some(Self::Off),
            _ => None,
        }
    }
}

/// Whether the scanner is inside an interpolation region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionState {
    #[default]
    Outside,
    Inside,
}

impl RegionState {
    fn after(self, marker: Marker) -> Self {
        match marker {
            Marker::On => Self::Inside,
            Marker::Off => Self::Outside,
        }
    }
}

/// Interpolate every ENVSUB region of `content`.
///
/// Each output line is terminated by `\n`, so a document without a final
/// newline gains one.
///
/// # Errors
///
/// Returns [`CookedGooseError::UnboundVariable`] or
/// [`CookedGooseError::InterpolationSyntax`] for the first line inside a
/// region that cannot be interpolated. No partial output is returned.
pub fn process(content: &str, env: &dyn Environment) -> Result<String> {
    process_with_observer(content, env, &mut NoopObserver)
}

/// Like [`process`], reporting each step to `observer`.
pub fn process_with_observer(
    content: &str,
    env: &dyn Environment,
    observer: &mut dyn InterpolationObserver,
) -> Result<String> {
    let output = process_bytes_with_observer(content.as_bytes(), env, observer)?;
    String::from_utf8(output).map_err(|e| anyhow::Error::from(e).into())
}

/// Interpolate a document that may not be valid UTF-8.
///
/// Lines outside regions and marker lines are copied byte for byte. Only
/// lines handed to the interpolator must be UTF-8.
///
/// # Errors
///
/// As [`process`], plus [`CookedGooseError::InvalidEncoding`] for a region
/// line that is not UTF-8.
pub fn process_bytes(content: &[u8], env: &dyn Environment) -> Result<Vec<u8>> {
    process_bytes_with_observer(content, env, &mut NoopObserver)
}

/// Like [`process_bytes`], reporting each step to `observer`.
pub fn process_bytes_with_observer(
    content: &[u8],
    env: &dyn Environment,
    observer: &mut dyn InterpolationObserver,
) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(content.len() + 1);
    let mut state = RegionState::default();

    for (index, line) in lines(content).enumerate() {
        let line_number = index + 1;
        let text = std::str::from_utf8(line).ok();

        if let Some(marker) = text.and_then(Marker::parse) {
            state = state.after(marker);
            observer.on_marker(line_number, marker);
            output.extend_from_slice(line);
        } else if state == RegionState::Inside {
            let Some(text) = text else {
                let lossy = String::from_utf8_lossy(line);
                observer.on_failure(line_number, &lossy, "line is not valid UTF-8");
                return Err(CookedGooseError::InvalidEncoding {
                    line_number,
                    line: lossy.into_owned(),
                });
            };

            match interpolate(text, env) {
                Ok(interpolated) => {
                    observer.on_interpolated(line_number, text, &interpolated);
                    output.extend_from_slice(interpolated.as_bytes());
                }
                Err(e) => {
                    observer.on_failure(line_number, text, &e.to_string());
                    return Err(line_error(line_number, text, e));
                }
            }
        } else {
            output.extend_from_slice(line);
        }

        output.push(b'\n');
    }

    Ok(output)
}

/// Split on `\n` without yielding an empty line after a final terminator.
fn lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content
        .split_inclusive(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\n").unwrap_or(line))
}

fn line_error(line_number: usize, line: &str, error: InterpolationError) -> CookedGooseError {
    match error {
        InterpolationError::Unbound(name) => CookedGooseError::UnboundVariable {
            line_number,
            line: line.to_string(),
            name,
        },
        InterpolationError::Syntax(message) => CookedGooseError::InterpolationSyntax {
            line_number,
            line: line.to_string(),
            message,
        },
    }
}
