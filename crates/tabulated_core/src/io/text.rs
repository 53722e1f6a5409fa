//! Line-oriented text format.
//!
//! ```text
//! 3
//! 0 1
//! 0.5 2.25
//! 1 4
//! ```
//!
//! Line 1 holds the sample count, each following line one `x y` pair
//! separated by whitespace. The writer always emits `.` as the decimal
//! separator. The reader is told which separator to expect; a reader set
//! to [`DecimalSeparator::Comma`] rejects `.`-formatted numbers, so files
//! written here only round-trip through a [`DecimalSeparator::Dot`] reader.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::factory::TabulatedFunctionFactory;
use crate::functions::TabulatedFunctionEnum;
use crate::traits::TabulatedFunction;
use crate::types::FormatError;

/// Decimal separator expected by [`read_text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DecimalSeparator {
    /// `1.5`
    #[default]
    Dot,
    /// `1,5`
    Comma,
}

impl DecimalSeparator {
    fn parse(self, token: &str, line: usize) -> Result<f64, FormatError> {
        let invalid = || FormatError::InvalidNumber {
            line,
            token: token.to_string(),
        };
        match self {
            DecimalSeparator::Dot => token.parse().map_err(|_| invalid()),
            DecimalSeparator::Comma => {
                if token.contains('.') {
                    return Err(invalid());
                }
                token.replace(',', ".").parse().map_err(|_| invalid())
            }
        }
    }
}

/// Write `function` in the text format.
pub fn write_text<W, F>(writer: &mut W, function: &F) -> Result<(), FormatError>
where
    W: Write + ?Sized,
    F: TabulatedFunction + ?Sized,
{
    writeln!(writer, "{}", function.count())?;
    for point in function.points() {
        writeln!(writer, "{} {}", point.x, point.y)?;
    }
    writer.flush()?;
    debug!(count = function.count(), "wrote text function");
    Ok(())
}

/// Read a function in the text format; `factory` picks the storage.
///
/// # Errors
///
/// * `MissingCount` / `InvalidCount` - bad or absent first line
/// * `WrongTokenCount` / `InvalidNumber` - malformed point line
/// * `Truncated` - fewer point lines than announced
/// * `Invalid` - samples rejected by the factory (count below two, unsorted x)
pub fn read_text<R>(
    reader: R,
    factory: &dyn TabulatedFunctionFactory,
    separator: DecimalSeparator,
) -> Result<TabulatedFunctionEnum, FormatError>
where
    R: BufRead,
{
    let mut lines = reader.lines();
    let count_line = lines.next().ok_or(FormatError::MissingCount)??;
    let count: usize = count_line
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidCount(count_line.trim().to_string()))?;

    let capacity = count.min(1 << 16);
    let mut x_values = Vec::with_capacity(capacity);
    let mut y_values = Vec::with_capacity(capacity);
    for index in 0..count {
        let line_number = index + 2;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(FormatError::Truncated {
                    expected: count,
                    read: index,
                })
            }
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(FormatError::WrongTokenCount {
                line: line_number,
                found: tokens.len(),
            });
        }
        x_values.push(separator.parse(tokens[0], line_number)?);
        y_values.push(separator.parse(tokens[1], line_number)?);
    }
    debug!(count, ?separator, kind = %factory.kind(), "read text function");
    Ok(factory.create(&x_values, &y_values)?)
}
