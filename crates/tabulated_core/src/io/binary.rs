//! Big-endian binary format.
//!
//! A 4-byte signed count followed by `count` pairs of IEEE-754 `f64`
//! values `(x, y)`, all big-endian, without header or padding.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::factory::TabulatedFunctionFactory;
use crate::functions::TabulatedFunctionEnum;
use crate::traits::TabulatedFunction;
use crate::types::FormatError;

/// Write `function` in the binary format.
pub fn write_binary<W, F>(writer: &mut W, function: &F) -> Result<(), FormatError>
where
    W: Write + ?Sized,
    F: TabulatedFunction + ?Sized,
{
    let count = function.count();
    let header = i32::try_from(count).map_err(|_| FormatError::InvalidCount(count.to_string()))?;
    writer.write_all(&header.to_be_bytes())?;
    for point in function.points() {
        writer.write_all(&point.x.to_be_bytes())?;
        writer.write_all(&point.y.to_be_bytes())?;
    }
    writer.flush()?;
    debug!(count, "wrote binary function");
    Ok(())
}

/// Read a function in the binary format; `factory` picks the storage.
pub fn read_binary<R>(
    reader: &mut R,
    factory: &dyn TabulatedFunctionFactory,
) -> Result<TabulatedFunctionEnum, FormatError>
where
    R: Read + ?Sized,
{
    let mut header = [0u8; 4];
    read_exact_or(reader, &mut header, || FormatError::MissingCount)?;
    let raw = i32::from_be_bytes(header);
    let count = usize::try_from(raw).map_err(|_| FormatError::InvalidCount(raw.to_string()))?;

    let capacity = count.min(1 << 16);
    let mut x_values = Vec::with_capacity(capacity);
    let mut y_values = Vec::with_capacity(capacity);
    let mut pair = [0u8; 16];
    for index in 0..count {
        read_exact_or(reader, &mut pair, || FormatError::Truncated {
            expected: count,
            read: index,
        })?;
        let (x, y) = pair.split_at(8);
        x_values.push(f64::from_be_bytes(to_array(x)));
        y_values.push(f64::from_be_bytes(to_array(y)));
    }
    debug!(count, kind = %factory.kind(), "read binary function");
    Ok(factory.create(&x_values, &y_values)?)
}

/// `read_exact`, mapping a premature end of stream to `on_eof()`.
fn read_exact_or<R>(reader: &mut R, buf: &mut [u8], on_eof: impl FnOnce() -> FormatError) -> Result<(), FormatError>
where
    R: Read + ?Sized,
{
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(on_eof()),
        Err(err) => Err(err.into()),
    }
}

fn to_array(bytes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ArrayTabulatedFunctionFactory, LinkedListTabulatedFunctionFactory};
    use crate::functions::LinkedListTabulatedFunction;
    use crate::types::TabulatedError;

    #[test]
    fn test_exact_byte_layout() {
        let f = LinkedListTabulatedFunction::new(&[1.0, 2.0], &[-1.0, 0.5]).unwrap();
        let mut out = Vec::new();
        write_binary(&mut out, &f).unwrap();
        assert_eq!(out.len(), 4 + 2 * 16);
        assert_eq!(&out[..4], &[0, 0, 0, 2]);
        assert_eq!(&out[4..12], &1.0f64.to_be_bytes());
        assert_eq!(&out[12..20], &(-1.0f64).to_be_bytes());
        assert_eq!(&out[28..36], &0.5f64.to_be_bytes());
    }

    #[test]
    fn test_round_trip() {
        let f = LinkedListTabulatedFunction::new(&[0.0, 0.1, 0.2], &[f64::MIN_POSITIVE, 1.0 / 3.0, -7.0]).unwrap();
        let mut out = Vec::new();
        write_binary(&mut out, &f).unwrap();
        let back = read_binary(&mut out.as_slice(), &ArrayTabulatedFunctionFactory).unwrap();
        assert_eq!(back.to_points(), f.to_points());
    }

    #[test]
    fn test_missing_count() {
        let err = read_binary(&mut [0u8, 0].as_slice(), &LinkedListTabulatedFunctionFactory).unwrap_err();
        assert!(matches!(err, FormatError::MissingCount));
    }

    #[test]
    fn test_negative_count() {
        let bytes = (-1i32).to_be_bytes();
        let err = read_binary(&mut bytes.as_slice(), &ArrayTabulatedFunctionFactory).unwrap_err();
        assert!(matches!(err, FormatError::InvalidCount(_)));
    }

    #[test]
    fn test_truncated_pairs() {
        let mut bytes = 3i32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 20]);
        let err = read_binary(&mut bytes.as_slice(), &ArrayTabulatedFunctionFactory).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { expected: 3, read: 1 }));
    }

    #[test]
    fn test_invariants_checked_on_read() {
        let mut bytes = 2i32.to_be_bytes().to_vec();
        for value in [5.0f64, 0.0, 1.0, 0.0] {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
        let err = read_binary(&mut bytes.as_slice(), &ArrayTabulatedFunctionFactory).unwrap_err();
        assert!(matches!(err, FormatError::Invalid(TabulatedError::NotSorted { .. })));
    }
}
