//! Opaque serialization through serde.
//!
//! The payload is the JSON encoding of the value's serde representation.
//! Only reconstruction through [`deserialize`] is guaranteed; the layout may
//! change between versions.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::FormatError;

/// Encode `value` into `writer`.
pub fn serialize<W, T>(writer: &mut W, value: &T) -> Result<(), FormatError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Decode a value written by [`serialize`].
///
/// Tabulated functions are re-validated while decoding; payloads violating
/// their invariants fail with `Json`.
pub fn deserialize<R, T>(reader: R) -> Result<T, FormatError>
where
    R: Read,
    T: DeserializeOwned,
{
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::StorageKind;
    use crate::functions::{ArrayTabulatedFunction, LinkedListTabulatedFunction, TabulatedFunctionEnum};
    use crate::traits::TabulatedFunction;

    #[test]
    fn test_reconstructs_each_storage() {
        let array = ArrayTabulatedFunction::new(&[0.0, 1.0], &[2.0, 3.0]).unwrap();
        let list = LinkedListTabulatedFunction::new(&[0.0, 1.0, 5.0], &[2.0, 3.0, 4.0]).unwrap();

        let mut bytes = Vec::new();
        serialize(&mut bytes, &array).unwrap();
        assert_eq!(deserialize::<_, ArrayTabulatedFunction>(bytes.as_slice()).unwrap(), array);

        let wrapped = TabulatedFunctionEnum::from(list);
        let mut bytes = Vec::new();
        serialize(&mut bytes, &wrapped).unwrap();
        assert_eq!(deserialize::<_, TabulatedFunctionEnum>(bytes.as_slice()).unwrap(), wrapped);
    }

    #[test]
    fn test_non_finite_array_samples_reconstruct() {
        let array = ArrayTabulatedFunction::new(&[0.0, 1.0], &[f64::INFINITY, 2.0]).unwrap();
        let mut bytes = Vec::new();
        serialize(&mut bytes, &array).unwrap();
        let back: ArrayTabulatedFunction = deserialize(bytes.as_slice()).unwrap();
        assert_eq!(back, array);
    }

    #[test]
    fn test_non_finite_list_samples_reconstruct() {
        let mut list = LinkedListTabulatedFunction::new(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        list.set_y(0, f64::NAN).unwrap();
        list.set_y(2, f64::NEG_INFINITY).unwrap();

        let mut bytes = Vec::new();
        serialize(&mut bytes, &TabulatedFunctionEnum::from(list)).unwrap();
        let back: TabulatedFunctionEnum = deserialize(bytes.as_slice()).unwrap();

        assert_eq!(back.kind(), StorageKind::LinkedList);
        assert!(back.get_y(0).unwrap().is_nan());
        assert_eq!(back.get_y(1).unwrap(), 2.0);
        assert_eq!(back.get_y(2).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_rejects_invalid_payload() {
        let payload = br#"[{"x":1.0,"y":0.0},{"x":0.0,"y":0.0}]"#;
        let result = deserialize::<_, LinkedListTabulatedFunction>(payload.as_slice());
        assert!(matches!(result, Err(FormatError::Json(_))));
    }
}
