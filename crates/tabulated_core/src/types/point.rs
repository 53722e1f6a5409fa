//! Immutable sample point.

use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample.
///
/// Points are plain values: iteration over a tabulated function yields
/// copies, so holding a `Point` never aliases the function's storage.
///
/// # Example
///
/// ```
/// use tabulated_core::types::Point;
///
/// let p = Point::new(1.0, 2.0);
/// assert_eq!(p.x, 1.0);
/// assert_eq!(p.y, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Abscissa
    #[serde(with = "lossless")]
    pub x: f64,
    /// Ordinate
    #[serde(with = "lossless")]
    pub y: f64,
}

impl Point {
    /// Construct a point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Slope of the chord from `self` to `other`.
    #[inline]
    pub fn slope(&self, other: &Point) -> f64 {
        (other.y - self.y) / (other.x - self.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}; {:?}]", self.x, self.y)
    }
}

/// Bits of `value` for hashing, with `-0.0` folded onto `0.0`.
///
/// Keeps `Hash` consistent with the `==` comparison used for equality.
#[inline]
pub(crate) fn hash_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Serde form of `f64` that survives formats without non-finite numbers.
///
/// Finite values are plain numbers; NaN and the infinities are written as
/// the strings `"NaN"`, `"inf"` and `"-inf"`.
pub(crate) mod lossless {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        Sample(*value).serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Sample::deserialize(deserializer).map(|sample| sample.0)
    }

    /// Sequence counterpart for `Vec<f64>` fields.
    pub(crate) mod vec {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::Sample;

        pub(crate) fn serialize<S: Serializer>(
            values: &[f64],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(|&v| Sample(v)))
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<f64>, D::Error> {
            let samples = Vec::<Sample>::deserialize(deserializer)?;
            Ok(samples.into_iter().map(|sample| sample.0).collect())
        }
    }

    struct Sample(f64);

    impl Serialize for Sample {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let value = self.0;
            if value.is_finite() {
                serializer.serialize_f64(value)
            } else if value.is_nan() {
                serializer.serialize_str("NaN")
            } else if value > 0.0 {
                serializer.serialize_str("inf")
            } else {
                serializer.serialize_str("-inf")
            }
        }
    }

    impl<'de> Deserialize<'de> for Sample {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(SampleVisitor)
        }
    }

    struct SampleVisitor;

    impl<'de> Visitor<'de> for SampleVisitor {
        type Value = Sample;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Sample, E> {
            Ok(Sample(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Sample, E> {
            Ok(Sample(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Sample, E> {
            Ok(Sample(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Sample, E> {
            match v {
                "NaN" => Ok(Sample(f64::NAN)),
                "inf" => Ok(Sample(f64::INFINITY)),
                "-inf" => Ok(Sample(f64::NEG_INFINITY)),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }
}
