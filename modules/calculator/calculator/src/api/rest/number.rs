//! Serde support for `f64` values that may be infinite or NaN.
//!
//! JSON has no literal for non-finite numbers and `serde_json` writes them as
//! `null`, which is indistinguishable from "no value". Finite values go out as
//! JSON numbers; the rest go out as the strings `"inf"`, `"-inf"` and `"NaN"`.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Answer {
//!     #[serde(with = "crate::api::rest::number")]
//!     value: f64,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

impl Repr {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text
                .parse::<f64>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(&text), &"a number")),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.collect_str(value)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Repr::deserialize(deserializer)?.into_f64()
}

/// Same encoding for `Option<f64>`; `None` stays `null`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Repr;

    #[allow(clippy::ref_option)] // serde requires &T signature
    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Repr>::deserialize(deserializer)?
            .map(Repr::into_f64)
            .transpose()
    }
}
