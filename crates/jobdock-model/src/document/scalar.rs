//! Lenient decoding of free-form text fields.
//!
//! YAML writers rarely quote numbers or booleans (`value: 8080`,
//! `value: true`), so text fields accept any scalar and keep its textual form.
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Null(()),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
            Scalar::Null(()) => String::new(),
        }
    }
}

/// Any scalar as text; `null` is the empty string.
pub(crate) fn text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(de).map(Scalar::into_text)
}

/// Optional scalar as text; `null` is `None`.
pub(crate) fn optional_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(de)?.map(Scalar::into_text))
}
