//! Tri-state value for release fields that may be supplied, derived, or left out

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declarative literal asking for a field to be derived
pub const COMPUTE_MARKER: &str = "<COMPUTED>";

/// A release field that the user may set, ask to be computed, or leave out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Not present in the metadata (blank or null)
    Unset,
    /// Present as `<COMPUTED>`
    Compute,
    /// A user-supplied or already derived value
    Concrete(T),
}

impl<T> Field<T> {
    pub fn concrete(&self) -> Option<&T> {
        match self {
            Field::Concrete(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Field::Concrete(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Unset => Field::Unset,
            Field::Compute => Field::Compute,
            Field::Concrete(value) => Field::Concrete(f(value)),
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Field<U>, E> {
        Ok(match self {
            Field::Unset => Field::Unset,
            Field::Compute => Field::Compute,
            Field::Concrete(value) => Field::Concrete(f(value)?),
        })
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Unset => Field::Unset,
            Field::Compute => Field::Compute,
            Field::Concrete(value) => Field::Concrete(value),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(Field::Unset),
            Some(COMPUTE_MARKER) => Ok(Field::Compute),
            Some(value) => value
                .parse()
                .map(Field::Concrete)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl<T: fmt::Display> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Unset => serializer.serialize_none(),
            Field::Compute => serializer.serialize_str(COMPUTE_MARKER),
            Field::Concrete(value) => serializer.collect_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        value: Field<String>,
    }

    fn holder(yaml: &str) -> Field<String> {
        serde_yaml::from_str::<Holder>(yaml).unwrap().value
    }

    #[test]
    fn test_deserialize_states() {
        assert_eq!(holder("value: <COMPUTED>"), Field::Compute);
        assert_eq!(holder("value:"), Field::Unset);
        assert_eq!(holder("value: '   '"), Field::Unset);
        assert_eq!(holder("other: 1"), Field::Unset);
        assert_eq!(
            holder("value: 2013-05-19"),
            Field::Concrete("2013-05-19".to_string())
        );
    }

    #[test]
    fn test_try_map_keeps_state() {
        let compute: Field<String> = Field::Compute;
        assert_eq!(
            compute.try_map(|s| s.parse::<u32>()).unwrap(),
            Field::Compute
        );
        let concrete = Field::Concrete("12".to_string());
        assert_eq!(
            concrete.try_map(|s| s.parse::<u32>()).unwrap(),
            Field::Concrete(12)
        );
    }

    #[test]
    fn test_serialize_marker() {
        let json = serde_json::to_string(&Field::<String>::Compute).unwrap();
        assert_eq!(json, "\"<COMPUTED>\"");
    }
}
