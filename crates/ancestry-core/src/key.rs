//! Dynamically typed keys and the comparability check used by the query drivers.

use crate::error::{AncestryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a [`Key`]. Keys of different kinds are not mutually comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Integer,
    Text,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Integer => write!(f, "integer"),
            KeyKind::Text => write!(f, "text"),
        }
    }
}

/// A key read from a fixture or the command line: `3` or `"a"`.
///
/// The derived ordering ranks every integer below every text value. It only exists so
/// that `Key` can live in ordered containers; queries mixing kinds are rejected through
/// [`Comparable`] before any ordering is consulted. `OrderedTree::insert` accepts any
/// `Key`; use `OrderedTree::try_insert` to keep a tree to a single kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Int(_) => KeyKind::Integer,
            Key::Text(_) => KeyKind::Text,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// Integers win: `"42"` parses as `Key::Int(42)`, anything else is text.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Key::Text(s.to_string()), Key::Int))
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

/// Checks whether two values may be compared under a tree's ordering.
///
/// Statically ordered types are always comparable; only dynamically typed keys can fail.
pub trait Comparable {
    fn ensure_comparable(&self, other: &Self) -> Result<()>;
}

macro_rules! always_comparable {
    ($($t:ty),* $(,)?) => {
        $(
            impl Comparable for $t {
                fn ensure_comparable(&self, _other: &Self) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

always_comparable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, String, &str,
);

impl Comparable for Key {
    fn ensure_comparable(&self, other: &Self) -> Result<()> {
        if self.kind() == other.kind() {
            Ok(())
        } else {
            Err(AncestryError::TypeMismatch {
                left: self.kind(),
                right: other.kind(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefers_integers() {
        assert_eq!("42".parse::<Key>().unwrap(), Key::Int(42));
        assert_eq!("-7".parse::<Key>().unwrap(), Key::Int(-7));
        assert_eq!("4a".parse::<Key>().unwrap(), Key::Text("4a".to_string()));
    }

    #[test]
    fn test_untagged_json() {
        let keys: Vec<Key> = serde_json::from_str(r#"[3, "b"]"#).unwrap();
        assert_eq!(keys, vec![Key::Int(3), Key::from("b")]);
    }

    #[test]
    fn test_mixed_kinds_rejected() {
        let err = Key::Int(1).ensure_comparable(&Key::from("a")).unwrap_err();
        assert!(matches!(
            err,
            AncestryError::TypeMismatch {
                left: KeyKind::Integer,
                right: KeyKind::Text
            }
        ));
        assert_eq!(err.to_string(), "cannot compare integer key with text key");
    }

    #[test]
    fn test_same_kind_accepted() {
        assert!(Key::from("a").ensure_comparable(&Key::from("z")).is_ok());
        assert!(5_u32.ensure_comparable(&9).is_ok());
    }

    #[test]
    fn test_display_is_bare_value() {
        assert_eq!(Key::Int(30).to_string(), "30");
        assert_eq!(Key::from("root").to_string(), "root");
    }
}
