//! Argument values attached to tracks
//!
//! Tracks carry side-channel key/value metadata ("args"). Keys are interned
//! strings; values are either interned strings or signed integers.

use crate::types::StringId;
use serde::{Deserialize, Serialize};

/// Value of a track argument
///
/// ## Equality Rules
///
/// - Different variants are never equal
/// - `String` compares interned handles, not string contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variadic {
    /// Interned string value
    String(StringId),
    /// 64-bit signed integer
    Integer(i64),
}

impl Variadic {
    /// Returns the type name as a string (for error messages and dumps)
    pub const fn type_name(&self) -> &'static str {
        match self {
            Variadic::String(_) => "String",
            Variadic::Integer(_) => "Integer",
        }
    }

    /// Get the integer payload, if this is an integer
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Variadic::Integer(v) => Some(*v),
            Variadic::String(_) => None,
        }
    }

    /// Get the string handle, if this is a string
    pub const fn as_string(&self) -> Option<StringId> {
        match self {
            Variadic::String(id) => Some(*id),
            Variadic::Integer(_) => None,
        }
    }
}

impl From<i64> for Variadic {
    fn from(v: i64) -> Self {
        Variadic::Integer(v)
    }
}

impl From<StringId> for Variadic {
    fn from(id: StringId) -> Self {
        Variadic::String(id)
    }
}
