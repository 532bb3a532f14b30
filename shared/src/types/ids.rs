//! Entity identifiers
//!
//! Every collection has its own id type so a teacher id can never be used where a
//! class id is expected. Ids are positive; zero is rejected on construction and on
//! deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use crate::errors::{SharedError, SharedResult};

/// Behaviour common to all entity identifiers.
pub trait EntityId:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Id given to the first record of an empty collection.
    fn first() -> Self;

    /// The id following this one, `None` once the id space is exhausted.
    fn successor(self) -> Option<Self>;

    /// Raw numeric value.
    fn get(self) -> u32;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u32", into = "u32")]
        pub struct $name(u32);

        impl $name {
            pub fn new(raw: u32) -> SharedResult<Self> {
                if raw == 0 {
                    Err(SharedError::InvalidId { kind: $label, value: raw })
                } else {
                    Ok(Self(raw))
                }
            }
        }

        impl EntityId for $name {
            fn first() -> Self {
                Self(1)
            }

            fn successor(self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }

            fn get(self) -> u32 {
                self.0
            }
        }

        impl TryFrom<u32> for $name {
            type Error = SharedError;

            fn try_from(raw: u32) -> SharedResult<Self> {
                Self::new(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Subject`](crate::Subject)
    SubjectId,
    "subject"
);
entity_id!(
    /// Identifier of a [`Teacher`](crate::Teacher)
    TeacherId,
    "teacher"
);
entity_id!(
    /// Identifier of a [`Class`](crate::Class)
    ClassId,
    "class"
);
entity_id!(
    /// Identifier of a [`Lesson`](crate::Lesson)
    LessonId,
    "lesson"
);
