//! Three-state filter flag.
//!
//! Every filter toggle is either unset ("don't care"), positive (require) or
//! negative (exclude). UI controls walk the states in a fixed cycle.

use serde::{Deserialize, Serialize};

/// A tri-valued flag used as the atomic value of every filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TernaryBoolean {
    #[default]
    Unset,
    True,
    False,
}

impl TernaryBoolean {
    /// Forward step: Unset -> True -> False -> Unset.
    pub fn next(self) -> Self {
        match self {
            Self::Unset => Self::True,
            Self::True => Self::False,
            Self::False => Self::Unset,
        }
    }

    /// Backward step, the inverse of [`next`](Self::next).
    pub fn prev(self) -> Self {
        match self {
            Self::Unset => Self::False,
            Self::True => Self::Unset,
            Self::False => Self::True,
        }
    }

    pub fn is_unset(self) -> bool {
        self == Self::Unset
    }

    pub fn is_not_unset(self) -> bool {
        self != Self::Unset
    }

    pub fn is_positive(self) -> bool {
        self == Self::True
    }

    pub fn is_not_positive(self) -> bool {
        self != Self::True
    }

    pub fn is_negative(self) -> bool {
        self == Self::False
    }

    pub fn is_not_negative(self) -> bool {
        self != Self::False
    }
}

impl From<bool> for TernaryBoolean {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}
