use derive_more::{Display, Error};
use shakmaty as sm;
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
///
/// The declaration order is significant, the encoding of [`Piece`][`crate::chess::Piece`]
/// is derived from it and places the sliding roles next to each other.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
pub enum Role {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl Role {
    /// All roles, in encoding order.
    pub const ALL: [Role; 6] = [
        Role::King,
        Role::Queen,
        Role::Rook,
        Role::Bishop,
        Role::Knight,
        Role::Pawn,
    ];

    /// The roles a pawn may be promoted to, in order of precedence.
    pub const PROMOTIONS: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

    /// An iterator over all roles.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// Whether this role moves along rays.
    #[inline(always)]
    pub const fn is_sliding(self) -> bool {
        matches!(self, Role::Queen | Role::Rook | Role::Bishop)
    }

    /// Whether a pawn may be promoted to this role.
    #[inline(always)]
    pub const fn is_promotable(self) -> bool {
        matches!(self, Role::Queen | Role::Rook | Role::Bishop | Role::Knight)
    }

    /// The upper case letter used in algebraic notation.
    pub const fn symbol(self) -> char {
        match self {
            Role::King => 'K',
            Role::Queen => 'Q',
            Role::Rook => 'R',
            Role::Bishop => 'B',
            Role::Knight => 'N',
            Role::Pawn => 'P',
        }
    }

    /// Parses the upper case letter used in algebraic notation.
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'K' => Some(Role::King),
            'Q' => Some(Role::Queen),
            'R' => Some(Role::Rook),
            'B' => Some(Role::Bishop),
            'N' => Some(Role::Knight),
            'P' => Some(Role::Pawn),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol().to_ascii_lowercase())
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `k`, `q`, `r`, `b`, `n` or `p`")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => {
                Role::from_symbol(c.to_ascii_uppercase()).ok_or(ParseRoleError)
            }
            _ => Err(ParseRoleError),
        }
    }
}

#[doc(hidden)]
impl From<sm::Role> for Role {
    fn from(r: sm::Role) -> Self {
        match r {
            sm::Role::King => Role::King,
            sm::Role::Queen => Role::Queen,
            sm::Role::Rook => Role::Rook,
            sm::Role::Bishop => Role::Bishop,
            sm::Role::Knight => Role::Knight,
            sm::Role::Pawn => Role::Pawn,
        }
    }
}

#[doc(hidden)]
impl From<Role> for sm::Role {
    fn from(r: Role) -> Self {
        match r {
            Role::King => sm::Role::King,
            Role::Queen => sm::Role::Queen,
            Role::Rook => sm::Role::Rook,
            Role::Bishop => sm::Role::Bishop,
            Role::Knight => sm::Role::Knight,
            Role::Pawn => sm::Role::Pawn,
        }
    }
}
