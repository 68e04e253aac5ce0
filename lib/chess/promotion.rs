use crate::chess::Role;
use derive_more::{Display, Error};
use shakmaty as sm;
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A promotion specifier.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
pub enum Promotion {
    #[display(fmt = "")]
    None,
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

impl Default for Promotion {
    fn default() -> Self {
        Promotion::None
    }
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse promotion, expected one of `n`, `b`, `r` or `q`")]
pub struct ParsePromotionError;

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Promotion::None),
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}

impl From<Promotion> for Option<Role> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::None => None,
            Promotion::Knight => Some(Role::Knight),
            Promotion::Bishop => Some(Role::Bishop),
            Promotion::Rook => Some(Role::Rook),
            Promotion::Queen => Some(Role::Queen),
        }
    }
}

/// Kings and pawns map to [`Promotion::None`], as they are not eligible.
impl From<Option<Role>> for Promotion {
    fn from(r: Option<Role>) -> Self {
        match r {
            Some(Role::Knight) => Promotion::Knight,
            Some(Role::Bishop) => Promotion::Bishop,
            Some(Role::Rook) => Promotion::Rook,
            Some(Role::Queen) => Promotion::Queen,
            Some(Role::King | Role::Pawn) | None => Promotion::None,
        }
    }
}

#[doc(hidden)]
impl From<Option<sm::Role>> for Promotion {
    fn from(r: Option<sm::Role>) -> Self {
        r.map(Role::from).into()
    }
}

#[doc(hidden)]
impl From<Promotion> for Option<sm::Role> {
    fn from(p: Promotion) -> Self {
        Option::<Role>::from(p).map(sm::Role::from)
    }
}
