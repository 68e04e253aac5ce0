use crate::chess::Color;
use derive_more::{Display, Error};
use shakmaty as sm;
use std::{ops::Sub, str::FromStr};
use test_strategy::Arbitrary;

/// A row on the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
pub enum Rank {
    #[display(fmt = "1")]
    First,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "8")]
    Eighth,
}

impl Rank {
    /// All ranks, from `1` to `8`.
    #[rustfmt::skip]
    pub const ALL: [Rank; 8] = [
        Rank::First, Rank::Second, Rank::Third, Rank::Fourth,
        Rank::Fifth, Rank::Sixth, Rank::Seventh, Rank::Eighth,
    ];

    /// Constructs [`Rank`] from its index, `0` being the first rank.
    #[inline(always)]
    pub const fn new(i: u8) -> Option<Self> {
        if i < 8 {
            Some(Self::ALL[i as usize])
        } else {
            None
        }
    }

    /// This rank's index, `0` being the first rank.
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// An iterator over all ranks.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// This rank from the perspective of the given side.
    ///
    /// For example, [`Rank::First`] from black's perspective is [`Rank::Eighth`].
    #[inline(always)]
    pub const fn perspective(self, side: Color) -> Self {
        match side {
            Color::White => self,
            Color::Black => Self::ALL[7 - self as usize],
        }
    }
}

impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index() as i8 - rhs.index() as i8
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse rank, expected digit in the range `(1..=8)`")]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Rank::First),
            "2" => Ok(Rank::Second),
            "3" => Ok(Rank::Third),
            "4" => Ok(Rank::Fourth),
            "5" => Ok(Rank::Fifth),
            "6" => Ok(Rank::Sixth),
            "7" => Ok(Rank::Seventh),
            "8" => Ok(Rank::Eighth),
            _ => Err(ParseRankError),
        }
    }
}

#[doc(hidden)]
impl From<sm::Rank> for Rank {
    fn from(r: sm::Rank) -> Self {
        match r {
            sm::Rank::First => Rank::First,
            sm::Rank::Second => Rank::Second,
            sm::Rank::Third => Rank::Third,
            sm::Rank::Fourth => Rank::Fourth,
            sm::Rank::Fifth => Rank::Fifth,
            sm::Rank::Sixth => Rank::Sixth,
            sm::Rank::Seventh => Rank::Seventh,
            sm::Rank::Eighth => Rank::Eighth,
        }
    }
}

#[doc(hidden)]
impl From<Rank> for sm::Rank {
    fn from(r: Rank) -> Self {
        match r {
            Rank::First => sm::Rank::First,
            Rank::Second => sm::Rank::Second,
            Rank::Third => sm::Rank::Third,
            Rank::Fourth => sm::Rank::Fourth,
            Rank::Fifth => sm::Rank::Fifth,
            Rank::Sixth => sm::Rank::Sixth,
            Rank::Seventh => sm::Rank::Seventh,
            Rank::Eighth => sm::Rank::Eighth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn rank_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Rank>>(), size_of::<Rank>());
    }

    #[proptest]
    fn new_constructs_rank_from_its_index(r: Rank) {
        assert_eq!(Rank::new(r.index()), Some(r));
    }

    #[proptest]
    fn subtracting_ranks_returns_distance(a: Rank, b: Rank) {
        assert_eq!(a - b, a.index() as i8 - b.index() as i8);
    }

    #[proptest]
    fn perspective_of_black_flips_rank(r: Rank) {
        assert_eq!(r.perspective(Color::White), r);
        assert_eq!(r.perspective(Color::Black).index(), 7 - r.index());
    }

    #[proptest]
    fn parsing_printed_rank_is_an_identity(r: Rank) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_rank_fails_if_not_digit_between_1_and_8(
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Rank>(), Err(ParseRankError));
    }

    #[proptest]
    fn parsing_rank_fails_if_length_not_one(#[filter(#s.len() != 1)] s: String) {
        assert_eq!(s.parse::<Rank>(), Err(ParseRankError));
    }

    #[proptest]
    fn rank_has_an_equivalent_shakmaty_representation(r: Rank) {
        assert_eq!(Rank::from(sm::Rank::from(r)), r);
    }
}
