use crate::chess::{Color, File, ParseFileError, ParseRankError, Rank};
use derive_more::{DebugCustom, Display, Error, From};
use proptest::{prelude::*, strategy::Map};
use shakmaty as sm;
use std::ops::{Range, Sub};
use std::{fmt, str::FromStr};

/// A square on the chess board.
///
/// Squares are indexed on a 16 columns wide grid, the so called [0x88] layout, where the board
/// occupies the 8 leftmost columns. An index `i` lies on the board if and only if `i & 0x88`
/// is zero, which makes stepping off the board detectable with a single bitmask test.
///
/// [0x88]: https://www.chessprogramming.org/0x88
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[debug(fmt = "Square({self})")]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// The width of a row of the padded grid.
    pub const STRIDE: u8 = 16;

    /// The number of cells of the padded grid.
    pub const CELLS: usize = 128;

    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub const fn new(f: File, r: Rank) -> Self {
        Square(r.index() * Self::STRIDE + f.index())
    }

    /// Constructs [`Square`] from its index on the padded grid, if on the board.
    #[inline(always)]
    pub const fn from_index(i: u8) -> Option<Self> {
        if i & 0x88 == 0 {
            Some(Square(i))
        } else {
            None
        }
    }

    /// This square's index on the padded grid.
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// This square's [`File`].
    #[inline(always)]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % Self::STRIDE) as usize]
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / Self::STRIDE) as usize]
    }

    /// The shade of this square, [`Color::Black`] for dark and [`Color::White`] for light.
    ///
    /// The corner `a1` is dark.
    #[inline(always)]
    pub const fn color(self) -> Color {
        if (self.file().index() + self.rank().index()) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The square `d` cells away on the padded grid, if on the board.
    #[inline(always)]
    pub const fn offset(self, d: i8) -> Option<Self> {
        let i = self.0 as i16 + d as i16;
        if i & 0x88 == 0 {
            Some(Square(i as u8))
        } else {
            None
        }
    }

    /// An iterator over all squares, rank by rank starting from `a1`.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Rank::iter().flat_map(|r| File::iter().map(move |f| Square::new(f, r)))
    }
}

/// The signed distance between two squares on the padded grid.
impl Sub for Square {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        (self.0 as i16 - rhs.0 as i16) as i8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file(), f)?;
        fmt::Display::fmt(&self.rank(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

impl Arbitrary for Square {
    type Parameters = ();
    type Strategy = Map<Range<u8>, fn(u8) -> Square>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0u8..64).prop_map(|i| Square((i / 8) * Square::STRIDE + i % 8))
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    fn from(s: sm::Square) -> Self {
        Square::new(s.file().into(), s.rank().into())
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    fn from(s: Square) -> Self {
        sm::Square::from_coords(s.file().into(), s.rank().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn square_is_a_single_byte() {
        assert_eq!(size_of::<Square>(), 1);
    }

    #[test]
    fn iter_visits_every_square_once_in_row_major_order() {
        let squares: Vec<_> = Square::iter().map(Square::index).collect();
        assert_eq!(squares.len(), 64);
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
        assert!(squares.iter().all(|i| i & 0x88 == 0));
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(sq: Square) {
        assert_eq!(Square::new(sq.file(), sq.rank()), sq);
    }

    #[proptest]
    fn from_index_accepts_only_on_board_indices(i: u8) {
        assert_eq!(Square::from_index(i).is_some(), i & 0x88 == 0);
    }

    #[proptest]
    fn offset_matches_file_and_rank_arithmetic(sq: Square, #[strategy(-2i8..=2)] df: i8, #[strategy(-2i8..=2)] dr: i8) {
        let f = sq.file().index() as i8 + df;
        let r = sq.rank().index() as i8 + dr;
        let expected = Option::zip(File::new(f as u8).filter(|_| f >= 0), Rank::new(r as u8).filter(|_| r >= 0))
            .map(|(f, r)| Square::new(f, r));

        assert_eq!(sq.offset(dr * 16 + df), expected);
    }

    #[test]
    fn a1_is_dark_and_h1_is_light() {
        assert_eq!(Square::new(File::A, Rank::First).color(), Color::Black);
        assert_eq!(Square::new(File::H, Rank::First).color(), Color::White);
        assert_eq!(Square::new(File::A, Rank::Eighth).color(), Color::White);
        assert_eq!(Square::new(File::H, Rank::Eighth).color(), Color::Black);
    }

    #[proptest]
    fn diagonal_neighbors_share_color(
        sq: Square,
        #[strategy(prop_oneof![Just(15i8), Just(17), Just(-15), Just(-17)])] d: i8,
    ) {
        if let Some(n) = sq.offset(d) {
            assert_eq!(n.color(), sq.color());
        }
    }

    #[proptest]
    fn orthogonal_neighbors_have_opposite_colors(
        sq: Square,
        #[strategy(prop_oneof![Just(1i8), Just(-1), Just(16), Just(-16)])] d: i8,
    ) {
        if let Some(n) = sq.offset(d) {
            assert_ne!(n.color(), sq.color());
        }
    }

    #[proptest]
    fn subtracting_squares_returns_offset(a: Square, b: Square) {
        assert_eq!(b.offset(a - b), Some(a));
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        r: Rank,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_invalid(
        f: File,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(
            [f.to_string(), c.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.len() != 2)] s: String) {
        assert_eq!(s.parse::<Square>().ok(), None);
    }

    #[proptest]
    fn square_has_an_equivalent_shakmaty_representation(sq: Square) {
        assert_eq!(Square::from(sm::Square::from(sq)), sq);
    }
}
