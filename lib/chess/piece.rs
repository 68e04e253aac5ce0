use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use shakmaty as sm;
use std::fmt::{self, Write};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A chess [piece][`Role`] of a certain [`Color`].
///
/// The encoding is `role * 2 + color`, so that the sliding pieces occupy the contiguous
/// range `WhiteQueen..=BlackBishop`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
pub enum Piece {
    WhiteKing,
    BlackKing,
    WhiteQueen,
    BlackQueen,
    WhiteRook,
    BlackRook,
    WhiteBishop,
    BlackBishop,
    WhiteKnight,
    BlackKnight,
    WhitePawn,
    BlackPawn,
}

impl Piece {
    /// All pieces, in encoding order.
    #[rustfmt::skip]
    pub const ALL: [Piece; 12] = [
        Piece::WhiteKing, Piece::BlackKing,
        Piece::WhiteQueen, Piece::BlackQueen,
        Piece::WhiteRook, Piece::BlackRook,
        Piece::WhiteBishop, Piece::BlackBishop,
        Piece::WhiteKnight, Piece::BlackKnight,
        Piece::WhitePawn, Piece::BlackPawn,
    ];

    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    #[inline(always)]
    pub const fn new(r: Role, c: Color) -> Self {
        Self::ALL[r as usize * 2 + c as usize]
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub const fn role(self) -> Role {
        Role::ALL[self as usize / 2]
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub const fn color(self) -> Color {
        Color::ALL[self as usize % 2]
    }

    /// This piece's encoding.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this piece moves along rays.
    #[inline(always)]
    pub const fn is_sliding(self) -> bool {
        let i = self as u8;
        i >= Piece::WhiteQueen as u8 && i <= Piece::BlackBishop as u8
    }

    /// An iterator over all pieces.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// An iterator over the pieces of a [`Color`].
    pub fn of(c: Color) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().skip(c.index()).step_by(2)
    }
}

/// Prints the piece as in FEN, upper case for white and lower case for black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color() {
            Color::White => f.write_char(self.role().symbol()),
            Color::Black => f.write_char(self.role().symbol().to_ascii_lowercase()),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `KQRBNPkqrbnp`")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                let role = Role::from_symbol(c.to_ascii_uppercase()).ok_or(ParsePieceError)?;
                if c.is_ascii_uppercase() {
                    Ok(Piece::new(role, Color::White))
                } else {
                    Ok(Piece::new(role, Color::Black))
                }
            }

            _ => Err(ParsePieceError),
        }
    }
}

#[doc(hidden)]
impl From<sm::Piece> for Piece {
    fn from(p: sm::Piece) -> Self {
        Piece::new(p.role.into(), p.color.into())
    }
}

#[doc(hidden)]
impl From<Piece> for sm::Piece {
    fn from(p: Piece) -> Self {
        sm::Piece {
            color: p.color().into(),
            role: p.role().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn piece_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Piece>>(), size_of::<Piece>());
    }

    #[proptest]
    fn piece_has_a_color(r: Role, c: Color) {
        assert_eq!(Piece::new(r, c).color(), c);
    }

    #[proptest]
    fn piece_has_a_role(r: Role, c: Color) {
        assert_eq!(Piece::new(r, c).role(), r);
    }

    #[proptest]
    fn piece_is_sliding_if_its_role_is_sliding(p: Piece) {
        assert_eq!(p.is_sliding(), p.role().is_sliding());
    }

    #[proptest]
    fn pieces_of_a_color_have_that_color(c: Color) {
        assert_eq!(Piece::of(c).count(), 6);
        assert!(Piece::of(c).all(|p| p.color() == c));
    }

    #[proptest]
    fn parsing_printed_piece_is_an_identity(p: Piece) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn parsing_piece_fails_for_unknown_letters(
        #[filter(!"KQRBNPkqrbnp".contains(#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Piece>(), Err(ParsePieceError));
    }

    #[proptest]
    fn piece_has_an_equivalent_shakmaty_representation(p: Piece) {
        assert_eq!(Piece::from(sm::Piece::from(p)), p);
    }
}
