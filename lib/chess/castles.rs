use crate::chess::{Color, File};
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// The castling rights in a chess [`Position`][`crate::chess::Position`].
///
/// For each side, a bitmask over the [`File`]s of the rooks still eligible to castle, so that
/// rooks need not start in the corners.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[debug(fmt = "Castles({self})")]
pub struct Castles([u8; 2]);

impl Castles {
    /// No castling rights.
    #[inline(always)]
    pub const fn none() -> Self {
        Castles([0, 0])
    }

    /// Castling rights on both wings for both sides.
    #[inline(always)]
    pub const fn all() -> Self {
        let wings = 1 << File::A as u8 | 1 << File::H as u8;
        Castles([wings, wings])
    }

    /// The raw bitmask over files of a side.
    #[inline(always)]
    pub const fn bits(&self, side: Color) -> u8 {
        self.0[side as usize]
    }

    /// Whether a side retains no castling rights at all.
    #[inline(always)]
    pub const fn is_empty(&self, side: Color) -> bool {
        self.bits(side) == 0
    }

    /// Whether a side may castle with the rook on a given [`File`].
    #[inline(always)]
    pub const fn has(&self, side: Color, f: File) -> bool {
        self.bits(side) & (1 << f as u8) != 0
    }

    /// Grants a side the right to castle with the rook on a given [`File`].
    #[inline(always)]
    pub fn insert(&mut self, side: Color, f: File) {
        self.0[side.index()] |= 1 << f.index();
    }

    /// Revokes the right of a side to castle with the rook on a given [`File`].
    #[inline(always)]
    pub fn remove(&mut self, side: Color, f: File) {
        self.0[side.index()] &= !(1 << f.index());
    }

    /// Revokes all castling rights of a side.
    #[inline(always)]
    pub fn clear(&mut self, side: Color) {
        self.0[side.index()] = 0;
    }

    /// An iterator over the rook files a side may castle with, from `h` to `a`.
    pub fn files(&self, side: Color) -> impl Iterator<Item = File> + '_ {
        File::iter().rev().filter(move |&f| self.has(side, f))
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

/// Prints the castling field of X-FEN.
///
/// Rights on the `h` and `a` files print as `K`/`Q`, any other file prints as its letter.
impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty(Color::White) && self.is_empty(Color::Black) {
            return f.write_char('-');
        }

        for side in Color::iter() {
            for file in self.files(side) {
                let c = match file {
                    File::H => 'K',
                    File::A => 'Q',
                    _ => (b'A' + file.index()) as char,
                };

                match side {
                    Color::White => f.write_char(c)?,
                    Color::Black => f.write_char(c.to_ascii_lowercase())?,
                }
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse castling rights, expected `-` or letters among `KQkq`, `A-H` and `a-h`")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castles = Castles::none();

        if s == "-" {
            return Ok(castles);
        } else if s.is_empty() {
            return Err(ParseCastlesError);
        }

        for c in s.chars() {
            let side = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };

            let file = match c.to_ascii_lowercase() {
                'k' => File::H,
                'q' => File::A,
                l @ 'a'..='h' => File::new(l as u8 - b'a').ok_or(ParseCastlesError)?,
                _ => return Err(ParseCastlesError),
            };

            castles.insert(side, file);
        }

        Ok(castles)
    }
}
