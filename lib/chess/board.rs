use crate::chess::{File, Piece, Rank, Square};
use derive_more::DebugCustom;
use proptest::collection::{vec, VecStrategy};
use proptest::{prelude::*, strategy::Map};
use std::fmt::{self, Write};
use std::ops::{Deref, Index, IndexMut};

/// The piece placement on the chess board.
///
/// Cells are laid out on the padded grid described by [`Square`], so the 64 cells that do not
/// correspond to any [`Square`] are unreachable and always empty.
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board({self})")]
pub struct Board([Option<Piece>; Square::CELLS]);

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board without any pieces.
    pub const fn empty() -> Self {
        Board([None; Square::CELLS])
    }

    /// An iterator over all pieces on the board, rank by rank starting from `a1`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self[sq]?)))
    }

    /// The squares occupied by a given [`Piece`].
    pub fn by_piece(&self, p: Piece) -> impl Iterator<Item = Square> + '_ {
        self.iter().filter(move |&(_, q)| q == p).map(|(sq, _)| sq)
    }

    /// Temporarily moves the piece on `from` to `to`, optionally clearing `victim` as well.
    ///
    /// The board is restored when the returned guard goes out of scope.
    pub fn displace(&mut self, from: Square, to: Square, victim: Option<Square>) -> Displaced<'_> {
        let piece = self[from].take();
        let captured = std::mem::replace(&mut self[to], piece);
        let victim = victim.map(|sq| (sq, self[sq].take()));

        Displaced {
            board: self,
            from,
            to,
            piece,
            captured,
            victim,
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq.index() as usize]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.0[sq.index() as usize]
    }
}

/// Prints the piece placement field of FEN.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in Rank::iter().rev() {
            let mut skip = 0;
            for sq in File::iter().map(|f| Square::new(f, r)) {
                match self[sq] {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{skip}")?;
                            skip = 0;
                        }

                        write!(f, "{p}")?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{skip}")?;
            }

            if r != Rank::First {
                f.write_char('/')?;
            }
        }

        Ok(())
    }
}

impl Arbitrary for Board {
    type Parameters = ();
    type Strategy = Map<
        VecStrategy<<Option<Piece> as Arbitrary>::Strategy>,
        fn(Vec<Option<Piece>>) -> Board,
    >;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        vec(any::<Option<Piece>>(), 64).prop_map(|cells| {
            let mut board = Board::empty();
            for (sq, p) in Square::iter().zip(cells) {
                board[sq] = p;
            }

            board
        })
    }
}

/// A [`Board`] with a piece temporarily displaced.
///
/// Dropping this guard puts every cell it touched back the way it was.
pub struct Displaced<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    piece: Option<Piece>,
    captured: Option<Piece>,
    victim: Option<(Square, Option<Piece>)>,
}

impl Deref for Displaced<'_> {
    type Target = Board;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl Drop for Displaced<'_> {
    fn drop(&mut self) {
        self.board[self.to] = self.captured;
        self.board[self.from] = self.piece;
        if let Some((sq, p)) = self.victim {
            self.board[sq] = p;
        }
    }
}
