use crate::chess::{Board, Castles, Color, File, Move, MoveDescriptor, MoveKind, Outcome};
use crate::chess::{Piece, Playable, Rank, Role, Square};
use arrayvec::ArrayVec;
use derive_more::{DebugCustom, Display, Error};
use proptest::sample::{Selector, SelectorStrategy};
use proptest::{prelude::*, strategy::Map};
use std::ops::{Index, Range};
use test_strategy::Arbitrary;
use tracing::instrument;

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{_0}` is illegal in this position")]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// Represents an impossible [null-move] in a given [`Position`].
///
/// [null-move]: https://www.chessprogramming.org/Null_Move
#[derive(Debug, Display, Clone, Eq, PartialEq, Arbitrary, Error)]
#[display(fmt = "passing the turn is illegal in this position")]
pub struct IllegalNullMove;

/// The state of a chess game between two moves.
///
/// Any arrangement of pieces is representable, but only [legal](`Self::is_legal`) positions
/// have moves.
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Position({self})")]
pub struct Position {
    board: Board,
    turn: Color,
    castles: Castles,
    en_passant: Option<File>,
    kings: [Option<Square>; 2],
}

/// The standard starting position.
impl Default for Position {
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        for (f, r) in File::iter().zip([Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]) {
            for c in Color::iter() {
                board[Square::new(f, Rank::First.perspective(c))] = Some(Piece::new(r, c));
                board[Square::new(f, Rank::Second.perspective(c))] = Some(Piece::new(Pawn, c));
            }
        }

        Position::new(board, Color::White, Castles::all(), None)
    }
}

impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Position>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..256, any::<Selector>()).prop_map(|(moves, selector)| {
            let mut pos = Position::default();

            for _ in 0..moves {
                match selector.try_select(pos.moves()) {
                    Some(d) if pos.play(d).is_ok() => continue,
                    _ => break,
                }
            }

            pos
        })
    }
}

fn find_king(board: &Board, side: Color) -> Option<Square> {
    let mut kings = board.by_piece(Piece::new(Role::King, side));
    match (kings.next(), kings.next()) {
        (Some(sq), None) => Some(sq),
        _ => None,
    }
}

impl Position {
    /// Constructs [`Position`] from its parts.
    ///
    /// The position need not be legal.
    pub fn new(board: Board, turn: Color, castles: Castles, en_passant: Option<File>) -> Self {
        let kings = [
            find_king(&board, Color::White),
            find_king(&board, Color::Black),
        ];

        Position {
            board,
            turn,
            castles,
            en_passant,
            kings,
        }
    }

    /// A position without pieces, white to move.
    pub fn empty() -> Self {
        Position::new(Board::empty(), Color::White, Castles::none(), None)
    }

    /// The piece placement.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The castling rights, as recorded.
    #[inline(always)]
    pub fn castles(&self) -> Castles {
        self.castles
    }

    /// The file of the pawn that just advanced two squares, as recorded.
    #[inline(always)]
    pub fn en_passant(&self) -> Option<File> {
        self.en_passant
    }

    /// The [`Square`] of the king of a side, if there is exactly one.
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        self.kings[side.index()]
    }

    /// Places a piece on a [`Square`], or clears it.
    pub fn set_piece(&mut self, sq: Square, p: Option<Piece>) {
        let previous = std::mem::replace(&mut self.board[sq], p);
        for side in Color::iter() {
            let king = Some(Piece::new(Role::King, side));
            if previous == king || p == king {
                self.kings[side.index()] = find_king(&self.board, side);
            }
        }
    }

    /// Sets the side to move.
    pub fn set_turn(&mut self, side: Color) {
        self.turn = side;
    }

    /// Sets the castling rights.
    pub fn set_castles(&mut self, castles: Castles) {
        self.castles = castles;
    }

    /// Sets the en passant file.
    pub fn set_en_passant(&mut self, f: Option<File>) {
        self.en_passant = f;
    }

    /// The en passant file, if a pawn may actually be captured en passant.
    ///
    /// A recorded en passant file is only honored if a pawn of the side not to move stands
    /// where it would have landed after advancing two squares, while both the square it
    /// skipped and the square it came from are empty.
    pub fn effective_en_passant(&self) -> Option<File> {
        let f = self.en_passant?;
        let target = Square::new(f, Rank::Sixth.perspective(self.turn));
        let victim = Square::new(f, Rank::Fifth.perspective(self.turn));
        let origin = Square::new(f, Rank::Seventh.perspective(self.turn));

        let pawn = Some(Piece::new(Role::Pawn, !self.turn));
        if self[victim] == pawn && self[target].is_none() && self[origin].is_none() {
            Some(f)
        } else {
            None
        }
    }

    /// The castling rights that may actually be exercised.
    ///
    /// A recorded right is only honored if the king stands on its starting square and a rook of
    /// the same color stands on the flagged file of the back rank.
    pub fn effective_castles(&self) -> Castles {
        let mut castles = self.castles;

        for side in Color::iter() {
            let home = Rank::First.perspective(side);
            let king = Square::new(File::E, home);
            let rook = Some(Piece::new(Role::Rook, side));

            for f in self.castles.files(side) {
                if self[king] != Some(Piece::new(Role::King, side))
                    || self[Square::new(f, home)] != rook
                {
                    castles.remove(side, f);
                }
            }
        }

        castles
    }

    /// Whether this position is legal.
    ///
    /// A legal position has exactly one king of each color, no pawns on the first or last rank,
    /// and the side not to move is not in check.
    pub fn is_legal(&self) -> bool {
        let (Some(_), Some(theirs)) = (self.king(self.turn), self.king(!self.turn)) else {
            return false;
        };

        let pawns_on_back_rank = [Rank::First, Rank::Eighth].into_iter().any(|r| {
            File::iter().any(|f| self[Square::new(f, r)].map(Piece::role) == Some(Role::Pawn))
        });

        !pawns_on_back_rank && !self.board.is_attacked(theirs, self.turn)
    }

    /// Whether any piece of a [`Color`] attacks a [`Square`].
    ///
    /// This is meaningful even if the position is not legal.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.board.is_attacked(sq, by)
    }

    /// The squares from which a [`Piece`] attacks a [`Square`].
    ///
    /// This is meaningful even if the position is not legal.
    pub fn attackers(&self, sq: Square, p: Piece) -> ArrayVec<Square, 8> {
        self.board.attackers(sq, p)
    }

    /// Whether the king of the side to move is attacked, assuming the position is legal.
    fn is_king_attacked(&self) -> bool {
        match self.king(self.turn) {
            Some(sq) => self.board.is_attacked(sq, !self.turn),
            None => false,
        }
    }

    /// Whether this position is a [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        self.is_legal() && self.is_king_attacked()
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_move()
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        self.is_legal() && !self.is_king_attacked() && !self.has_move()
    }

    /// The [`Outcome`] of the game in case this position is final.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_legal() || self.has_move() {
            None
        } else if self.is_king_attacked() {
            Some(Outcome::Checkmate(!self.turn))
        } else {
            Some(Outcome::Stalemate)
        }
    }

    /// Play a move if legal in this position.
    ///
    /// Either a [`Move`], which is checked for legality, or a [`MoveDescriptor`] previously
    /// obtained from this same position.
    #[instrument(level = "trace", skip(self), err)]
    pub fn play<M: Playable>(&mut self, m: M) -> Result<MoveDescriptor, IllegalMove> {
        let d = m.resolve(self).ok_or_else(|| IllegalMove(m.into()))?;
        self.apply(d);
        Ok(d)
    }

    pub(crate) fn apply(&mut self, d: MoveDescriptor) {
        let turn = self.turn;

        self.board[d.from()] = None;
        match d.kind() {
            MoveKind::EnPassant(victim) => self.board[victim] = None,
            MoveKind::Castling { rook_from, rook_to } => {
                self.board[rook_from] = None;
                self.board[rook_to] = Some(Piece::new(Role::Rook, turn));
            }
            _ => {}
        }

        self.board[d.to()] = Some(d.promoted_piece().unwrap_or_else(|| d.piece()));

        if d.role() == Role::King {
            self.castles.clear(turn);
            self.kings[turn.index()] = Some(d.to());
        }

        for sq in [d.from(), d.to()] {
            match sq.rank() {
                Rank::First => self.castles.remove(Color::White, sq.file()),
                Rank::Eighth => self.castles.remove(Color::Black, sq.file()),
                _ => {}
            }
        }

        self.en_passant = d.two_square_pawn_move_file();
        self.turn = !turn;
    }

    /// Whether passing the turn is legal in this position.
    pub fn is_null_move_legal(&self) -> bool {
        self.is_legal() && !self.is_king_attacked()
    }

    /// Play a [null-move] if legal in this position.
    ///
    /// [null-move]: https://www.chessprogramming.org/Null_Move
    #[instrument(level = "trace", skip(self), err)]
    pub fn play_null_move(&mut self) -> Result<(), IllegalNullMove> {
        if self.is_null_move_legal() {
            self.turn = !self.turn;
            self.en_passant = None;
            Ok(())
        } else {
            Err(IllegalNullMove)
        }
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Position {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.board[sq]
    }
}
