use crate::chess::{Color, File, Piece, Position, Promotion, Role, Square};
use derive_more::{DebugCustom, Display, Error};
use shakmaty as sm;
use std::{fmt, str::FromStr};

/// The special rules a [`MoveDescriptor`] involves, if any.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveKind {
    /// A plain displacement, possibly capturing the piece on the destination square.
    Normal,
    /// A pawn advancing two squares from its starting rank.
    TwoSquarePawnMove,
    /// A pawn capturing en passant the pawn that stands on the given square.
    EnPassant(Square),
    /// The king castling with the rook that moves between the given squares.
    Castling { rook_from: Square, rook_to: Square },
    /// A pawn reaching the last rank and becoming a piece of the given role.
    Promotion(Role),
}

/// A legal move in the context of the [`Position`] it was generated from.
///
/// Descriptors are only ever produced by the move legality rules, such as
/// [`Position::moves`] and [`Position::is_move_legal`].
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "MoveDescriptor({self})")]
#[display(fmt = "{}", "Move::from(*self)")]
pub struct MoveDescriptor {
    from: Square,
    to: Square,
    piece: Piece,
    capture: Option<Piece>,
    kind: MoveKind,
}

impl MoveDescriptor {
    #[inline(always)]
    pub(crate) fn new(
        from: Square,
        to: Square,
        piece: Piece,
        capture: Option<Piece>,
        kind: MoveKind,
    ) -> Self {
        MoveDescriptor {
            from,
            to,
            piece,
            capture,
            kind,
        }
    }

    /// The same move, but promoting to a given [`Role`].
    #[inline(always)]
    pub(crate) fn promote(self, r: Role) -> Self {
        MoveDescriptor {
            kind: MoveKind::Promotion(r),
            ..self
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn from(&self) -> Square {
        self.from
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn to(&self) -> Square {
        self.to
    }

    /// The [`Piece`] moved.
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`Role`] of the piece moved.
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.piece.role()
    }

    /// The side that plays this move.
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// The [`Piece`] captured, if any.
    #[inline(always)]
    pub fn capture(&self) -> Option<Piece> {
        self.capture
    }

    /// The special rules this move involves.
    #[inline(always)]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Whether this is a capture move.
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Whether this is a castling move.
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castling { .. })
    }

    /// Whether this is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant(_))
    }

    /// Whether this is a two square pawn advance.
    pub fn is_two_square_pawn_move(&self) -> bool {
        self.kind == MoveKind::TwoSquarePawnMove
    }

    /// Whether this is a promotion move.
    pub fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// The [`Role`] the pawn is promoted to, if this is a promotion move.
    pub fn promotion(&self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion(r) => Some(r),
            _ => None,
        }
    }

    /// The [`Piece`] standing on the destination square after this move.
    pub fn promoted_piece(&self) -> Option<Piece> {
        self.promotion().map(|r| Piece::new(r, self.color()))
    }

    /// The [`Square`] of the pawn captured en passant.
    pub fn en_passant_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant(sq) => Some(sq),
            _ => None,
        }
    }

    /// The source [`Square`] of the rook, if this is a castling move.
    pub fn rook_from(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Castling { rook_from, .. } => Some(rook_from),
            _ => None,
        }
    }

    /// The destination [`Square`] of the rook, if this is a castling move.
    pub fn rook_to(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Castling { rook_to, .. } => Some(rook_to),
            _ => None,
        }
    }

    /// The [`File`] of the pawn, if this is a two square pawn advance.
    ///
    /// This is the en passant file of the position that follows.
    pub fn two_square_pawn_move_file(&self) -> Option<File> {
        if self.is_two_square_pawn_move() {
            Some(self.to.file())
        } else {
            None
        }
    }
}

/// A chess move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, filter(#self.0 != #self.1))]
#[debug(fmt = "Move({self})")]
#[display(fmt = "{_0}{_1}{_2}")]
pub struct Move(pub Square, pub Square, pub Promotion);

impl Move {
    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The [`Promotion`] specifier.
    pub fn promotion(&self) -> Promotion {
        self.2
    }
}

impl From<MoveDescriptor> for Move {
    fn from(d: MoveDescriptor) -> Self {
        Move(d.from(), d.to(), d.promotion().into())
    }
}

/// The reason why the string is not valid move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move")]
pub struct ParseMoveError;

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<sm::uci::Uci>() {
            Ok(sm::uci::Uci::Normal {
                from,
                to,
                promotion: None,
            }) => Ok(Move(from.into(), to.into(), Promotion::None)),

            Ok(sm::uci::Uci::Normal {
                from,
                to,
                promotion: Some(r),
            }) => match Promotion::from(Some(r)) {
                Promotion::None => Err(ParseMoveError),
                p => Ok(Move(from.into(), to.into(), p)),
            },

            _ => Err(ParseMoveError),
        }
    }
}

#[doc(hidden)]
impl From<Move> for sm::uci::Uci {
    fn from(m: Move) -> Self {
        sm::uci::Uci::Normal {
            from: m.whence().into(),
            to: m.whither().into(),
            promotion: m.promotion().into(),
        }
    }
}

/// Anything that may be played in a [`Position`].
pub trait Playable: fmt::Debug + Copy + Into<Move> {
    /// The [`MoveDescriptor`] of this move in a given [`Position`], if legal.
    fn resolve(self, pos: &Position) -> Option<MoveDescriptor>;
}

/// A [`Move`] is played only after checking it's legal.
impl Playable for Move {
    fn resolve(self, pos: &Position) -> Option<MoveDescriptor> {
        pos.is_move_legal(self.whence(), self.whither(), self.promotion())
    }
}

/// A [`MoveDescriptor`] is trusted to have been generated from the same [`Position`].
///
/// Only a cheap consistency check against the board is performed.
impl Playable for MoveDescriptor {
    fn resolve(self, pos: &Position) -> Option<MoveDescriptor> {
        let capture = match self.kind {
            MoveKind::EnPassant(sq) => pos[sq],
            MoveKind::Castling { .. } => None,
            _ => pos[self.to],
        };

        if self.color() == pos.turn() && pos[self.from] == Some(self.piece) && capture == self.capture {
            Some(self)
        } else {
            None
        }
    }
}
