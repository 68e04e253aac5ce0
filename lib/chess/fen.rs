use crate::chess::{Board, Castles, Color, Piece, Position, Rank, Square};
use derive_more::{Display, Error, From};
use shakmaty as sm;
use std::{fmt, str::FromStr};

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    InvalidFen(InvalidFen),
}

/// The reason why the string is not valid FEN.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum InvalidFen {
    #[display(fmt = "syntax error at the piece placement field")]
    InvalidPlacement,
    #[display(fmt = "syntax error at the side to move field")]
    InvalidTurn,
    #[display(fmt = "syntax error at the castling rights field")]
    InvalidCastlingRights,
    #[display(fmt = "syntax error at the en passant square field")]
    InvalidEnPassantSquare,
    #[display(fmt = "syntax error at the halfmove clock field")]
    InvalidHalfmoveClock,
    #[display(fmt = "syntax error at the fullmove counter field")]
    InvalidFullmoves,
    #[display(fmt = "unspecified syntax error")]
    InvalidSyntax,
}

#[doc(hidden)]
impl From<sm::fen::ParseFenError> for InvalidFen {
    fn from(e: sm::fen::ParseFenError) -> Self {
        use InvalidFen::*;
        match e {
            sm::fen::ParseFenError::InvalidBoard => InvalidPlacement,
            sm::fen::ParseFenError::InvalidTurn => InvalidTurn,
            sm::fen::ParseFenError::InvalidCastling => InvalidCastlingRights,
            sm::fen::ParseFenError::InvalidEpSquare => InvalidEnPassantSquare,
            sm::fen::ParseFenError::InvalidHalfmoveClock => InvalidHalfmoveClock,
            sm::fen::ParseFenError::InvalidFullmoves => InvalidFullmoves,
            _ => InvalidSyntax,
        }
    }
}

/// Parses a position in [X-FEN].
///
/// The position need not be legal, but the en passant square must be on the sixth rank from
/// the perspective of the side to move. Move counters are accepted and discarded.
///
/// [X-FEN]: https://www.chessprogramming.org/X-FEN
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fen: sm::fen::Fen = s.parse().map_err(InvalidFen::from)?;
        let setup = sm::Setup::from(fen);
        let turn = Color::from(setup.turn);

        let mut board = Board::empty();
        for (sq, p) in &setup.board {
            board[sq.into()] = Some(p.into());
        }

        let mut castles = Castles::none();
        for sq in setup.castling_rights.into_iter().map(Square::from) {
            match sq.rank() {
                Rank::First => castles.insert(Color::White, sq.file()),
                Rank::Eighth => castles.insert(Color::Black, sq.file()),
                _ => return Err(InvalidFen::InvalidCastlingRights.into()),
            }
        }

        let en_passant = match setup.ep_square.map(Square::from) {
            None => None,
            Some(sq) if sq.rank() == Rank::Sixth.perspective(turn) => Some(sq.file()),
            Some(_) => return Err(InvalidFen::InvalidEnPassantSquare.into()),
        };

        Ok(Position::new(board, turn, castles, en_passant))
    }
}

/// Prints the position in [X-FEN], with move counters fixed to `0 1`.
///
/// [X-FEN]: https://www.chessprogramming.org/X-FEN
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board: sm::Board = self
            .board()
            .iter()
            .map(|(sq, p): (Square, Piece)| (sq.into(), p.into()))
            .collect();

        let mut castling_rights = sm::Bitboard::EMPTY;
        for c in Color::iter() {
            for file in self.castles().files(c) {
                let sq = Square::new(file, Rank::First.perspective(c));
                castling_rights |= sm::Bitboard::from(sm::Square::from(sq));
            }
        }

        let ep_square = self
            .en_passant()
            .map(|file| Square::new(file, Rank::Sixth.perspective(self.turn())).into());

        let setup = sm::Setup {
            board,
            turn: self.turn().into(),
            castling_rights,
            ep_square,
            ..sm::Setup::empty()
        };

        write!(f, "{}", sm::fen::Fen(setup))
    }
}
