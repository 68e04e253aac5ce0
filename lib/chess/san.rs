use crate::chess::movegen::{forward, Probe};
use crate::chess::{Color, File, MoveDescriptor, Piece, Position, Rank, Role, Square};
use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::instrument;

static SAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(O-O-O)|(O-O)",
        r"|([KQRBN])([a-h])?([1-8])?(x)?([a-h][1-8])",
        r"|(?:([a-h])(x)?)?([a-h][1-8])(?:(=)?([KQRBNP]))?)",
        r"([\+#])?$"
    ))
    .expect("valid regular expression")
});

/// The reason why a string is not a valid [algebraic notation] of a move in a [`Position`].
///
/// [algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum SanError {
    #[display(fmt = "syntax error")]
    InvalidSyntax,

    #[display(fmt = "the position is illegal")]
    IllegalPosition,

    #[display(fmt = "king-side castling is not possible")]
    IllegalKingSideCastling,

    #[display(fmt = "queen-side castling is not possible")]
    IllegalQueenSideCastling,

    #[display(fmt = "a piece cannot capture another of its own color")]
    CaptureOwnPiece,

    #[display(fmt = "no {_0:?} can move to {_1}")]
    NoPieceCanMoveTo(Role, Square),

    #[display(fmt = "no {_0:?} matching the disambiguation can move to {_1}")]
    NoPieceCanMoveToWithDisambiguation(Role, Square),

    #[display(fmt = "more than one {_0:?} can move to {_1}")]
    RequireDisambiguation(Role, Square),

    #[display(fmt = "the {_0} king would be left in check")]
    KingNotSafe(#[error(not(source))] Color),

    #[display(fmt = "invalid capturing pawn move")]
    InvalidCapturingPawnMove,

    #[display(fmt = "invalid non-capturing pawn move")]
    InvalidNonCapturingPawnMove,

    #[display(fmt = "the promoted piece is missing")]
    MissingPromotion,

    #[display(fmt = "a pawn cannot be promoted to a {_0:?}")]
    InvalidPromotedPiece(#[error(not(source))] Role),

    #[display(fmt = "promotion is only possible on the last rank")]
    IllegalPromotion,

    #[display(fmt = "the promotion symbol `=` is missing")]
    MissingPromotionSymbol,

    #[display(fmt = "the capture symbol `x` is missing")]
    MissingCaptureSymbol,

    #[display(fmt = "unexpected capture symbol `x`")]
    InvalidCaptureSymbol,

    #[display(fmt = "expected disambiguation `{expected}`, but found `{observed}`")]
    WrongDisambiguationSymbol { expected: String, observed: String },

    #[display(fmt = "expected check suffix `{expected}`, but found `{observed}`")]
    WrongCheckCheckmateSymbol { expected: String, observed: String },
}

/// Represents a string that cannot be parsed into a legal move in a [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "`{notation}` is not a valid move: {reason}")]
pub struct InvalidNotation {
    pub notation: String,
    #[error(source)]
    pub reason: SanError,
}

impl Position {
    /// The [algebraic notation] of a [`MoveDescriptor`] generated from this position.
    ///
    /// [algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation
    pub fn notation(&self, m: &MoveDescriptor) -> String {
        let mut san = if m.is_castling() {
            if m.from() < m.to() { "O-O" } else { "O-O-O" }.to_string()
        } else if m.role() == Role::Pawn {
            let mut san = String::new();

            if m.is_capture() {
                san.push_str(&m.from().file().to_string());
                san.push('x');
            }

            san.push_str(&m.to().to_string());

            if let Some(r) = m.promotion() {
                san.push('=');
                san.push(r.symbol());
            }

            san
        } else {
            let mut san = m.role().symbol().to_string();
            san.push_str(&self.disambiguation(m));
            if m.is_capture() {
                san.push('x');
            }

            san.push_str(&m.to().to_string());
            san
        };

        san.push_str(self.check_suffix(m));
        san
    }

    /// Parses the [algebraic notation] of a move legal in this position.
    ///
    /// In strict mode, the notation must match exactly what [`Self::notation`] prints, including
    /// the disambiguation, the capture and promotion symbols, and the check suffix.
    ///
    /// [algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation
    #[instrument(level = "trace", skip(self), err)]
    pub fn parse_notation(&self, s: &str, strict: bool) -> Result<MoveDescriptor, InvalidNotation> {
        self.resolve_notation(s, strict)
            .map_err(|reason| InvalidNotation {
                notation: s.to_string(),
                reason,
            })
    }

    fn resolve_notation(&self, s: &str, strict: bool) -> Result<MoveDescriptor, SanError> {
        let caps = SAN.captures(s).ok_or(SanError::InvalidSyntax)?;
        if !self.is_legal() {
            return Err(SanError::IllegalPosition);
        }

        let m = if caps.get(1).is_some() || caps.get(2).is_some() {
            self.castling_notation(caps.get(2).is_some())?
        } else if caps.get(3).is_some() {
            self.piece_notation(&caps, strict)?
        } else {
            self.pawn_notation(&caps, strict)?
        };

        if strict {
            let captures = caps.get(6).is_some() || caps.get(9).is_some();
            match (m.is_capture(), captures) {
                (true, false) => return Err(SanError::MissingCaptureSymbol),
                (false, true) => return Err(SanError::InvalidCaptureSymbol),
                _ => {}
            }

            let expected = self.check_suffix(&m);
            let observed = caps.get(13).map_or("", |c| c.as_str());
            if expected != observed {
                return Err(SanError::WrongCheckCheckmateSymbol {
                    expected: expected.to_string(),
                    observed: observed.to_string(),
                });
            }
        }

        Ok(m)
    }

    fn castling_notation(&self, kingside: bool) -> Result<MoveDescriptor, SanError> {
        let illegal = if kingside {
            SanError::IllegalKingSideCastling
        } else {
            SanError::IllegalQueenSideCastling
        };

        let Some(from) = self.king(self.turn()) else {
            return Err(illegal);
        };

        match from.offset(if kingside { 2 } else { -2 }) {
            Some(to) => self.castling(from, to).ok_or(illegal),
            None => Err(illegal),
        }
    }

    fn piece_notation(&self, caps: &Captures, strict: bool) -> Result<MoveDescriptor, SanError> {
        let turn = self.turn();
        let role = symbol(caps, 3)
            .and_then(Role::from_symbol)
            .ok_or(SanError::InvalidSyntax)?;

        let to = square(caps, 7)?;
        if self[to].map(Piece::color) == Some(turn) {
            return Err(SanError::CaptureOwnPiece);
        }

        let file = symbol(caps, 4).and_then(|c| File::new(c as u8 - b'a'));
        let rank = symbol(caps, 5).and_then(|c| Rank::new(c as u8 - b'1'));

        let mut candidates = self
            .attackers(to, Piece::new(role, turn))
            .into_iter()
            .filter(|sq| file.map_or(true, |f| sq.file() == f))
            .filter(|sq| rank.map_or(true, |r| sq.rank() == r))
            .peekable();

        if candidates.peek().is_none() {
            return Err(match (file, rank) {
                (None, None) => SanError::NoPieceCanMoveTo(role, to),
                _ => SanError::NoPieceCanMoveToWithDisambiguation(role, to),
            });
        }

        let mut probe = Probe::new(self);
        let mut found = None;
        for from in candidates {
            if let Some(m) = probe.gate(from, to, None) {
                if found.replace(m).is_some() {
                    return Err(SanError::RequireDisambiguation(role, to));
                }
            }
        }

        let m = found.ok_or(SanError::KingNotSafe(turn))?;

        if strict {
            let expected = self.disambiguation(&m);
            let observed = [4, 5]
                .into_iter()
                .filter_map(|i| caps.get(i))
                .map(|c| c.as_str())
                .collect::<String>();

            if expected != observed {
                return Err(SanError::WrongDisambiguationSymbol { expected, observed });
            }
        }

        Ok(m)
    }

    fn pawn_notation(&self, caps: &Captures, strict: bool) -> Result<MoveDescriptor, SanError> {
        let turn = self.turn();
        let to = square(caps, 10)?;

        let m = match symbol(caps, 8) {
            Some(c) => {
                let file = File::new(c as u8 - b'a').ok_or(SanError::InvalidSyntax)?;
                self.pawn_capture(file, to)?
            }

            None => self.pawn_advance(to)?,
        };

        let m = m.ok_or(SanError::KingNotSafe(turn))?;

        if to.rank() == Rank::Eighth.perspective(turn) {
            let c = symbol(caps, 12).ok_or(SanError::MissingPromotion)?;
            let r = Role::from_symbol(c).ok_or(SanError::InvalidSyntax)?;
            if !r.is_promotable() {
                return Err(SanError::InvalidPromotedPiece(r));
            } else if strict && caps.get(11).is_none() {
                return Err(SanError::MissingPromotionSymbol);
            }

            Ok(m.promote(r))
        } else if caps.get(12).is_some() {
            Err(SanError::IllegalPromotion)
        } else {
            Ok(m)
        }
    }

    /// A pawn capture from the adjacent `file` onto `to`, unless it leaves the king in check.
    fn pawn_capture(&self, file: File, to: Square) -> Result<Option<MoveDescriptor>, SanError> {
        let turn = self.turn();
        let from = match to.file() - file {
            1 => to.offset(-forward(turn) - 1),
            -1 => to.offset(-forward(turn) + 1),
            _ => None,
        };

        let Some(from) = from.filter(|&sq| self[sq] == Some(Piece::new(Role::Pawn, turn))) else {
            return Err(SanError::InvalidCapturingPawnMove);
        };

        match (self[to], self.en_passant_squares()) {
            (Some(p), _) if p.color() != turn => Ok(Probe::new(self).gate(from, to, None)),
            (None, Some((target, victim))) if target == to => {
                Ok(Probe::new(self).gate(from, to, Some(victim)))
            }
            _ => Err(SanError::InvalidCapturingPawnMove),
        }
    }

    /// A pawn advance onto `to`, unless it leaves the king in check.
    fn pawn_advance(&self, to: Square) -> Result<Option<MoveDescriptor>, SanError> {
        let turn = self.turn();
        let pawn = Some(Piece::new(Role::Pawn, turn));

        let Some(from) = to.offset(-forward(turn)).filter(|_| self[to].is_none()) else {
            return Err(SanError::InvalidNonCapturingPawnMove);
        };

        if self[from] == pawn {
            return Ok(Probe::new(self).gate(from, to, None));
        }

        let origin = from
            .offset(-forward(turn))
            .filter(|&sq| self[from].is_none() && self[sq] == pawn)
            .filter(|sq| sq.rank() == Rank::Second.perspective(turn));

        match origin {
            Some(sq) => Ok(Probe::new(self).gate(sq, to, None)),
            None => Err(SanError::InvalidNonCapturingPawnMove),
        }
    }

    /// The origin file, rank or square needed to tell `m` apart from moves of other pieces of
    /// the same kind onto the same square.
    fn disambiguation(&self, m: &MoveDescriptor) -> String {
        let from = m.from();
        let mut probe = Probe::new(self);
        let (mut ambiguous, mut same_file, mut same_rank) = (false, false, false);

        for sq in self.attackers(m.to(), m.piece()) {
            if sq != from && probe.gate(sq, m.to(), None).is_some() {
                ambiguous = true;
                same_file |= sq.file() == from.file();
                same_rank |= sq.rank() == from.rank();
            }
        }

        match (ambiguous, same_file, same_rank) {
            (false, _, _) => String::new(),
            (true, false, _) => from.file().to_string(),
            (true, true, false) => from.rank().to_string(),
            (true, true, true) => from.to_string(),
        }
    }

    /// `+` if `m` gives check, `#` if it gives checkmate.
    fn check_suffix(&self, m: &MoveDescriptor) -> &'static str {
        let mut next = self.clone();
        next.apply(*m);

        if !next.is_check() {
            ""
        } else if next.has_move() {
            "+"
        } else {
            "#"
        }
    }
}

fn symbol(caps: &Captures, i: usize) -> Option<char> {
    caps.get(i)?.as_str().chars().next()
}

fn square(caps: &Captures, i: usize) -> Result<Square, SanError> {
    caps.get(i)
        .ok_or(SanError::InvalidSyntax)?
        .as_str()
        .parse()
        .map_err(|_| SanError::InvalidSyntax)
}
