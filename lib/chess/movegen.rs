use crate::chess::{attacks, Board, Color, File, MoveDescriptor, MoveKind, Piece, Position};
use crate::chess::{Promotion, Rank, Role, Square};
use std::ops::ControlFlow;

/// Tests candidate moves against the safety of the mover's king.
///
/// Candidates are tried out on a private copy of the board, which is always restored before
/// the next candidate is considered.
pub(crate) struct Probe<'a> {
    pos: &'a Position,
    board: Board,
}

impl<'a> Probe<'a> {
    pub(crate) fn new(pos: &'a Position) -> Self {
        Probe {
            pos,
            board: pos.board().clone(),
        }
    }

    /// The [`MoveDescriptor`] of the displacement from `from` to `to`, optionally capturing
    /// en passant on `victim`, if it doesn't leave the mover's king attacked.
    pub(crate) fn gate(
        &mut self,
        from: Square,
        to: Square,
        victim: Option<Square>,
    ) -> Option<MoveDescriptor> {
        let turn = self.pos.turn();
        let piece = self.board[from]?;
        let capture = self.board[victim.unwrap_or(to)];

        let king = match piece.role() {
            Role::King => to,
            _ => self.pos.king(turn)?,
        };

        if self.board.displace(from, to, victim).is_attacked(king, !turn) {
            return None;
        }

        let kind = match victim {
            Some(sq) => MoveKind::EnPassant(sq),
            None if piece.role() == Role::Pawn && (to - from).abs() == 32 => {
                MoveKind::TwoSquarePawnMove
            }
            None => MoveKind::Normal,
        };

        Some(MoveDescriptor::new(from, to, piece, capture, kind))
    }
}

#[inline(always)]
pub(crate) fn forward(side: Color) -> i8 {
    match side {
        Color::White => 16,
        Color::Black => -16,
    }
}

impl Position {
    /// The en passant target square and the square of the pawn that would be captured.
    pub(crate) fn en_passant_squares(&self) -> Option<(Square, Square)> {
        let f = self.effective_en_passant()?;
        Some((
            Square::new(f, Rank::Sixth.perspective(self.turn())),
            Square::new(f, Rank::Fifth.perspective(self.turn())),
        ))
    }

    /// The castling move of the king from `from` to `to`, if legal.
    pub(crate) fn castling(&self, from: Square, to: Square) -> Option<MoveDescriptor> {
        let turn = self.turn();
        let file = if from < to { File::H } else { File::A };
        if !self.effective_castles().has(turn, file) {
            return None;
        }

        let rook_from = Square::new(file, Rank::First.perspective(turn));
        let rook_to = Square::from_index((from.index() + to.index()) / 2)?;

        let step = if from < rook_from { 1 } else { -1 };
        let mut sq = from.offset(step)?;
        while sq != rook_from {
            if self[sq].is_some() {
                return None;
            }

            sq = sq.offset(step)?;
        }

        if [from, to, rook_to].into_iter().any(|sq| self.is_attacked(sq, !turn)) {
            return None;
        }

        let kind = MoveKind::Castling { rook_from, rook_to };
        Some(MoveDescriptor::new(from, to, self[from]?, None, kind))
    }

    /// Feeds every legal move to `sink` in board scan order, along with whether it's a
    /// promotion yet to be expanded, until `sink` breaks.
    fn generate<B, F>(&self, mut sink: F) -> ControlFlow<B>
    where
        F: FnMut(MoveDescriptor, bool) -> ControlFlow<B>,
    {
        if !self.is_legal() {
            return ControlFlow::Continue(());
        }

        let turn = self.turn();
        let last = Rank::Eighth.perspective(turn);
        let en_passant = self.en_passant_squares();
        let mut probe = Probe::new(self);

        for (from, piece) in self.board().iter().filter(|(_, p)| p.color() == turn) {
            match piece.role() {
                Role::Pawn => {
                    for &d in attacks::directions(piece) {
                        let Some(to) = from.offset(d) else {
                            continue;
                        };

                        let candidate = match (self[to], en_passant) {
                            (Some(p), _) if p.color() != turn => probe.gate(from, to, None),
                            (None, Some((target, victim))) if target == to => {
                                probe.gate(from, to, Some(victim))
                            }
                            _ => None,
                        };

                        if let Some(m) = candidate {
                            sink(m, to.rank() == last)?;
                        }
                    }

                    let Some(to) = from.offset(forward(turn)).filter(|&sq| self[sq].is_none()) else {
                        continue;
                    };

                    if let Some(m) = probe.gate(from, to, None) {
                        sink(m, to.rank() == last)?;
                    }

                    if from.rank() == Rank::Second.perspective(turn) {
                        if let Some(to) = to.offset(forward(turn)).filter(|&sq| self[sq].is_none()) {
                            if let Some(m) = probe.gate(from, to, None) {
                                sink(m, false)?;
                            }
                        }
                    }
                }

                role => {
                    let reach = if piece.is_sliding() { 7 } else { 1 };
                    for &d in attacks::directions(piece) {
                        let mut to = from;
                        for _ in 0..reach {
                            match to.offset(d) {
                                None => break,
                                Some(sq) => to = sq,
                            }

                            if self[to].map(Piece::color) != Some(turn) {
                                if let Some(m) = probe.gate(from, to, None) {
                                    sink(m, false)?;
                                }
                            }

                            if self[to].is_some() {
                                break;
                            }
                        }
                    }

                    if role == Role::King && !self.castles().is_empty(turn) {
                        for d in [-2, 2] {
                            if let Some(m) = from.offset(d).and_then(|to| self.castling(from, to)) {
                                sink(m, false)?;
                            }
                        }
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// An iterator over the legal moves that can be played in this position.
    ///
    /// Moves are listed in board scan order, starting from `a1`, with promotions expanded in
    /// the order [`Role::PROMOTIONS`].
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = MoveDescriptor> + ExactSizeIterator {
        let mut moves = Vec::new();

        let _ = self.generate(|m, promotes| -> ControlFlow<()> {
            if promotes {
                moves.extend(Role::PROMOTIONS.map(|r| m.promote(r)));
            } else {
                moves.push(m);
            }

            ControlFlow::Continue(())
        });

        moves.into_iter()
    }

    /// Whether there is at least one legal move in this position.
    pub fn has_move(&self) -> bool {
        self.generate(|_, _| ControlFlow::Break(())).is_break()
    }

    /// The [`MoveDescriptor`] of the move from `from` to `to`, if legal in this position.
    ///
    /// A [`Promotion`] must be specified if and only if a pawn reaches the last rank.
    pub fn is_move_legal(
        &self,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> Option<MoveDescriptor> {
        if !self.is_legal() {
            return None;
        }

        let turn = self.turn();
        let piece = self[from].filter(|p| p.color() == turn)?;
        let push = forward(turn);
        let d = to - from;

        let mut two_square = false;
        if !attacks::is_admissible(piece, d) {
            match piece.role() {
                Role::Pawn if d == 2 * push && from.rank() == Rank::Second.perspective(turn) => {
                    two_square = true
                }

                Role::King if (d == 2 || d == -2) && promotion == Promotion::None => {
                    return self.castling(from, to);
                }

                _ => return None,
            }
        }

        let mut victim = None;
        match (piece.role(), self[to]) {
            (_, Some(p)) if p.color() == turn => return None,
            (Role::Pawn, Some(_)) if d == push || two_square => return None,
            (Role::Pawn, None) if d != push && !two_square => {
                let (target, sq) = self.en_passant_squares()?;
                if target != to {
                    return None;
                }

                victim = Some(sq);
            }
            _ => {}
        }

        if piece.is_sliding() {
            let step = attacks::slide(d);
            let mut sq = from.offset(step)?;
            while sq != to {
                if self[sq].is_some() {
                    return None;
                }

                sq = sq.offset(step)?;
            }
        } else if two_square && self[from.offset(push)?].is_some() {
            return None;
        }

        let m = Probe::new(self).gate(from, to, victim)?;

        let promotes = piece.role() == Role::Pawn && to.rank() == Rank::Eighth.perspective(turn);
        match (promotes, Option::<Role>::from(promotion)) {
            (true, Some(r)) => Some(m.promote(r)),
            (false, None) => Some(m),
            _ => None,
        }
    }
}
