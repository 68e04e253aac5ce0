use crate::chess::{Board, Color, Piece, Square};
use arrayvec::ArrayVec;

const ROYAL: &[i8] = &[-17, -16, -15, -1, 1, 15, 16, 17];
const ORTHOGONAL: &[i8] = &[-16, -1, 1, 16];
const DIAGONAL: &[i8] = &[-17, -15, 15, 17];
const KNIGHT: &[i8] = &[-33, -31, -18, -14, 14, 18, 31, 33];
const WHITE_PAWN: &[i8] = &[15, 17];
const BLACK_PAWN: &[i8] = &[-17, -15];

/// The steps along which each [`Piece`] attacks, indexed by [`Piece::index`].
#[rustfmt::skip]
const DIRECTIONS: [&[i8]; 12] = [
    ROYAL, ROYAL,
    ROYAL, ROYAL,
    ORTHOGONAL, ORTHOGONAL,
    DIAGONAL, DIAGONAL,
    KNIGHT, KNIGHT,
    WHITE_PAWN, BLACK_PAWN,
];

/// The number of cells between the lowest displacement and zero.
const ORIGIN: i16 = 119;

/// For each displacement, a bitmask over [`Piece::index`] of the pieces that may move that way.
static DISPLACEMENTS: [u16; 240] = displacements();

/// For each displacement along a ray, the unit step of that ray.
static SLIDES: [i8; 240] = slides();

const fn displacements() -> [u16; 240] {
    let mut table = [0u16; 240];

    let mut p = 0;
    while p < Piece::ALL.len() {
        let reach = if Piece::ALL[p].is_sliding() { 7 } else { 1 };
        let directions = DIRECTIONS[p];
        let mut i = 0;
        while i < directions.len() {
            let mut n = 1;
            while n <= reach {
                table[(ORIGIN + directions[i] as i16 * n) as usize] |= 1 << p;
                n += 1;
            }
            i += 1;
        }
        p += 1;
    }

    table[(ORIGIN + 16) as usize] |= 1 << Piece::WhitePawn as usize;
    table[(ORIGIN - 16) as usize] |= 1 << Piece::BlackPawn as usize;

    table
}

const fn slides() -> [i8; 240] {
    let mut table = [0i8; 240];

    let mut i = 0;
    while i < ROYAL.len() {
        let mut n = 1;
        while n <= 7 {
            table[(ORIGIN + ROYAL[i] as i16 * n) as usize] = ROYAL[i];
            n += 1;
        }
        i += 1;
    }

    table
}

#[inline(always)]
fn cell(d: i8) -> usize {
    (ORIGIN + d as i16) as usize
}

/// The steps along which a [`Piece`] attacks.
#[inline(always)]
pub(crate) fn directions(p: Piece) -> &'static [i8] {
    DIRECTIONS[p.index()]
}

/// Whether a [`Piece`] may move by the displacement `d`, assuming nothing stands in its way.
///
/// Two square pawn advances and castling are not admissible displacements.
#[inline(always)]
pub(crate) fn is_admissible(p: Piece, d: i8) -> bool {
    DISPLACEMENTS[cell(d)] & (1 << p.index()) != 0
}

/// The unit step of the ray along the displacement `d`, or zero if `d` is not along a ray.
#[inline(always)]
pub(crate) fn slide(d: i8) -> i8 {
    SLIDES[cell(d)]
}

impl Board {
    /// The squares from which a [`Piece`] attacks `target`.
    ///
    /// This is meaningful even if the board doesn't correspond to a legal position.
    pub fn attackers(&self, target: Square, p: Piece) -> ArrayVec<Square, 8> {
        let reach = if p.is_sliding() { 7 } else { 1 };

        let mut attackers = ArrayVec::new();
        for &d in directions(p) {
            let mut sq = target;
            for _ in 0..reach {
                match sq.offset(-d) {
                    None => break,
                    Some(s) => sq = s,
                }

                match self[sq] {
                    None => continue,
                    Some(q) if q == p => attackers.push(sq),
                    Some(_) => {}
                }

                break;
            }
        }

        attackers
    }

    /// Whether any piece of a [`Color`] attacks `target`.
    ///
    /// This is meaningful even if the board doesn't correspond to a legal position.
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        Piece::of(by).any(|p| !self.attackers(target, p).is_empty())
    }
}
