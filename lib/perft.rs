use crate::chess::{MoveDescriptor, Position};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Counts the leaf nodes of the tree of legal moves up to `depth` plies.
///
/// See [perft](https://www.chessprogramming.org/Perft).
pub fn perft(pos: &Position, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => pos.moves().len(),
        d => pos
            .moves()
            .par_bridge()
            .map(|m| {
                let mut next = pos.clone();
                match next.play(m) {
                    Ok(_) => perft(&next, d - 1),
                    Err(_) => 0,
                }
            })
            .sum(),
    }
}

/// Counts the leaf nodes under each legal move, in the order they are generated.
#[instrument(level = "debug", skip(pos), fields(pos = %pos))]
pub fn divide(pos: &Position, depth: u8) -> Vec<(MoveDescriptor, usize)> {
    let moves: Vec<_> = pos.moves().collect();

    moves
        .into_par_iter()
        .map(|m| {
            let mut next = pos.clone();
            let nodes = match next.play(m) {
                Ok(_) => perft(&next, depth.saturating_sub(1)),
                Err(_) => 0,
            };

            debug!(%m, nodes);
            (m, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn perft_of_starting_position_for_shallow_depths() {
        let pos = Position::default();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(perft(&pos, 3), 8902);
    }

    #[proptest]
    fn divide_adds_up_to_perft(pos: Position, #[strategy(1u8..=2)] depth: u8) {
        let total: usize = divide(&pos, depth).into_iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&pos, depth));
    }

    #[proptest]
    fn divide_lists_every_legal_move_in_order(pos: Position) {
        let moves: Vec<_> = divide(&pos, 1).into_iter().map(|(m, _)| m).collect();
        assert_eq!(moves, pos.moves().collect::<Vec<_>>());
    }

    #[proptest]
    fn perft_at_depth_one_counts_legal_moves(pos: Position) {
        assert_eq!(perft(&pos, 1), pos.moves().len());
    }
}
