//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth. The
//! counts are compared against published reference values.

use crate::Position;
use chess_types::Move;
use tracing::{debug, trace};

/// Counts the leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&position.do_move(m), depth - 1))
        .sum()
}

/// Perft split by root move, sorted by UCI string.
///
/// Handy for locating a generator bug by comparing against another engine.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = position
        .legal_moves()
        .iter()
        .map(|&m| {
            let nodes = subtree(position, m, depth);
            trace!(mv = %m, nodes, "perft divide");
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Perft with the root moves spread over `threads` scoped worker threads.
///
/// Positions are immutable, so workers share the root without locking.
pub fn perft_parallel(position: &Position, depth: u32, threads: usize) -> u64 {
    if depth <= 1 || threads <= 1 {
        return perft(position, depth);
    }

    let moves = position.legal_moves();
    let roots = moves.as_slice();
    if roots.is_empty() {
        return 0;
    }
    let chunk = roots.len().div_ceil(threads);
    debug!(
        roots = roots.len(),
        threads,
        chunk,
        depth,
        "splitting perft across threads"
    );

    std::thread::scope(|s| {
        let handles: Vec<_> = roots
            .chunks(chunk)
            .map(|part| {
                s.spawn(move || {
                    part.iter()
                        .map(|&m| subtree(position, m, depth))
                        .sum::<u64>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .sum()
    })
}

fn subtree(position: &Position, m: Move, depth: u32) -> u64 {
    if depth > 1 {
        perft(&position.do_move(m), depth - 1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_startpos_shallow() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 0), 1);
        assert_eq!(perft(&position, 1), 20);
        assert_eq!(perft(&position, 2), 400);
        assert_eq!(perft(&position, 3), 8902);
    }

    #[test]
    fn perft_divide_works() {
        let position = Position::startpos();
        let results = perft_divide(&position, 1);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
        assert_eq!(results[0].0, "a2a3");
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let position = Position::startpos();
        let total: u64 = perft_divide(&position, 3).iter().map(|(_, n)| n).sum();
        assert_eq!(total, 8902);
    }

    #[test]
    fn parallel_matches_serial() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft_parallel(&position, 2, 4), 2039);
        assert_eq!(perft_parallel(&position, 1, 4), 48);
        assert_eq!(perft_parallel(&Position::startpos(), 3, 3), 8902);
    }

    #[test]
    fn perft_of_mate_is_zero() {
        let position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert_eq!(perft(&position, 1), 0);
        assert_eq!(perft_parallel(&position, 3, 2), 0);
    }
}
