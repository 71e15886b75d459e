//! Naive path improvement by inserting unused tiles between adjacent pairs.
//!
//! A post-processor for search output: given a valid path on board 1..=n, try
//! to splice each unused tile between some adjacent pair it links to on both
//! sides. One pass rarely finds everything, so callers typically loop while
//! the path keeps growing; the unused tiles are tried in shuffled order, so
//! repeated passes explore different insertions.

use crate::graph::{linked, Tile};
use rand::seq::SliceRandom;
use rand::Rng;

/// Checks that `path` is a simple divisibility path on board 1..=n.
///
/// # Errors
/// Returns a message naming the offending tile or pair.
pub fn validate_path(path: &[Tile], n: usize) -> Result<(), String> {
    let mut in_path = vec![false; n + 1];
    for &tile in path {
        if tile == 0 || tile > n {
            return Err(format!("tile {tile} is outside the board 1..={n}"));
        }
        if in_path[tile] {
            return Err(format!("tile {tile} appears more than once"));
        }
        in_path[tile] = true;
    }
    for w in path.windows(2) {
        if !linked(w[0], w[1]) {
            return Err(format!("{} and {} are not linked", w[0], w[1]));
        }
    }
    Ok(())
}

/// One improvement pass: walks adjacent pairs and inserts the first unused
/// tile (in shuffled order) that links to both sides.
///
/// The result is always a valid path containing every tile of the input, in
/// the input's order, and is never shorter.
///
/// # Errors
/// Returns a message if the input is not a valid path (see [`validate_path`]).
pub fn improve<R: Rng + ?Sized>(
    path: &[Tile],
    n: usize,
    rng: &mut R,
) -> Result<Vec<Tile>, String> {
    validate_path(path, n)?;

    let mut unused: Vec<Tile> = (1..=n).filter(|t| !path.contains(t)).collect();
    unused.shuffle(rng);

    let mut out = Vec::with_capacity(n);
    for w in path.windows(2) {
        let (a, b) = (w[0], w[1]);
        out.push(a);
        if let Some(pos) = unused.iter().position(|&i| linked(a, i) && linked(b, i)) {
            out.push(unused.remove(pos));
        }
    }
    if let Some(&last) = path.last() {
        out.push(last);
    }
    Ok(out)
}

/// Repeats improvement passes until `patience` consecutive passes fail to
/// lengthen the path, calling `on_improvement` with each strictly longer
/// result. Returns the final path.
///
/// # Errors
/// Returns a message if the input is not a valid path.
pub fn improve_until_stuck<R: Rng + ?Sized, F: FnMut(&[Tile])>(
    path: &[Tile],
    n: usize,
    rng: &mut R,
    patience: u32,
    mut on_improvement: F,
) -> Result<Vec<Tile>, String> {
    validate_path(path, n)?;
    let mut current = path.to_vec();
    let mut stuck = 0;
    while stuck < patience {
        let next = improve(&current, n, rng)?;
        if next.len() > current.len() {
            on_improvement(&next);
            current = next;
            stuck = 0;
        } else {
            stuck += 1;
        }
    }
    Ok(current)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn validation_catches_bad_paths() {
        assert!(validate_path(&[1, 2, 4], 10).is_ok());
        assert!(validate_path(&[], 10).is_ok());
        assert!(validate_path(&[0, 1], 10).is_err());
        assert!(validate_path(&[1, 11], 10).is_err());
        assert!(validate_path(&[2, 4, 2], 10).is_err());
        assert!(validate_path(&[2, 3], 10).is_err(), "2 and 3 are not linked");
    }

    #[test]
    fn inserts_a_linking_tile() {
        // Only 1 and 4 link to both 2 and 8 on a board of 8; the shuffle
        // picks which one lands in the gap.
        let mut rng = XorShiftRng::seed_from_u64(1);
        let improved = improve(&[2, 8], 8, &mut rng).unwrap();
        assert_eq!(improved.len(), 3);
        assert_eq!(improved[0], 2);
        assert_eq!(improved[2], 8);
        assert!(improved[1] == 1 || improved[1] == 4);
    }

    #[test]
    fn output_is_valid_and_contains_input() {
        let mut rng = XorShiftRng::seed_from_u64(0xFEED);
        let input = vec![5, 10, 2, 6, 3];
        for _ in 0..20 {
            let out = improve(&input, 30, &mut rng).unwrap();
            validate_path(&out, 30).expect("improved path must stay valid");
            assert!(out.len() >= input.len());
            // Input tiles survive in order.
            let mut it = out.iter();
            for &tile in &input {
                assert!(it.any(|&o| o == tile), "{tile} lost from {out:?}");
            }
        }
    }

    #[test]
    fn short_inputs_pass_through() {
        let mut rng = XorShiftRng::seed_from_u64(2);
        assert_eq!(improve(&[], 10, &mut rng).unwrap(), Vec::<Tile>::new());
        assert_eq!(improve(&[7], 10, &mut rng).unwrap(), vec![7]);
    }

    #[test]
    fn improvement_loop_reports_strictly_longer_paths() {
        let mut rng = XorShiftRng::seed_from_u64(0xABBA);
        let mut lengths = Vec::new();
        let final_path = improve_until_stuck(&[3, 9], 20, &mut rng, 50, |p| {
            lengths.push(p.len());
        })
        .unwrap();
        validate_path(&final_path, 20).unwrap();
        assert!(final_path.len() >= 2);
        for w in lengths.windows(2) {
            assert!(w[0] < w[1]);
        }
        if let Some(&last) = lengths.last() {
            assert_eq!(last, final_path.len());
        }
    }

    #[test]
    fn each_gap_takes_at_most_one_tile_per_pass() {
        let mut rng = XorShiftRng::seed_from_u64(3);
        let input = vec![2, 4];
        let out = improve(&input, 100, &mut rng).unwrap();
        // One gap, so at most one insertion per pass.
        assert!(out.len() <= 3);
    }
}
