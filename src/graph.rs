//! Divisibility graph construction with GCD-ranked adjacency lists.

use rand::seq::SliceRandom;
use rand::Rng;

/// A board position. Tiles are numbered 1..=n; 0 is reserved so the graph can
/// be indexed directly without off-by-one shifting.
pub type Tile = usize;

// ============================================================================
// Arithmetic helpers
// ============================================================================

/// Greatest common divisor via the Euclidean algorithm, with `gcd(a, 0) = a`.
#[inline]
pub fn gcd(mut a: Tile, mut b: Tile) -> Tile {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Whether two tiles are joined by a divisibility edge, i.e. one divides the
/// other. Both tiles must be nonzero. Note `linked(a, a)` is true; the graph
/// itself never stores self-loops.
#[inline]
pub fn linked(a: Tile, b: Tile) -> bool {
    debug_assert!(a > 0 && b > 0);
    a % b == 0 || b % a == 0
}

// ============================================================================
// GCD-weighted merge sort
// ============================================================================

/// Sorts `arr` in descending order of `gcd(element, pivot)`.
///
/// Top-down merge sort. On equal weights the merge takes from the right half,
/// so when the input was shuffled beforehand the relative order of tied
/// elements is decided by that shuffle. This tie-break is deterministic for a
/// fixed seed; the reported record sequence depends on it.
pub fn gcd_merge_sort(arr: &mut [Tile], pivot: Tile) {
    if arr.len() <= 1 {
        return;
    }
    let mut buf = vec![0; arr.len()];
    sort_slice(arr, pivot, &mut buf);
}

fn sort_slice(arr: &mut [Tile], pivot: Tile, buf: &mut [Tile]) {
    if arr.len() <= 1 {
        return;
    }
    let mid = arr.len() / 2;
    {
        let (left, right) = arr.split_at_mut(mid);
        sort_slice(left, pivot, &mut buf[..mid]);
        sort_slice(right, pivot, &mut buf[mid..]);
    }
    merge(arr, mid, pivot, buf);
}

fn merge(arr: &mut [Tile], mid: usize, pivot: Tile, buf: &mut [Tile]) {
    let len = arr.len();
    let mut a = 0;
    let mut b = mid;
    let mut i = 0;
    while a < mid && b < len {
        // Strictly greater: ties go to the right half.
        if gcd(arr[a], pivot) > gcd(arr[b], pivot) {
            buf[i] = arr[a];
            a += 1;
        } else {
            buf[i] = arr[b];
            b += 1;
        }
        i += 1;
    }
    buf[i..i + (mid - a)].copy_from_slice(&arr[a..mid]);
    i += mid - a;
    buf[i..i + (len - b)].copy_from_slice(&arr[b..len]);
    arr.copy_from_slice(&buf[..len]);
}

// ============================================================================
// DivGraph
// ============================================================================

/// The divisibility graph on tiles 1..=n.
///
/// Each tile's neighbor list holds its proper divisors and its proper
/// multiples within range, ordered by non-increasing gcd with the tile. The
/// graph is built once and is immutable thereafter; the search engine only
/// reads it.
#[derive(Clone, Debug)]
pub struct DivGraph {
    n: usize,
    /// `adj[v]` for v in 1..=n; entry 0 stays empty.
    adj: Vec<Vec<Tile>>,
}

impl DivGraph {
    /// Builds the graph for board size `n`.
    ///
    /// Each neighbor list is shuffled before the GCD sort so that equal-gcd
    /// neighbors end up in a seed-dependent order. Enumeration is trial
    /// division for divisors and striding for multiples; O(n²) overall, which
    /// is fine for the supported board sizes (tens to low hundreds).
    ///
    /// Callers must reject `n == 0` before getting here.
    pub fn build<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        debug_assert!(n >= 1, "board size must be at least 1");
        let mut adj = vec![Vec::new(); n + 1];
        for v in 1..=n {
            let mut neigh: Vec<Tile> = (1..v).filter(|&j| v % j == 0).collect();
            neigh.extend((2 * v..=n).step_by(v));
            neigh.shuffle(rng);
            gcd_merge_sort(&mut neigh, v);
            adj[v] = neigh;
        }
        Self { n, adj }
    }

    /// The board size this graph was built for.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Ordered neighbor list of `tile`. Panics if `tile` is out of range.
    #[inline]
    pub fn neighbors(&self, tile: Tile) -> &[Tile] {
        &self.adj[tile]
    }
}

// ============================================================================
// Component grouping
// ============================================================================

/// Partitions an arbitrary tile set into its connected groups under the
/// divisibility relation.
///
/// Greedy agglomeration: pop a tile, then repeatedly absorb every remaining
/// tile linked to anything already in the group. Quadratic, but inputs are a
/// handful of tiles.
///
/// # Errors
/// Returns a message if any tile is 0, which is on no board and has no
/// divisibility links.
pub fn components(tiles: &[Tile]) -> Result<Vec<Vec<Tile>>, String> {
    if tiles.contains(&0) {
        return Err("tile 0 is outside the board".to_string());
    }
    let mut rest: Vec<Tile> = tiles.to_vec();
    let mut groups = Vec::new();
    while let Some(target) = rest.pop() {
        let mut group = vec![target];
        let mut grew = true;
        while grew {
            grew = false;
            let mut i = rest.len();
            while i > 0 {
                i -= 1;
                if group.iter().any(|&g| linked(rest[i], g)) {
                    group.push(rest.remove(i));
                    grew = true;
                }
            }
        }
        groups.push(group);
    }
    Ok(groups)
}

// ============================================================================
// Tests
// ============================================================================
