use wrapworld_common::{ChunkCoord, ChunkRange};

/// Toroidal distance along one axis from `v` to the inclusive span `[lo, hi]`.
fn axis_distance(v: i32, lo: i32, hi: i32, n: i64) -> i64 {
    let span = hi as i64 - lo as i64;
    let offset = (v as i64 - lo as i64).rem_euclid(n);
    if offset <= span {
        return 0;
    }
    // Past `hi` going forward, or before `lo` going backward.
    (offset - span).min(n - offset)
}

/// Chebyshev distance, in chunks, from `coord` to the nearest chunk of
/// `range` on a torus of `chunk_count` chunks per edge.
pub fn distance_to_range(coord: ChunkCoord, range: ChunkRange, chunk_count: u32) -> i32 {
    let n = i64::from(chunk_count);
    let dx = axis_distance(coord.x, range.min.x, range.max.x, n);
    let dy = axis_distance(coord.y, range.min.y, range.max.y, n);
    dx.max(dy) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(x0: i32, y0: i32, x1: i32, y1: i32) -> ChunkRange {
        ChunkRange::new(ChunkCoord::new(x0, y0), ChunkCoord::new(x1, y1))
    }

    #[test]
    fn inside_is_zero() {
        let r = range(2, 2, 4, 4);
        assert_eq!(distance_to_range(ChunkCoord::new(3, 4), r, 64), 0);
    }

    #[test]
    fn adjacent_is_one() {
        let r = range(2, 2, 4, 4);
        assert_eq!(distance_to_range(ChunkCoord::new(5, 3), r, 64), 1);
        assert_eq!(distance_to_range(ChunkCoord::new(1, 1), r, 64), 1);
    }

    #[test]
    fn wraps_around_edges() {
        let r = range(0, 0, 1, 1);
        assert_eq!(distance_to_range(ChunkCoord::new(63, 0), r, 64), 1);
        assert_eq!(distance_to_range(ChunkCoord::new(0, 61), r, 64), 3);
    }

    #[test]
    fn far_chunk_uses_chebyshev() {
        let r = range(10, 10, 10, 10);
        assert_eq!(distance_to_range(ChunkCoord::new(13, 15), r, 64), 5);
    }
}
