//! Ordered-slice lookups.

/// Largest element of `sorted` strictly less than `target`.
///
/// `sorted` must be in ascending order. Runs in `O(log n)`.
pub fn nearest_below<T: Ord + Copy>(sorted: &[T], target: T) -> Option<T> {
    let idx = sorted.partition_point(|v| *v < target);
    idx.checked_sub(1).map(|i| sorted[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_below() {
        let lines = [10u32, 15, 20];

        assert_eq!(nearest_below(&lines, 17), Some(15));
        assert_eq!(nearest_below(&lines, 21), Some(20));
        assert_eq!(nearest_below(&lines, 11), Some(10));
    }

    #[test]
    fn test_nearest_below_is_strict() {
        let lines = [10u32, 15, 20];

        assert_eq!(nearest_below(&lines, 15), Some(10));
        assert_eq!(nearest_below(&lines, 10), None);
    }

    #[test]
    fn test_nothing_below() {
        assert_eq!(nearest_below(&[10u32, 15, 20], 9), None);
        assert_eq!(nearest_below::<u32>(&[], 5), None);
    }
}
