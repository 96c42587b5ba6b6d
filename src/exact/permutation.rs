//! In-place lexicographic permutation stepping.

/// Rearrange `items` into the next permutation in lexicographic order.
///
/// Returns `false` and leaves `items` untouched when it is already the last
/// (non-increasing) arrangement. Starting from a sorted slice of `k` distinct
/// elements, repeated calls visit all `k!` arrangements.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    // Longest non-increasing suffix starts right after the pivot
    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let pivot = i - 1;

    // Rightmost successor of the pivot
    let mut j = n - 1;
    while items[j] <= items[pivot] {
        j -= 1;
    }
    items.swap(pivot, j);
    items[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn factorial(k: usize) -> usize {
        (1..=k).product()
    }

    #[test]
    fn test_enumerates_k_factorial_increasing() {
        for k in 0..=6 {
            let mut items: Vec<usize> = (0..k).collect();
            let mut seen = HashSet::new();
            let mut previous = items.clone();
            seen.insert(items.clone());

            while next_permutation(&mut items) {
                assert!(items > previous, "{:?} does not follow {:?}", items, previous);
                previous = items.clone();
                seen.insert(items.clone());
            }

            assert_eq!(seen.len(), factorial(k).max(1));
            // Exhaustion leaves the last arrangement in place
            let last: Vec<usize> = (0..k).rev().collect();
            assert_eq!(items, last);
        }
    }

    #[test]
    fn test_known_successors() {
        let mut items = vec![1, 2, 3];
        assert!(next_permutation(&mut items));
        assert_eq!(items, vec![1, 3, 2]);
        assert!(next_permutation(&mut items));
        assert_eq!(items, vec![2, 1, 3]);

        let mut items = vec!["a", "c", "b"];
        assert!(next_permutation(&mut items));
        assert_eq!(items, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_last_permutation_signals_exhaustion() {
        let mut items = vec![3, 2, 1];
        assert!(!next_permutation(&mut items));
        assert_eq!(items, vec![3, 2, 1]);
    }

    #[test]
    fn test_repeated_elements_are_not_duplicated() {
        let mut items = vec![1, 1, 2];
        let mut count = 1;
        while next_permutation(&mut items) {
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
