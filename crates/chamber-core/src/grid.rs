//! Staggered grid layout.
//!
//! Directory tiles are laid out in rows whose lengths alternate between two
//! sizes (e.g. 5, 4, 5, 4, ...). Renderers offset every other row to form the
//! honeycomb; this module only decides row membership.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The two alternating row lengths. Both are non-zero by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSizes {
    first: NonZeroUsize,
    second: NonZeroUsize,
}

impl RowSizes {
    /// Build row sizes from plain integers.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if either size is zero.
    pub fn new(first: usize, second: usize) -> Result<Self, CoreError> {
        match (NonZeroUsize::new(first), NonZeroUsize::new(second)) {
            (Some(first), Some(second)) => Ok(Self { first, second }),
            _ => Err(CoreError::Validation(format!(
                "grid row sizes must be positive, got ({first}, {second})"
            ))),
        }
    }

    #[must_use]
    pub const fn first(self) -> usize {
        self.first.get()
    }

    #[must_use]
    pub const fn second(self) -> usize {
        self.second.get()
    }

    /// Endless `first, second, first, ...` sequence.
    fn cycle(self) -> impl Iterator<Item = usize> {
        [self.first.get(), self.second.get()].into_iter().cycle()
    }
}

impl Default for RowSizes {
    fn default() -> Self {
        Self {
            first: NonZeroUsize::MIN.saturating_add(4),
            second: NonZeroUsize::MIN.saturating_add(3),
        }
    }
}

/// Partition `items` into rows of alternating length.
///
/// `extra` (typically the synthetic "All" tile) is placed in front of the
/// items before partitioning. The final row may be shorter than its target.
/// Items are consumed in order; pass `slice.iter()` to lay out borrowed tiles
/// without touching the caller's collection.
pub fn generate_grid<T, I>(items: I, sizes: RowSizes, extra: Option<T>) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
{
    let mut tiles = extra.into_iter().chain(items).peekable();
    let mut rows = Vec::new();
    for size in sizes.cycle() {
        if tiles.peek().is_none() {
            break;
        }
        rows.push(tiles.by_ref().take(size).collect());
    }
    rows
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn sizes(a: usize, b: usize) -> RowSizes {
        RowSizes::new(a, b).unwrap()
    }

    #[test]
    fn empty_without_extra_yields_no_rows() {
        let rows = generate_grid(Vec::<char>::new(), sizes(5, 4), None);
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_with_extra_yields_single_row() {
        let rows = generate_grid(Vec::<char>::new(), sizes(5, 4), Some('X'));
        assert_eq!(rows, vec![vec!['X']]);
    }

    #[test]
    fn seven_items_five_four() {
        let items = ['A', 'B', 'C', 'D', 'E', 'F', 'G'];
        let rows = generate_grid(items, sizes(5, 4), None);
        assert_eq!(
            rows,
            vec![vec!['A', 'B', 'C', 'D', 'E'], vec!['F', 'G']]
        );
    }

    #[test]
    fn extra_is_prepended_before_partitioning() {
        let items = ['A', 'B', 'C', 'D', 'E', 'F'];
        let rows = generate_grid(items, sizes(3, 2), Some('*'));
        assert_eq!(
            rows,
            vec![vec!['*', 'A', 'B'], vec!['C', 'D'], vec!['E', 'F']]
        );
    }

    #[test]
    fn borrowed_items_leave_caller_collection_intact() {
        let items = vec![String::from("a"), String::from("b"), String::from("c")];
        let rows = generate_grid(items.iter(), sizes(2, 1), None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![&items[0], &items[1]]);
        assert_eq!(items.len(), 3);
    }

    #[rstest]
    #[case(1, 1, 1)]
    #[case(5, 4, 7)]
    #[case(5, 4, 9)]
    #[case(5, 4, 23)]
    #[case(3, 6, 40)]
    #[case(1, 2, 2)]
    fn rows_concatenate_to_input_with_alternating_lengths(
        #[case] a: usize,
        #[case] b: usize,
        #[case] n: usize,
    ) {
        let items: Vec<usize> = (0..n).collect();
        let rows = generate_grid(items.clone(), sizes(a, b), None);

        let flat: Vec<usize> = rows.iter().flatten().copied().collect();
        assert_eq!(flat, items);

        let last = rows.len() - 1;
        for (index, row) in rows.iter().enumerate() {
            let target = if index % 2 == 0 { a } else { b };
            if index == last {
                assert!(!row.is_empty() && row.len() <= target);
            } else {
                assert_eq!(row.len(), target);
            }
        }
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(RowSizes::new(0, 4).is_err());
        assert!(RowSizes::new(5, 0).is_err());
        assert!(RowSizes::new(0, 0).is_err());
    }

    #[test]
    fn default_sizes_are_five_and_four() {
        let sizes = RowSizes::default();
        assert_eq!((sizes.first(), sizes.second()), (5, 4));
    }
}
