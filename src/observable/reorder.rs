//! Stable sort planning and in-place minimal-move reordering.
//!
//! Sorting a collection happens in two steps. First a *plan* is computed from a
//! snapshot: a permutation naming, for every final position, the current
//! position of the element that belongs there. Then the plan is applied by
//! walking it in order and moving each element to its target slot if it is not
//! already there, reporting every relocation.
//!
//! # Element identity
//!
//! Elements are tracked by their position in the pre-sort snapshot, not by
//! equality, so collections holding equal elements still reorder
//! deterministically and the sort stays stable.
//!
//! # Cost
//!
//! Each step locates its element with a linear scan, which makes the worst
//! case O(n²) comparisons for O(n) moves. That is fine for the few hundred rows
//! a list view holds; an index map would be needed for much larger inputs.

use std::cmp::Ordering;

use crate::error::{CollectionError, Result};

/// Computes a stable ordering of `items` under `compare`.
///
/// The result holds indices into `items`. Equal elements keep their original
/// relative order because `slice::sort_by` is stable.
pub(crate) fn sort_plan<T, F>(items: &[T], mut compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut plan: Vec<usize> = (0..items.len()).collect();
    plan.sort_by(|&a, &b| compare(&items[a], &items[b]));
    plan
}

/// Checks that `plan` is a permutation of `0..len`.
pub(crate) fn validate_plan(plan: &[usize], len: usize) -> Result<()> {
    if plan.len() != len {
        return Err(CollectionError::InvalidArgument {
            message: format!("plan has {} entries, expected {}", plan.len(), len),
        });
    }

    let mut seen = vec![false; len];
    for &position in plan {
        if position >= len {
            return Err(CollectionError::InvalidArgument {
                message: format!("plan names position {position}, collection length is {len}"),
            });
        }
        if seen[position] {
            return Err(CollectionError::InvalidArgument {
                message: format!("plan names position {position} more than once"),
            });
        }
        seen[position] = true;
    }
    Ok(())
}

/// Rearranges `items` to follow `plan`, calling `on_move` after each relocation.
///
/// `plan` must already have passed [`validate_plan`]. Returns the number of
/// moves performed, which is zero when `items` is already in plan order.
pub(crate) fn apply_plan<T, F>(items: &mut [T], plan: &[usize], mut on_move: F) -> usize
where
    F: FnMut(&T, usize, usize),
{
    // identities[p] is the snapshot position of the element now sitting at p
    let mut identities: Vec<usize> = (0..items.len()).collect();
    let mut moves = 0;

    for (target, &identity) in plan.iter().enumerate() {
        // Slots before `target` are final, so the element is at or after it.
        let Some(offset) = identities[target..].iter().position(|&id| id == identity) else {
            continue;
        };
        let current = target + offset;
        if current == target {
            continue;
        }

        items[target..=current].rotate_right(1);
        identities[target..=current].rotate_right(1);
        on_move(&items[target], current, target);
        moves += 1;
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reorder(items: &mut [char], plan: &[usize]) -> Vec<(char, usize, usize)> {
        let mut moves = Vec::new();
        apply_plan(items, plan, |item, from, to| moves.push((*item, from, to)));
        moves
    }

    #[test]
    fn test_sort_plan_is_stable() {
        let items = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let plan = sort_plan(&items, |x, y| x.0.cmp(&y.0));
        assert_eq!(plan, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_already_sorted_needs_no_moves() {
        let mut items = vec!['A', 'B', 'C', 'D'];
        let plan = sort_plan(&items, |a, b| a.cmp(b));
        let moves = reorder(&mut items, &plan);

        assert!(moves.is_empty());
        assert_eq!(items, vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_reverse_three() {
        let mut items = vec!['A', 'B', 'C'];
        let plan = sort_plan(&items, |a, b| b.cmp(a));
        let moves = reorder(&mut items, &plan);

        assert_eq!(items, vec!['C', 'B', 'A']);
        assert_eq!(moves, vec![('C', 2, 0), ('B', 2, 1)]);
    }

    #[test]
    fn test_single_element_pulled_forward() {
        let mut items = vec!['B', 'C', 'D', 'A'];
        let plan = sort_plan(&items, |a, b| a.cmp(b));
        let moves = reorder(&mut items, &plan);

        assert_eq!(items, vec!['A', 'B', 'C', 'D']);
        assert_eq!(moves, vec![('A', 3, 0)]);
    }

    #[test]
    fn test_equal_elements_keep_identity() {
        // Identical values would confuse an equality lookup.
        let mut items = vec![2, 1, 2, 1];
        let plan = sort_plan(&items, |a, b| a.cmp(b));
        assert_eq!(plan, vec![1, 3, 0, 2]);

        let mut moves = Vec::new();
        apply_plan(&mut items, &plan, |_, from, to| moves.push((from, to)));
        assert_eq!(items, vec![1, 1, 2, 2]);
        assert_eq!(moves, vec![(1, 0), (3, 1)]);
    }

    #[test]
    fn test_validate_plan() {
        assert!(validate_plan(&[2, 0, 1], 3).is_ok());
        assert!(validate_plan(&[], 0).is_ok());

        assert!(matches!(
            validate_plan(&[0, 1], 3),
            Err(CollectionError::InvalidArgument { .. })
        ));
        assert!(matches!(
            validate_plan(&[0, 3, 1], 3),
            Err(CollectionError::InvalidArgument { .. })
        ));
        assert!(matches!(
            validate_plan(&[0, 0, 1], 3),
            Err(CollectionError::InvalidArgument { .. })
        ));
    }
}
