/// Position semantics for ordered containers
///
/// Lists are ordered within their board and cards within their list by a
/// plain integer `position`:
///
/// - Positions are caller-supplied (default [`DEFAULT_POSITION`]). Nothing is
///   appended automatically and siblings are never shifted to make room.
/// - Collisions and gaps are allowed. Display order is ascending position,
///   with equal positions kept in creation order.
/// - No compaction or renumbering ever happens.
///
/// The PostgreSQL store expresses the same order as
/// `ORDER BY position, created_at, id`; the in-memory store and board detail
/// assembly use [`sort_by_position`].

use uuid::Uuid;

/// Position given to lists and cards created without one
pub const DEFAULT_POSITION: i32 = 0;

/// An entity ordered by position inside a parent container
pub trait Positioned {
    /// Ordering key within the container
    fn position(&self) -> i32;

    /// Id of the container the entity currently belongs to
    fn container_id(&self) -> Uuid;
}

/// Sorts siblings ascending by position
///
/// The sort is stable, so entities sharing a position keep the relative
/// order they arrived in (creation order when the input comes from storage).
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
}

/// Returns the entities of `items` that belong to `container_id`, in display order
pub fn in_container<T: Positioned + Clone>(items: &[T], container_id: Uuid) -> Vec<T> {
    let mut siblings: Vec<T> = items
        .iter()
        .filter(|item| item.container_id() == container_id)
        .cloned()
        .collect();
    sort_by_position(&mut siblings);
    siblings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        position: i32,
        container: Uuid,
    }

    impl Positioned for Item {
        fn position(&self) -> i32 {
            self.position
        }

        fn container_id(&self) -> Uuid {
            self.container
        }
    }

    fn names(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let c = Uuid::new_v4();
        let mut items = vec![
            Item { name: "c", position: 2, container: c },
            Item { name: "a", position: 0, container: c },
            Item { name: "b", position: 1, container: c },
        ];

        sort_by_position(&mut items);
        assert_eq!(names(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let c = Uuid::new_v4();
        let mut items = vec![
            Item { name: "first", position: 1, container: c },
            Item { name: "zero", position: 0, container: c },
            Item { name: "second", position: 1, container: c },
            Item { name: "third", position: 1, container: c },
        ];

        sort_by_position(&mut items);
        assert_eq!(names(&items), vec!["zero", "first", "second", "third"]);
    }

    #[test]
    fn test_gaps_and_negative_positions_are_kept() {
        let c = Uuid::new_v4();
        let mut items = vec![
            Item { name: "hundred", position: 100, container: c },
            Item { name: "minus", position: -5, container: c },
            Item { name: "ten", position: 10, container: c },
        ];

        sort_by_position(&mut items);
        assert_eq!(names(&items), vec!["minus", "ten", "hundred"]);
        assert_eq!(items[2].position, 100);
    }

    #[test]
    fn test_in_container_filters_and_sorts() {
        let left = Uuid::new_v4();
        let right = Uuid::new_v4();
        let items = vec![
            Item { name: "r1", position: 1, container: right },
            Item { name: "l1", position: 1, container: left },
            Item { name: "l0", position: 0, container: left },
        ];

        assert_eq!(names(&in_container(&items, left)), vec!["l0", "l1"]);
        assert_eq!(names(&in_container(&items, right)), vec!["r1"]);
        assert!(in_container(&items, Uuid::new_v4()).is_empty());
    }
}
