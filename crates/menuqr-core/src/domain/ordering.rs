//! Display-order primitives shared by categories and menu items.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of a bulk display-order update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: Uuid,
    pub display_order: i32,
}

/// A sibling that can be positioned by display order.
pub trait Orderable {
    fn id(&self) -> Uuid;
    fn display_order(&self) -> i32;
    fn set_display_order(&mut self, order: i32);
}

/// Stable sort by display order: ties keep their original relative position.
pub fn sort_by_display_order<T: Orderable>(items: &mut [T]) {
    items.sort_by_key(|item| item.display_order());
}

/// Rewrites display orders as the dense sequence 0..n-1 of the current order.
pub fn reindex<T: Orderable>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_display_order(index as i32);
    }
}

pub fn order_updates<T: Orderable>(items: &[T]) -> Vec<OrderUpdate> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| OrderUpdate { id: item.id(), display_order: index as i32 })
        .collect()
}

/// Moves the element at `from` to position `to`, shifting the ones between.
pub fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let element = items.remove(from);
    items.insert(to, element);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row(Uuid, i32, &'static str);

    impl Orderable for Row {
        fn id(&self) -> Uuid {
            self.0
        }
        fn display_order(&self) -> i32 {
            self.1
        }
        fn set_display_order(&mut self, order: i32) {
            self.1 = order;
        }
    }

    #[test]
    fn test_stable_sort_keeps_ties_in_source_order() {
        let mut rows = vec![
            Row(Uuid::new_v4(), 1, "b"),
            Row(Uuid::new_v4(), 0, "a"),
            Row(Uuid::new_v4(), 1, "c"),
            Row(Uuid::new_v4(), 0, "d"),
        ];
        sort_by_display_order(&mut rows);
        let names: Vec<_> = rows.iter().map(|r| r.2).collect();
        assert_eq!(names, vec!["a", "d", "b", "c"]);

        reindex(&mut rows);
        let orders: Vec<_> = rows.iter().map(|r| r.1).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_element() {
        let mut values = vec![0, 1, 2, 3];
        move_element(&mut values, 2, 0);
        assert_eq!(values, vec![2, 0, 1, 3]);

        move_element(&mut values, 0, 3);
        assert_eq!(values, vec![0, 1, 3, 2]);

        move_element(&mut values, 9, 0);
        assert_eq!(values, vec![0, 1, 3, 2]);
    }
}
