//! Drag-and-drop reordering of a zone's content list.
//!
//! A drag is a pure client-side move within the rendered list. When it
//! completes, every item is renumbered in visual order so that `order` is
//! always a dense zero-based sequence.

use crate::zone::{ContentItem, ContentOrderEntry};

/// Move the element at `from` so that it ends up at index `to`.
///
/// Mirrors a sortable list: the element is removed, then reinserted at the
/// drop position. Returns `false` (and leaves the list untouched) when the
/// move is a no-op: fewer than two elements, same position, or an index out
/// of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    let len = items.len();
    if len < 2 || from == to || from >= len || to >= len {
        return false;
    }
    let moved = items.remove(from);
    items.insert(to, moved);
    true
}

/// Renumber `items` in their current sequence and return the assignment.
pub fn assign_order(items: &mut [ContentItem]) -> Vec<ContentOrderEntry> {
    items
        .iter_mut()
        .enumerate()
        .map(|(index, item)| {
            let order = index as u32;
            item.order = order;
            ContentOrderEntry { id: item.id, order }
        })
        .collect()
}
