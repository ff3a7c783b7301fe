//! Single-field ordering
//!
//! ## Comparison Rules
//! - neither document has the field → equal
//! - only one has it → the one without goes last (asc) or first (desc)
//! - both have it → int/int, float/float and string/string compare
//!   naturally (reversed for desc); any other pair is equal
//!
//! The last rule makes the comparator non-transitive for mixed types, so
//! `slice::sort_by` (which may panic on an inconsistent order) is not used.
//! `stable_sort_by` below is a plain merge sort that accepts any comparator.

use std::cmp::Ordering;

use crate::document::{Document, Value};

use super::SortDirection;

/// Order two documents by `field`
pub fn compare_documents(
    a: &Document,
    b: &Document,
    field: &str,
    direction: SortDirection,
) -> Ordering {
    match (a.get(field), b.get(field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match direction {
            SortDirection::Asc => Ordering::Greater,
            SortDirection::Desc => Ordering::Less,
        },
        (Some(_), None) => match direction {
            SortDirection::Asc => Ordering::Less,
            SortDirection::Desc => Ordering::Greater,
        },
        (Some(x), Some(y)) => match compare_values(x, y) {
            Some(ord) => match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            },
            None => Ordering::Equal,
        },
    }
}

/// Natural order of two values of the same sortable type
///
/// `None` for mismatched types, non-sortable types and NaN.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Stable merge sort
///
/// Ties (and incomparable pairs) keep their input order.
pub fn stable_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by(left, compare);
    let right = stable_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }

    merged
}
