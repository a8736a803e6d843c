//! Client-side re-sort of a fetched page.
//!
//! Text is ordered without locale tables: letters compare case-insensitively, digit runs
//! compare by numeric value, and equal texts fall back to code-point order (`"A" < "a"`).

use std::cmp::Ordering;

use itertools::Itertools;

use crate::model::common::{FieldValue, SortDirection};
use crate::model::entity::ListEntity;

/// Pairwise comparator of two column values.
///
/// Nulls sort last in both directions, text uses case-insensitive natural ordering,
/// numbers compare numerically and `false < true`. Values of different kinds compare equal.
pub fn compare_field_values(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    let ordering = match (a, b) {
        (FieldValue::Null, FieldValue::Null) => return Ordering::Equal,
        (FieldValue::Null, _) => return Ordering::Greater,
        (_, FieldValue::Null) => return Ordering::Less,
        (FieldValue::Text(a), FieldValue::Text(b)) => compare_text(a, b),
        (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort of `items` by column `sort_by`.
///
/// Mixed value kinds in one column are grouped by kind so the ordering stays total.
pub fn sort_items<E: ListEntity>(items: &mut [E], sort_by: &str, direction: SortDirection) {
    items.sort_by_cached_key(|item| SortKey {
        value: item.field(sort_by),
        direction,
    });
}

struct SortKey {
    value: FieldValue,
    direction: SortDirection,
}

impl SortKey {
    fn kind_rank(&self) -> u8 {
        match self.value {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
            FieldValue::Null => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind_rank()
            .cmp(&other.kind_rank())
            .then_with(|| compare_field_values(&self.value, &other.value, self.direction))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

fn compare_text(a: &str, b: &str) -> Ordering {
    let left = natural_chunks(a);
    let right = natural_chunks(b);

    left.iter()
        .zip(&right)
        .map(|(left, right)| compare_chunk(left, right))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()))
        .then_with(|| a.cmp(b))
}

struct Chunk {
    digits: bool,
    text: String,
}

fn natural_chunks(value: &str) -> Vec<Chunk> {
    value
        .chars()
        .chunk_by(char::is_ascii_digit)
        .into_iter()
        .map(|(digits, chars)| Chunk {
            digits,
            text: chars.flat_map(char::to_lowercase).collect(),
        })
        .collect()
}

fn compare_chunk(a: &Chunk, b: &Chunk) -> Ordering {
    if a.digits && b.digits {
        let left = a.text.trim_start_matches('0');
        let right = b.text.trim_start_matches('0');
        left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    } else {
        a.text.cmp(&b.text)
    }
}
