//! Group-by-business-key reduction.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Keeps one row per key: the maximum under `rank`.
///
/// Rows are grouped by `key` and each group is reduced with an explicit
/// max-by, so the survivor does not depend on input order as long as `rank`
/// is a total order. Survivors are returned in ascending key order together
/// with the number of rows dropped.
pub fn keep_max_by_key<T, K, F, R>(rows: Vec<T>, mut key: F, mut rank: R) -> (Vec<T>, usize)
where
    K: Ord,
    F: FnMut(&T) -> K,
    R: FnMut(&T, &T) -> Ordering,
{
    let total = rows.len();
    let mut groups: BTreeMap<K, T> = BTreeMap::new();
    for row in rows {
        let group_key = key(&row);
        match groups.get_mut(&group_key) {
            Some(current) => {
                if rank(&row, current) == Ordering::Greater {
                    *current = row;
                }
            }
            None => {
                groups.insert(group_key, row);
            }
        }
    }
    let survivors: Vec<T> = groups.into_values().collect();
    let dropped = total - survivors.len();
    (survivors, dropped)
}
