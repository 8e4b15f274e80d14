//! Surrogate key assignment.

use std::collections::BTreeMap;

use dwh_model::SurrogateKey;

/// Business key to surrogate key lookup for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex<K: Ord> {
    keys: BTreeMap<K, SurrogateKey>,
}

impl<K: Ord> KeyIndex<K> {
    pub fn get<Q>(&self, business_key: &Q) -> Option<SurrogateKey>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.get(business_key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Sorts rows by business key ascending and numbers them from 1.
///
/// Keys depend only on the set of business keys, never on input order.
/// Business keys must already be unique.
pub fn assign_keys<T, K, F>(
    mut rows: Vec<T>,
    business_key: F,
) -> (Vec<(SurrogateKey, T)>, KeyIndex<K>)
where
    K: Ord + Clone,
    F: Fn(&T) -> K,
{
    rows.sort_by_key(|row| business_key(row));
    let mut index = KeyIndex {
        keys: BTreeMap::new(),
    };
    let keyed = rows
        .into_iter()
        .zip(1..)
        .map(|(row, key)| {
            index.keys.insert(business_key(&row), key);
            (key, row)
        })
        .collect();
    (keyed, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_from_one_in_key_order() {
        let (keyed, index) = assign_keys(vec!["c", "a", "b"], |row| row.to_string());
        assert_eq!(keyed, vec![(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(index.get("b"), Some(2));
        assert_eq!(index.get("z"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn empty_input() {
        let (keyed, index) = assign_keys(Vec::<i64>::new(), |row| *row);
        assert!(keyed.is_empty());
        assert!(index.is_empty());
    }
}
