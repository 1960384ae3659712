// Read operations are identical for the balanced and the plain tree, both
// walk `Option<&Node>` from `root_deref()`. The impl block is written
// once here and expanded for each tree type.

use std::ops::Bound;

pub(crate) fn to_owned_bound<Q, K>(bound: Bound<&Q>) -> Bound<K>
where
    Q: ToOwned<Owned = K> + ?Sized,
{
    match bound {
        Bound::Included(key) => Bound::Included(key.to_owned()),
        Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

macro_rules! impl_read_api {
    ($tree:ident) => {
        /// Read operations.
        impl<K, V> $tree<K, V>
        where
            K: Clone + Ord,
            V: Clone,
        {
            /// Get the value for key.
            pub fn get<Q>(&self, key: &Q) -> Option<V>
            where
                K: std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                $crate::node::get(self.root_deref(), key).map(|nref| nref.value.clone())
            }

            /// Check whether key is present in this instance.
            pub fn contains_key<Q>(&self, key: &Q) -> bool
            where
                K: std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                $crate::node::get(self.root_deref(), key).is_some()
            }

            /// Return the smallest key.
            pub fn min(&self) -> Result<K, $crate::Error<K>> {
                let root = self
                    .root_deref()
                    .ok_or($crate::Error::EmptyTree("min"))?;
                Ok($crate::node::min(root).key.clone())
            }

            /// Return the largest key.
            pub fn max(&self) -> Result<K, $crate::Error<K>> {
                let root = self
                    .root_deref()
                    .ok_or($crate::Error::EmptyTree("max"))?;
                Ok($crate::node::max(root).key.clone())
            }

            /// Return the largest key less than or equal to `key`, None if
            /// all keys are greater than `key`.
            pub fn floor<Q>(&self, key: &Q) -> Result<Option<K>, $crate::Error<K>>
            where
                K: std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                let root = self
                    .root_deref()
                    .ok_or($crate::Error::EmptyTree("floor"))?;
                Ok($crate::node::floor(Some(root), key).map(|nref| nref.key.clone()))
            }

            /// Return the smallest key greater than or equal to `key`, None
            /// if all keys are less than `key`.
            pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<K>, $crate::Error<K>>
            where
                K: std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                let root = self
                    .root_deref()
                    .ok_or($crate::Error::EmptyTree("ceiling"))?;
                Ok($crate::node::ceiling(Some(root), key).map(|nref| nref.key.clone()))
            }

            /// Return the key at zero based position `k` in sort order.
            pub fn select(&self, k: usize) -> Result<K, $crate::Error<K>> {
                let root = self
                    .root_deref()
                    .ok_or($crate::Error::EmptyTree("select"))?;
                match $crate::node::select(Some(root), k) {
                    Some(nref) => Ok(nref.key.clone()),
                    None => Err($crate::Error::SelectOutOfRange(k, root.size)),
                }
            }

            /// Return the number of keys strictly less than `key`. The key
            /// itself need not be present.
            pub fn rank<Q>(&self, key: &Q) -> Result<usize, $crate::Error<K>>
            where
                K: std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                let root = self
                    .root_deref()
                    .ok_or($crate::Error::EmptyTree("rank"))?;
                Ok($crate::node::rank(Some(root), key))
            }

            /// Return a random entry from this index, every entry is equally
            /// likely.
            pub fn random<R: rand::Rng>(&self, rng: &mut R) -> Option<(K, V)> {
                let root = self.root_deref()?;
                let k = rng.gen_range(0..root.size);
                $crate::node::select(Some(root), k).map($crate::node::Node::to_entry)
            }

            /// Return an iterator over all entries in this instance.
            pub fn iter(&self) -> $crate::Iter<K, V> {
                $crate::Range::new(
                    self.root_deref(),
                    std::ops::Bound::Unbounded,
                    std::ops::Bound::Unbounded,
                )
            }

            /// Range over all entries from low to high.
            pub fn range<Q, R>(&self, range: R) -> $crate::Range<K, V>
            where
                K: std::borrow::Borrow<Q>,
                R: std::ops::RangeBounds<Q>,
                Q: Ord + ToOwned<Owned = K> + ?Sized,
            {
                let low = $crate::read::to_owned_bound(range.start_bound());
                let high = $crate::read::to_owned_bound(range.end_bound());
                $crate::Range::new(self.root_deref(), low, high)
            }

            /// Return all keys in sort order.
            pub fn keys(&self) -> $crate::Keys<K, V> {
                $crate::Keys::new(self.iter())
            }

            /// Return keys between `low` and `high`, both inclusive, in sort
            /// order. Empty if `low` is greater than `high`.
            pub fn keys_in_range<Q>(&self, low: &Q, high: &Q) -> $crate::Keys<K, V>
            where
                K: std::borrow::Borrow<Q>,
                Q: Ord + ToOwned<Owned = K> + ?Sized,
            {
                let low = std::ops::Bound::Included(low.to_owned());
                let high = std::ops::Bound::Included(high.to_owned());
                $crate::Keys::new($crate::Range::new(self.root_deref(), low, high))
            }
        }
    };
}
