use std::ops::Bound;

use crate::node::Node;

/// Ascending iterator over entries within a range, returned by `range()`
/// and `iter()`. Entries are cloned out of the tree one at a time.
pub struct Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    root: Option<&'a Node<K, V>>,
    stack: Vec<&'a Node<K, V>>, // pending ancestors, next entry on top.
    high: Bound<K>,
}

/// Ascending iterator over entries in the whole tree.
pub type Iter<'a, K, V> = Range<'a, K, V>;

impl<'a, K, V> Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    pub(crate) fn new(root: Option<&'a Node<K, V>>, low: Bound<K>, high: Bound<K>) -> Self {
        let mut range = Range {
            root,
            stack: vec![],
            high,
        };
        range.seek(root, &low);
        range
    }

    /// Iterate the entries not yet returned by this range, in descending
    /// order.
    pub fn rev(mut self) -> Reverse<'a, K, V> {
        match self.next() {
            Some((key, _)) => Reverse::new(self.root, Bound::Included(key), self.high),
            None => Reverse::new(None, Bound::Unbounded, Bound::Unbounded),
        }
    }

    // push the path to the smallest key within `low`, skipping subtrees
    // that fall below it.
    fn seek(&mut self, mut node: Option<&'a Node<K, V>>, low: &Bound<K>) {
        while let Some(nref) = node {
            node = if above_low(low, &nref.key) {
                self.stack.push(nref);
                nref.left_deref()
            } else {
                nref.right_deref()
            };
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // everything from here on, in sort order, is beyond high.
        if !below_high(&self.high, &node.key) {
            self.stack.clear();
            return None;
        }
        self.seek(node.right_deref(), &Bound::Unbounded);
        Some(node.to_entry())
    }
}

/// Descending iterator over entries within a range, returned by
/// [`Range::rev`].
pub struct Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    stack: Vec<&'a Node<K, V>>, // pending ancestors, next entry on top.
    low: Bound<K>,
}

impl<'a, K, V> Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn new(root: Option<&'a Node<K, V>>, low: Bound<K>, high: Bound<K>) -> Self {
        let mut reverse = Reverse { stack: vec![], low };
        reverse.seek(root, &high);
        reverse
    }

    fn seek(&mut self, mut node: Option<&'a Node<K, V>>, high: &Bound<K>) {
        while let Some(nref) = node {
            node = if below_high(high, &nref.key) {
                self.stack.push(nref);
                nref.right_deref()
            } else {
                nref.left_deref()
            };
        }
    }
}

impl<'a, K, V> Iterator for Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if !above_low(&self.low, &node.key) {
            self.stack.clear();
            return None;
        }
        self.seek(node.left_deref(), &Bound::Unbounded);
        Some(node.to_entry())
    }
}

#[inline]
fn above_low<K: Ord>(low: &Bound<K>, key: &K) -> bool {
    match low {
        Bound::Included(low) => key.ge(low),
        Bound::Excluded(low) => key.gt(low),
        Bound::Unbounded => true,
    }
}

#[inline]
fn below_high<K: Ord>(high: &Bound<K>, key: &K) -> bool {
    match high {
        Bound::Included(high) => key.le(high),
        Bound::Excluded(high) => key.lt(high),
        Bound::Unbounded => true,
    }
}

/// Ascending iterator over keys, returned by `keys()` and
/// `keys_in_range()`.
pub struct Keys<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    range: Range<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    pub(crate) fn new(range: Range<'a, K, V>) -> Self {
        Keys { range }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|(key, _)| key)
    }
}
