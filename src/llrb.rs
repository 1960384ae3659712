use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    iter::FromIterator,
    mem,
    ops::{Deref, DerefMut},
};

use log::{debug, trace};

use crate::depth::Depth;
use crate::error::Error;
use crate::node::{self, is_black, is_red, Link, Node};
use crate::stats::Stats;

/// OrderedMap is an ordered symbol table using
/// [left-leaning-red-black][llrb] tree. Every node carries the size of
/// its subtree, which makes rank and select logarithmic.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    root: Link<K, V>,
}

/// Different ways to construct a new OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create an empty instance of OrderedMap.
    pub fn new() -> OrderedMap<K, V> {
        OrderedMap {
            root: Default::default(),
        }
    }

    /// Create a new instance of OrderedMap and load it with entries
    /// from `iter`. Later entries overwrite earlier entries with the
    /// same key.
    pub fn load_from<I>(iter: I) -> OrderedMap<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = OrderedMap::new();
        map.extend(iter);
        trace!("load_from() loaded {} entries", map.len());
        map
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn default() -> Self {
        OrderedMap::new()
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OrderedMap::load_from(iter)
    }
}

/// Maintenance API.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        node::size(self.root_deref())
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.len(), mem::size_of::<Node<K, V>>())
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * Keys are in sort order, left subtree less than and right subtree
    ///   greater than the parent.
    /// * Root is black and no red link leans right.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Subtree size in every node matches the entries under it.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        let root = self.root_deref();
        let mut depths = Depth::new();
        let res = if is_red(root) {
            Err(Error::RedRoot)
        } else {
            OrderedMap::validate_tree(root, false, 0).and_then(|blacks| {
                node::validate_links(root, &mut depths)?;
                Ok(blacks)
            })
        };
        match res {
            Ok(blacks) => {
                let mut stats = self.stats();
                stats.set_blacks(blacks);
                stats.set_depths(depths);
                Ok(stats)
            }
            Err(err) => {
                debug!("validate() failed with {} entries", self.len());
                Err(err)
            }
        }
    }

    #[inline]
    fn root_deref(&self) -> Option<&Node<K, V>> {
        self.root.as_ref().map(Deref::deref)
    }

    #[cfg(test)]
    pub(crate) fn shape(&self) -> Vec<(K, bool)> {
        node::shape(self.root_deref())
    }
}

type Upsert<K, V> = (Box<Node<K, V>>, Option<V>);

type Delete<K, V> = (Link<K, V>, Option<V>);

type Delmin<K, V> = (Link<K, V>, Box<Node<K, V>>);

/// Write operations on OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create a new {key, value} entry in the index. If key is already
    /// present return error, leaving the old value untouched.
    pub fn create(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        if self.contains_key(&key) {
            return Err(Error::OverwriteKey);
        }
        self.set(key, value);
        Ok(())
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, old_value) = OrderedMap::upsert(self.root.take(), key, value);
        root.set_black();
        self.root = Some(root);
        old_value
    }

    /// Same as [`OrderedMap::set`].
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then delete is effectively a no-op and the tree is
    /// left untouched. An empty tree holds no keys, so deleting from it
    /// returns None like any other absent key.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            return None;
        }
        let root = OrderedMap::redden_root(self.root.take()?);
        let (root, old_value) = OrderedMap::do_delete(root, key);
        self.set_root(root);
        old_value
    }

    /// Delete the entry with the smallest key and return it.
    pub fn delete_min(&mut self) -> Result<(K, V), Error<K>> {
        let root = self.root.take().ok_or(Error::EmptyTree("delete_min"))?;
        let (root, old_node) = OrderedMap::do_delete_min(OrderedMap::redden_root(root));
        self.set_root(root);
        Ok(old_node.into_entry())
    }

    /// Delete the entry with the largest key and return it.
    pub fn delete_max(&mut self) -> Result<(K, V), Error<K>> {
        let root = self.root.take().ok_or(Error::EmptyTree("delete_max"))?;
        let (root, old_node) = OrderedMap::do_delete_max(OrderedMap::redden_root(root));
        self.set_root(root);
        Ok(old_node.into_entry())
    }

    // with both children black there is no red link to borrow from,
    // lend one from the root.
    fn redden_root(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if !is_red(root.left_deref()) && !is_red(root.right_deref()) {
            root.set_red();
        }
        root
    }

    fn set_root(&mut self, root: Link<K, V>) {
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
    }
}

impl_read_api!(OrderedMap);

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn upsert(node: Link<K, V>, key: K, value: V) -> Upsert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value, false /*black*/), None),
            Some(node) => node,
        };

        let old_value = match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, o) = OrderedMap::upsert(node.left.take(), key, value);
                node.left = Some(left);
                o
            }
            Ordering::Less => {
                let (right, o) = OrderedMap::upsert(node.right.take(), key, value);
                node.right = Some(right);
                o
            }
            Ordering::Equal => Some(node.set_value(value)),
        };
        (OrderedMap::walkuprot_23(node), old_value)
    }

    // key is known to be present under `node`.
    fn do_delete<Q>(mut node: Box<Node<K, V>>, key: &Q) -> Delete<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if key.cmp(node.key.borrow()) == Ordering::Less {
            let left = node.left_deref();
            if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
                node = OrderedMap::move_red_left(node);
            }
            let (left, old_value) = match node.left.take() {
                Some(left) => OrderedMap::do_delete(left, key),
                None => (None, None),
            };
            node.left = left;
            return (Some(OrderedMap::balance(node)), old_value);
        }

        if is_red(node.left_deref()) {
            node = OrderedMap::rotate_right(node);
        }

        if key.cmp(node.key.borrow()) == Ordering::Equal && node.right.is_none() {
            // a black-less leaf, left is empty as well.
            let node = *node;
            return (node.left, Some(node.value));
        }

        let right = node.right_deref();
        if !is_red(right) && !is_red(right.and_then(Node::left_deref)) {
            node = OrderedMap::move_red_right(node);
        }

        match (key.cmp(node.key.borrow()), node.right.take()) {
            (Ordering::Equal, Some(right)) => {
                // swap in the in-order successor.
                let (right, succ) = OrderedMap::do_delete_min(right);
                node.right = right;
                let succ = *succ;
                node.key = succ.key;
                let old_value = node.set_value(succ.value);
                (Some(OrderedMap::balance(node)), Some(old_value))
            }
            (_, Some(right)) => {
                let (right, old_value) = OrderedMap::do_delete(right, key);
                node.right = right;
                (Some(OrderedMap::balance(node)), old_value)
            }
            (_, None) => {
                panic!("do_delete(): fatal logic, call the programmer");
            }
        }
    }

    fn do_delete_min(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        if node.left.is_none() {
            return (node.right.take(), node);
        }
        let left = node.left_deref();
        if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
            node = OrderedMap::move_red_left(node);
        }
        match node.left.take() {
            Some(left) => {
                let (left, old_node) = OrderedMap::do_delete_min(left);
                node.left = left;
                (Some(OrderedMap::balance(node)), old_node)
            }
            None => panic!("do_delete_min(): fatal logic, call the programmer"),
        }
    }

    fn do_delete_max(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        if is_red(node.left_deref()) {
            node = OrderedMap::rotate_right(node);
        }
        if node.right.is_none() {
            return (node.left.take(), node);
        }
        let right = node.right_deref();
        if !is_red(right) && !is_red(right.and_then(Node::left_deref)) {
            node = OrderedMap::move_red_right(node);
        }
        match node.right.take() {
            Some(right) => {
                let (right, old_node) = OrderedMap::do_delete_max(right);
                node.right = right;
                (Some(OrderedMap::balance(node)), old_node)
            }
            None => panic!("do_delete_max(): fatal logic, call the programmer"),
        }
    }

    // Return black height under `node`.
    fn validate_tree(
        node: Option<&Node<K, V>>,
        fromred: bool,
        mut nb: usize,
    ) -> Result<usize, Error<K>> {
        let node = match node {
            None => return Ok(nb),
            Some(node) => node,
        };

        let red = !node.is_black();
        if fromred && red {
            return Err(Error::ConsecutiveReds(node.key.clone()));
        }
        if is_red(node.right_deref()) {
            return Err(Error::RightLeaningRed(node.key.clone()));
        }
        if !red {
            nb += 1;
        }
        let (left, right) = (node.left_deref(), node.right_deref());
        let lblacks = OrderedMap::validate_tree(left, red, nb)?;
        let rblacks = OrderedMap::validate_tree(right, red, nb)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }

    //--------- rotation routines for 2-3 algorithm ----------------

    fn walkuprot_23(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) && !is_red(node.left_deref()) {
            node = OrderedMap::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = OrderedMap::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            OrderedMap::flip(node.deref_mut())
        }
        node.update_size();
        node
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_black(node.right_deref()) {
            panic!("rotate_left(): rotating a black link ? Call the programmer");
        }
        let mut x = match node.right.take() {
            Some(x) => x,
            None => unreachable!(),
        };
        node.right = x.left.take();
        x.black = node.black;
        x.size = node.size;
        node.set_red();
        node.update_size();
        x.left = Some(node);
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_black(node.left_deref()) {
            panic!("rotate_right(): rotating a black link ? Call the programmer")
        }
        let mut x = match node.left.take() {
            Some(x) => x,
            None => unreachable!(),
        };
        node.left = x.right.take();
        x.black = node.black;
        x.size = node.size;
        node.set_red();
        node.update_size();
        x.right = Some(node);
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    // absent children stay black.
    fn flip(node: &mut Node<K, V>) {
        if let Some(left) = node.left.as_mut() {
            left.toggle_link()
        }
        if let Some(right) = node.right.as_mut() {
            right.toggle_link()
        }
        node.toggle_link();
    }

    fn balance(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) {
            node = OrderedMap::rotate_left(node);
        }
        OrderedMap::walkuprot_23(node)
    }

    fn move_red_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        OrderedMap::flip(node.deref_mut());
        let right = node.right_deref();
        if is_red(right.and_then(Node::left_deref)) {
            node.right = node.right.take().map(OrderedMap::rotate_right);
            node = OrderedMap::rotate_left(node);
            OrderedMap::flip(node.deref_mut());
        }
        node
    }

    fn move_red_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        OrderedMap::flip(node.deref_mut());
        let left = node.left_deref();
        if is_red(left.and_then(Node::left_deref)) {
            node = OrderedMap::rotate_right(node);
            OrderedMap::flip(node.deref_mut());
        }
        node
    }
}
