use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    iter::FromIterator,
    mem,
    ops::Deref,
};

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::depth::Depth;
use crate::error::Error;
use crate::node::{self, Link, Node};
use crate::stats::Stats;

/// Bst is an ordered symbol table on a plain binary search tree, with
/// the same API as [`OrderedMap`]. Height depends on the order in which
/// keys are set, and degrades to a list for sorted input. Useful as a
/// baseline when measuring [`OrderedMap`].
///
/// Every walk on Bst, including clone and drop, uses a loop and an
/// explicit stack instead of recursion, so a degenerate tree is only
/// slow, never a stack overflow.
///
/// [`OrderedMap`]: crate::OrderedMap
pub struct Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    root: Link<K, V>,
    rng: StdRng, // picks successor or predecessor on delete.
}

/// Different ways to construct a new Bst instance.
impl<K, V> Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create an empty instance of Bst, seeding its tie-break generator
    /// from system entropy.
    pub fn new() -> Bst<K, V> {
        Bst {
            root: Default::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an empty instance of Bst whose deletes are reproducible.
    pub fn with_seed(seed: u64) -> Bst<K, V> {
        Bst {
            root: Default::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a new instance of Bst and load it with entries from
    /// `iter`. Later entries overwrite earlier entries with the same key.
    pub fn load_from<I>(iter: I) -> Bst<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut bst = Bst::new();
        bst.extend(iter);
        trace!("load_from() loaded {} entries", bst.len());
        bst
    }
}

impl<K, V> Default for Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn default() -> Self {
        Bst::new()
    }
}

impl<K, V> Clone for Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn clone(&self) -> Self {
        Bst {
            root: node::clone_tree(self.root_deref()),
            rng: self.rng.clone(),
        }
    }
}

impl<K, V> Drop for Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn drop(&mut self) {
        node::drop_tree(self.root.take())
    }
}

impl<K, V> Extend<(K, V)> for Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    // A run of keys, each greater than every key before it, lands as a
    // chain hanging off the current maximum. Such runs are collected and
    // spliced in one pass, which gives the same tree as setting them one
    // by one.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut run: Vec<(K, V)> = vec![];
        for (key, value) in iter {
            let ascending = match run.last() {
                Some((last, _)) => key.gt(last),
                None => self.max().map_or(true, |max| key.gt(&max)),
            };
            if ascending {
                run.push((key, value));
            } else {
                self.append_run(mem::take(&mut run));
                self.set(key, value);
            }
        }
        self.append_run(run);
    }
}

impl<K, V> FromIterator<(K, V)> for Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Bst::load_from(iter)
    }
}

/// Maintenance API.
impl<K, V> Bst<K, V>
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

    /// Validate sort order and subtree sizes. Returned [`Stats`] carry
    /// depth statistics but no black count.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        let mut depths = Depth::new();
        match node::validate_links(self.root_deref(), &mut depths) {
            Ok(_) => {
                let mut stats = self.stats();
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

// Nodes detached on the way down, each with the side taken below it.
// Less means the walk went left.
type Path<K, V> = Vec<(Box<Node<K, V>>, Ordering)>;

type Detach<K, V> = (Link<K, V>, Box<Node<K, V>>);

/// Write operations on Bst instance.
impl<K, V> Bst<K, V>
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
    /// New keys are attached as leaves, no rebalancing is done.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let mut path: Path<K, V> = vec![];
        let mut link = self.root.take();
        let (node, old_value) = loop {
            let mut node = match link {
                None => break (Node::new(key, value, true /*black*/), None),
                Some(node) => node,
            };
            match key.cmp(&node.key) {
                Ordering::Less => {
                    link = node.left.take();
                    path.push((node, Ordering::Less));
                }
                Ordering::Greater => {
                    link = node.right.take();
                    path.push((node, Ordering::Greater));
                }
                Ordering::Equal => {
                    let old_value = node.set_value(value);
                    break (node, Some(old_value));
                }
            }
        };
        self.root = Bst::reattach(path, Some(node));
        old_value
    }

    /// Same as [`Bst::set`].
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    /// Delete key from this instance and return its value. A node with
    /// two children is replaced by its in-order successor or predecessor,
    /// picked at random. If key is not present, including on an empty
    /// tree, return None and leave the tree untouched.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path: Path<K, V> = vec![];
        let mut link = self.root.take();
        let (link, old_value) = loop {
            let mut node = match link {
                None => break (None, None),
                Some(node) => node,
            };
            match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    link = node.left.take();
                    path.push((node, Ordering::Less));
                }
                Ordering::Greater => {
                    link = node.right.take();
                    path.push((node, Ordering::Greater));
                }
                Ordering::Equal => {
                    let Node {
                        value, left, right, ..
                    } = *node;
                    let link = match (left, right) {
                        (None, right) => right,
                        (left, None) => left,
                        (Some(left), Some(right)) => {
                            Some(Bst::join(left, right, &mut self.rng))
                        }
                    };
                    break (link, Some(value));
                }
            }
        };
        self.root = Bst::reattach(path, link);
        old_value
    }

    /// Delete the entry with the smallest key and return it.
    pub fn delete_min(&mut self) -> Result<(K, V), Error<K>> {
        let root = self.root.take().ok_or(Error::EmptyTree("delete_min"))?;
        let (root, old_node) = Bst::detach_min(root);
        self.root = root;
        Ok(old_node.into_entry())
    }

    /// Delete the entry with the largest key and return it.
    pub fn delete_max(&mut self) -> Result<(K, V), Error<K>> {
        let root = self.root.take().ok_or(Error::EmptyTree("delete_max"))?;
        let (root, old_node) = Bst::detach_max(root);
        self.root = root;
        Ok(old_node.into_entry())
    }
}

impl_read_api!(Bst);

impl<K, V> Bst<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    // Hang `link` back under the detached nodes, bottom up, refreshing
    // subtree sizes on the way. Return the new root.
    fn reattach(mut path: Path<K, V>, mut link: Link<K, V>) -> Link<K, V> {
        while let Some((mut node, side)) = path.pop() {
            match side {
                Ordering::Less => node.left = link,
                _ => node.right = link,
            }
            node.update_size();
            link = Some(node);
        }
        link
    }

    // Splice an ascending run, whose keys are all greater than the
    // current maximum, as a right leaning chain under the maximum.
    fn append_run(&mut self, run: Vec<(K, V)>) {
        if run.is_empty() {
            return;
        }
        trace!("append_run() {} entries", run.len());
        let mut chain: Link<K, V> = None;
        for (key, value) in run.into_iter().rev() {
            let mut node = Node::new(key, value, true /*black*/);
            node.right = chain;
            node.update_size();
            chain = Some(node);
        }

        let mut path: Path<K, V> = vec![];
        let mut link = self.root.take();
        while let Some(mut node) = link {
            link = node.right.take();
            path.push((node, Ordering::Greater));
        }
        self.root = Bst::reattach(path, chain);
    }

    // Join the two subtrees of a deleted node. The new parent is
    // picked from either side at random, so a long run of deletes does
    // not skew the tree to one side.
    fn join(left: Box<Node<K, V>>, right: Box<Node<K, V>>, rng: &mut StdRng) -> Box<Node<K, V>> {
        let mut node = if rng.gen::<bool>() {
            trace!("join() with in-order successor");
            let (right, mut succ) = Bst::detach_min(right);
            succ.left = Some(left);
            succ.right = right;
            succ
        } else {
            trace!("join() with in-order predecessor");
            let (left, mut pred) = Bst::detach_max(left);
            pred.left = left;
            pred.right = Some(right);
            pred
        };
        node.update_size();
        node
    }

    // Return the subtree without its smallest node, and that node
    // with its links cleared.
    fn detach_min(mut node: Box<Node<K, V>>) -> Detach<K, V> {
        let mut path: Path<K, V> = vec![];
        while let Some(left) = node.left.take() {
            path.push((node, Ordering::Less));
            node = left;
        }
        let right = node.right.take();
        node.update_size();
        (Bst::reattach(path, right), node)
    }

    fn detach_max(mut node: Box<Node<K, V>>) -> Detach<K, V> {
        let mut path: Path<K, V> = vec![];
        while let Some(right) = node.right.take() {
            path.push((node, Ordering::Greater));
            node = right;
        }
        let left = node.left.take();
        node.update_size();
        (Bst::reattach(path, left), node)
    }
}
