use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    mem,
    ops::Deref,
};

use crate::depth::Depth;
use crate::error::Error;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Node corresponds to a single entry in the tree.
#[derive(Clone)]
pub(crate) struct Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) black: bool,       // store: black or red
    pub(crate) size: usize,       // store: entries in this subtree
    pub(crate) left: Link<K, V>,  // store: left child
    pub(crate) right: Link<K, V>, // store: right child
}

// Primary operations on a single node.
impl<K, V> Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    // CREATE operation
    pub(crate) fn new(key: K, value: V, black: bool) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            black,
            size: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn left_deref(&self) -> Option<&Node<K, V>> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn right_deref(&self) -> Option<&Node<K, V>> {
        self.right.as_ref().map(Deref::deref)
    }

    // overwrite value in place, return the old value.
    #[inline]
    pub(crate) fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = 1 + size(self.left_deref()) + size(self.right_deref());
    }

    #[inline]
    pub(crate) fn to_entry(&self) -> (K, V) {
        (self.key.clone(), self.value.clone())
    }

    // unlink this node, consuming it.
    #[inline]
    pub(crate) fn into_entry(self: Box<Self>) -> (K, V) {
        let node = *self;
        (node.key, node.value)
    }
}

#[inline]
pub(crate) fn size<K, V>(node: Option<&Node<K, V>>) -> usize
where
    K: Clone + Ord,
    V: Clone,
{
    node.map_or(0, |node| node.size)
}

// absent nodes are black.
#[inline]
pub(crate) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool
where
    K: Clone + Ord,
    V: Clone,
{
    node.map_or(false, |node| !node.is_black())
}

#[inline]
pub(crate) fn is_black<K, V>(node: Option<&Node<K, V>>) -> bool
where
    K: Clone + Ord,
    V: Clone,
{
    node.map_or(true, |node| node.is_black())
}

//--------- read-only walks, common to balanced and plain trees ------------

pub(crate) fn get<'a, K, V, Q>(
    mut node: Option<&'a Node<K, V>>,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    while let Some(nref) = node {
        node = match nref.key.borrow().cmp(key) {
            Ordering::Less => nref.right_deref(),
            Ordering::Greater => nref.left_deref(),
            Ordering::Equal => return Some(nref),
        };
    }
    None
}

pub(crate) fn min<K, V>(mut node: &Node<K, V>) -> &Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    while let Some(left) = node.left_deref() {
        node = left
    }
    node
}

pub(crate) fn max<K, V>(mut node: &Node<K, V>) -> &Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    while let Some(right) = node.right_deref() {
        node = right
    }
    node
}

// largest key less than or equal to `key`.
pub(crate) fn floor<'a, K, V, Q>(
    mut node: Option<&'a Node<K, V>>,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let mut found = None;
    while let Some(nref) = node {
        node = match key.cmp(nref.key.borrow()) {
            Ordering::Equal => return Some(nref),
            Ordering::Less => nref.left_deref(),
            Ordering::Greater => {
                found = Some(nref);
                nref.right_deref()
            }
        };
    }
    found
}

// smallest key greater than or equal to `key`.
pub(crate) fn ceiling<'a, K, V, Q>(
    mut node: Option<&'a Node<K, V>>,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let mut found = None;
    while let Some(nref) = node {
        node = match key.cmp(nref.key.borrow()) {
            Ordering::Equal => return Some(nref),
            Ordering::Greater => nref.right_deref(),
            Ordering::Less => {
                found = Some(nref);
                nref.left_deref()
            }
        };
    }
    found
}

// node holding the key of rank `k`, zero based.
pub(crate) fn select<K, V>(mut node: Option<&Node<K, V>>, mut k: usize) -> Option<&Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    while let Some(nref) = node {
        let lsize = size(nref.left_deref());
        node = match lsize.cmp(&k) {
            Ordering::Greater => nref.left_deref(),
            Ordering::Less => {
                k -= lsize + 1;
                nref.right_deref()
            }
            Ordering::Equal => return Some(nref),
        };
    }
    None
}

// number of keys strictly less than `key`.
pub(crate) fn rank<K, V, Q>(mut node: Option<&Node<K, V>>, key: &Q) -> usize
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let mut acc = 0;
    while let Some(nref) = node {
        let lsize = size(nref.left_deref());
        node = match key.cmp(nref.key.borrow()) {
            Ordering::Less => nref.left_deref(),
            Ordering::Greater => {
                acc += lsize + 1;
                nref.right_deref()
            }
            Ordering::Equal => return acc + lsize,
        };
    }
    acc
}

// Verify sort order against the bounds inherited from ancestors and the
// subtree-size annotation, sampling the depth of every absent link.
// Walks with an explicit stack, a plain tree can be as deep as it is
// long. Return the number of entries counted.
pub(crate) fn validate_links<K, V>(
    root: Option<&Node<K, V>>,
    depths: &mut Depth,
) -> Result<usize, Error<K>>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut count = 0;
    let mut stack: Vec<(Option<&Node<K, V>>, Option<&K>, Option<&K>, usize)> =
        vec![(root, None, None, 0)];

    while let Some((node, low, high, depth)) = stack.pop() {
        let node = match node {
            None => {
                depths.sample(depth);
                continue;
            }
            Some(node) => node,
        };

        match low {
            Some(low) if node.key.le(low) => {
                return Err(Error::SortError(low.clone(), node.key.clone()));
            }
            _ => (),
        }
        match high {
            Some(high) if node.key.ge(high) => {
                return Err(Error::SortError(node.key.clone(), high.clone()));
            }
            _ => (),
        }

        // children are checked against their own children in turn, so a
        // local check covers the whole subtree.
        let (left, right) = (node.left_deref(), node.right_deref());
        let want = 1 + size(left) + size(right);
        if node.size != want {
            return Err(Error::SizeMismatch(node.key.clone(), node.size, want));
        }
        count += 1;

        stack.push((right, Some(&node.key), high, depth + 1));
        stack.push((left, low, Some(&node.key), depth + 1));
    }
    Ok(count)
}

// Deep copy of a tree, built bottom up with an explicit stack.
pub(crate) fn clone_tree<K, V>(root: Option<&Node<K, V>>) -> Link<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    enum Visit<'a, K, V>
    where
        K: Clone + Ord,
        V: Clone,
    {
        Enter(Option<&'a Node<K, V>>),
        Build(&'a Node<K, V>),
    }

    let mut work = vec![Visit::Enter(root)];
    let mut built: Vec<Link<K, V>> = vec![];
    while let Some(visit) = work.pop() {
        match visit {
            Visit::Enter(None) => built.push(None),
            Visit::Enter(Some(node)) => {
                work.push(Visit::Build(node));
                work.push(Visit::Enter(node.right_deref()));
                work.push(Visit::Enter(node.left_deref()));
            }
            Visit::Build(node) => {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                built.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    black: node.black,
                    size: node.size,
                    left,
                    right,
                })));
            }
        }
    }
    built.pop().flatten()
}

// Free a tree one node at a time, unlinking children before each node
// is dropped.
pub(crate) fn drop_tree<K, V>(root: Link<K, V>)
where
    K: Clone + Ord,
    V: Clone,
{
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

// pre-order (key, black) pairs, two trees with equal shape and colors
// produce equal lists.
#[cfg(test)]
pub(crate) fn shape<K, V>(root: Option<&Node<K, V>>) -> Vec<(K, bool)>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut shape = vec![];
    let mut stack: Vec<&Node<K, V>> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        shape.push((node.key.clone(), node.is_black()));
        stack.extend(node.right_deref());
        stack.extend(node.left_deref());
    }
    shape
}
