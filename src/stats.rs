use crate::depth::Depth;

/// Statistics on [`OrderedMap`] and [`Bst`] trees. Serves two purpose:
///
/// * To get partial but quick statistics via the `stats()` method.
/// * To get full statisics via the `validate()` method.
///
/// [`OrderedMap`]: crate::OrderedMap
/// [`Bst`]: crate::Bst
#[derive(Clone, Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    pub(crate) fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    pub(crate) fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    pub(crate) fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number of entries in the tree.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for each entry. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types. EG:
    ///
    /// ```
    /// use llrb_map::OrderedMap;
    /// let map: OrderedMap<u64, u64> = OrderedMap::new();
    ///
    /// // size of key: 8 bytes
    /// // size of value: 8 bytes
    /// // overhead is 32 bytes, color, subtree-size and two child links.
    /// assert_eq!(map.stats().node_size(), 48);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black links from root to any leaf. Available
    /// only from a validated, balanced tree.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, None if the tree was not walked or
    /// if it is empty.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 1 => Some(depths.clone()),
            _ => None,
        }
    }
}
