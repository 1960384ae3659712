//! Ordered symbol table on a [left-leaning-red-black][llrb] tree.
//!
//! [`OrderedMap`] keeps keys in sort order with logarithmic height, and
//! annotates every node with its subtree size so that order statistics,
//! `rank` and `select`, are logarithmic as well. [`Bst`] exposes the same
//! API over an unbalanced tree, and serves as a baseline.
//!
//! ```
//! use llrb_map::OrderedMap;
//!
//! let mut map: OrderedMap<&str, i32> = OrderedMap::new();
//! map.set("e", 1);
//! map.set("a", 2);
//! map.set("m", 3);
//!
//! assert_eq!(map.min(), Ok("a"));
//! assert_eq!(map.floor("b"), Ok(Some("a")));
//! assert_eq!(map.select(2), Ok("m"));
//! assert_eq!(map.keys().collect::<Vec<&str>>(), vec!["a", "e", "m"]);
//! ```
//!
//! [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

#[macro_use]
mod read;

mod bst;
mod depth;
mod error;
mod iter;
mod llrb;
mod node;
mod stats;

pub use crate::bst::Bst;
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::iter::{Iter, Keys, Range, Reverse};
pub use crate::llrb::OrderedMap;
pub use crate::stats::Stats;

#[cfg(test)]
mod bst_test;
#[cfg(test)]
mod depth_test;
