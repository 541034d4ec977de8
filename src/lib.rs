//! This crate provides a doubly-linked list implemented as a ring of nodes,
//! with node handles that navigate the list as if it were linear.
//!
//! The [`List`] allows inserting elements before or after any [`Node`], or at
//! either end, in constant time. In compromise, accessing elements by position
//! or by value takes *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use node_ring::List;
//!
//! let mut list = List::new();
//! list.add_last(1);
//! let three = list.add_last(3);
//!
//! list.add_before(&three, 2).unwrap(); // insert 2 before 3
//! list.add_first(0); // insert 0 at the beginning of the list
//! assert_eq!(format!("{:?}", list), "[0, 1, 2, 3]");
//!
//! let two = list.find(&2).unwrap();
//! assert_eq!(*two.previous().unwrap().value(), 1);
//! assert_eq!(three.next(), None); // the last node has no next node
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌──────────────────────────────────────────────────────────┐
//!          ↓                                                          │
//!    ╔═══════════╗           ╔═══════════╗                 ╔═══════════╗
//!    ║   next    ║ ────────→ ║   next    ║ ──→ ┄┄ ───────→ ║   next    ║ ─┘
//!    ╟───────────╢           ╟───────────╢   Node 2, 3 ... ╟───────────╢
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←── ┄┄ ←─────── ║   prev    ║
//! │  ╟───────────╢           ╟───────────╢                 ╟───────────╢
//! │  ║   owner   ║           ║   owner   ║                 ║   owner   ║
//! │  ╟───────────╢           ╟───────────╢                 ╟───────────╢
//! │  ║ value  T  ║           ║ value  T  ║                 ║ value  T  ║
//! │  ╚═══════════╝           ╚═══════════╝                 ╚═══════════╝
//! │      Node 0 ↑                Node 1                     Node N-1 ↑
//! └─────────────┼────────────────────────────────────────────────────┘
//! ╔═══════════╗ │
//! ║   head    ║ ┘
//! ╟───────────╢
//! ║   count   ║
//! ╟───────────╢
//! ║  version  ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `head` to the first node, or nothing if the list is empty;
//! - the number of nodes `count`;
//! - a `version` counter, bumped on every insertion, removal or clear.
//!
//! Each node of the list is allocated on heap, and contains:
//! - the `next` pointer to the next node in the ring (the first node if it is
//!   the last one);
//! - the `prev` pointer to the previous node in the ring (the last node if it
//!   is the first one);
//! - a weak `owner` back-reference to the list, used to check that a node
//!   passed to a list method belongs to that list, and to find the head when
//!   navigating;
//! - the value `T`.
//!
//! There is no tail pointer: the last node is `head.prev`. A list with one
//! node is a ring of one, whose `next` and `prev` point to itself.
//!
//! # Nodes
//!
//! A [`Node`] is a handle: it can be kept by the caller, cloned, and used later
//! to insert around it or to remove it. [`Node::next`] and [`Node::previous`]
//! hide the ring, returning `None` at the ends of the list.
//!
//! A node belongs to at most one list. Nodes created with [`Node::new`], or
//! removed from their list, are *detached* and can be inserted into any list
//! with the `add_*_node` methods. Passing a node of another list where a node
//! of this list is expected fails with [`ListError::Ownership`]; inserting a
//! node which is still attached fails with [`ListError::AlreadyInList`].
//!
//! ## Examples
//!
//! ```
//! use node_ring::{List, ListError, Node};
//!
//! let mut a = List::new();
//! let mut b = List::new();
//! let x = a.add_last('x');
//!
//! assert_eq!(b.add_last_node(&x), Err(ListError::AlreadyInList));
//! assert_eq!(b.add_before(&x, 'y').unwrap_err(), ListError::Ownership);
//!
//! a.remove(&x).unwrap();
//! b.add_last_node(&x).unwrap();
//! assert!(x.list_owner().unwrap().is(&b));
//!
//! let fresh = Node::new('z');
//! b.add_first_node(&fresh).unwrap();
//! assert_eq!(format!("{:?}", b), "['z', 'x']");
//! ```
//!
//! # Versions
//!
//! The list has no iterator. Code walking it with [`List::first`] and
//! [`Node::next`] can compare [`List::version`] at every step to detect that
//! the list was modified during the walk.
//!
//! # Thread Safety
//!
//! The list and its nodes are neither `Send` nor `Sync`.
//!
//! [`List`]: crate::List
//! [`Node`]: crate::Node

#[doc(inline)]
pub use error::{ListError, Result};
#[doc(inline)]
pub use list::{List, ListRef, Node};

pub mod error;
pub mod list;
