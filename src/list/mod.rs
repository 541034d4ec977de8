use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::iter::FromIterator;
use std::rc::Rc;

use crate::error::{ListError, Result};

pub use self::node::Node;
use self::node::{Link, NodeCell};

pub mod node;

mod algorithms;

/// The `List` is a doubly-linked list implemented as a ring of nodes.
///
/// Only the first node (the *head*) is tracked; the last node is reached as
/// `head.prev`, so both ends are accessible in constant time. Insertions
/// anywhere take constant time given a [`Node`] handle, while positional
/// access and lookups by value take *O*(*n*) time.
///
/// Every structural mutation bumps a [`version`](List::version) counter, so
/// that traversal code layered on top can detect the list changing under it.
///
/// The `List` is not thread-safe: it is neither `Send` nor `Sync`.
///
/// # Naming Conventions
///
/// - *ring order*: the order of nodes following `next` links, which wraps from
///   the last node back to the head;
/// - *linear view*: the ring order cut at the head, which is what [`Node::next`]
///   and [`Node::previous`] present.
pub struct List<T> {
    ring: Rc<Ring<T>>,
}

/// State shared between a [`List`] and the back-references of its nodes.
pub(crate) struct Ring<T> {
    head: RefCell<Option<Link<T>>>,
    count: Cell<usize>,
    version: Cell<u64>,
}

/// A read-only view of a [`List`], as returned by [`Node::list_owner`].
pub struct ListRef<T> {
    ring: Rc<Ring<T>>,
}

/// Where a node is spliced into the ring.
enum Anchor<'a, T> {
    Front,
    Back,
    Before(&'a Node<T>),
    After(&'a Node<T>),
}

/// Forward or backward walk over the links of a ring, visiting each node once.
pub(crate) struct Links<T> {
    next: Option<Link<T>>,
    remaining: usize,
    forward: bool,
}

impl<T> Iterator for Links<T> {
    type Item = Link<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next.take()?;
        self.remaining -= 1;
        self.next = if self.forward {
            current.next_link()
        } else {
            current.prev_link()
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> Ring<T> {
    fn new() -> Self {
        Self {
            head: RefCell::new(None),
            count: Cell::new(0),
            version: Cell::new(0),
        }
    }

    pub(crate) fn head(&self) -> Option<Link<T>> {
        self.head.borrow().clone()
    }

    pub(crate) fn tail(&self) -> Option<Link<T>> {
        self.head.borrow().as_ref().and_then(|head| head.prev_link())
    }

    pub(crate) fn is_head(&self, link: &Link<T>) -> bool {
        self.head
            .borrow()
            .as_ref()
            .map_or(false, |head| Rc::ptr_eq(head, link))
    }

    fn set_head(&self, head: Option<Link<T>>) {
        *self.head.borrow_mut() = head;
    }

    pub(crate) fn count(&self) -> usize {
        self.count.get()
    }

    pub(crate) fn version(&self) -> u64 {
        self.version.get()
    }

    fn bump_version(&self) {
        self.version.set(self.version.get().wrapping_add(1));
    }

    pub(crate) fn links(&self) -> Links<T> {
        Links {
            next: self.head(),
            remaining: self.count(),
            forward: true,
        }
    }

    pub(crate) fn links_back(&self) -> Links<T> {
        Links {
            next: self.tail(),
            remaining: self.count(),
            forward: false,
        }
    }

    fn fmt_entries(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    where
        T: Debug,
    {
        let mut list = f.debug_list();
        for link in self.links() {
            match link.try_value() {
                Some(value) => list.entry(&*value),
                None => list.entry(&format_args!("<borrowed>")),
            };
        }
        list.finish()
    }
}

// private methods
impl<T> List<T> {
    fn validate_node(&self, node: &Node<T>) -> Result<()> {
        if node.link.is_owned_by(&self.ring) {
            Ok(())
        } else {
            Err(ListError::Ownership)
        }
    }

    fn validate_new_node(link: &Link<T>) -> Result<()> {
        if link.is_attached() {
            Err(ListError::AlreadyInList)
        } else {
            Ok(())
        }
    }

    /// Splicing before the head: at the front if the new node becomes head,
    /// at the back otherwise.
    fn end_point(&self, becomes_head: bool) -> Option<(Link<T>, bool)> {
        self.ring.head().map(|head| (head, becomes_head))
    }

    /// Resolve an anchor into the ring node to insert before, and whether the
    /// inserted node takes over as head. `None` means the ring is empty.
    fn splice_point(&self, anchor: Anchor<'_, T>) -> Result<Option<(Link<T>, bool)>> {
        match anchor {
            Anchor::Front => Ok(self.end_point(true)),
            Anchor::Back => Ok(self.end_point(false)),
            Anchor::Before(node) => {
                self.validate_node(node)?;
                let becomes_head = self.ring.is_head(&node.link);
                Ok(Some((Rc::clone(&node.link), becomes_head)))
            }
            Anchor::After(node) => {
                self.validate_node(node)?;
                // an attached node always has a ring successor, the head if it is last
                Ok(node.link.next_link().map(|next| (next, false)))
            }
        }
    }

    /// Checked insertion shared by the anchored and the node-taking `add_*`
    /// methods. All checks run before the ring is touched.
    fn insert(&mut self, anchor: Anchor<'_, T>, link: &Link<T>) -> Result<()> {
        let at = self.splice_point(anchor)?;
        Self::validate_new_node(link)?;
        self.attach_node(at, Rc::clone(link));
        Ok(())
    }

    fn insert_value(&mut self, anchor: Anchor<'_, T>, value: T) -> Result<Node<T>> {
        let link = NodeCell::detached(value);
        self.insert(anchor, &link)?;
        Ok(Node::from_link(link))
    }

    /// The splice primitive behind every insertion: attach the detached `link`
    /// before `at`, or as a self-linked singleton when the ring is empty.
    fn attach_node(&mut self, at: Option<(Link<T>, bool)>, link: Link<T>) {
        link.adopt(&self.ring);
        match at {
            None => {
                *link.next.borrow_mut() = Some(Rc::clone(&link));
                *link.prev.borrow_mut() = Some(Rc::clone(&link));
                self.ring.set_head(Some(link));
            }
            Some((next, becomes_head)) => {
                let prev = next.prev.replace(Some(Rc::clone(&link)));
                if let Some(prev) = &prev {
                    *prev.next.borrow_mut() = Some(Rc::clone(&link));
                }
                debug_assert!(prev.is_some(), "attached node without predecessor");
                *link.next.borrow_mut() = Some(next);
                *link.prev.borrow_mut() = prev;
                if becomes_head {
                    self.ring.set_head(Some(link));
                }
            }
        }
        self.ring.count.set(self.ring.count() + 1);
        self.ring.bump_version();
        #[cfg(all(debug_assertions, feature = "ring-checks"))]
        assert_ring(&self.ring);
    }

    /// Unlink `link` from the ring and invalidate it.
    ///
    /// The caller must have checked that `link` belongs to this list.
    fn detach_node(&mut self, link: &Link<T>) {
        if self.ring.count() == 1 {
            self.ring.set_head(None);
        } else {
            let prev = link.prev_link();
            let next = link.next_link();
            if let (Some(prev), Some(next)) = (&prev, &next) {
                *prev.next.borrow_mut() = Some(Rc::clone(next));
                *next.prev.borrow_mut() = Some(Rc::clone(prev));
            }
            if self.ring.is_head(link) {
                self.ring.set_head(next);
            }
        }
        link.invalidate();
        self.ring.count.set(self.ring.count() - 1);
        self.ring.bump_version();
        #[cfg(all(debug_assertions, feature = "ring-checks"))]
        assert_ring(&self.ring);
    }
}

impl<T> List<T> {
    /// Creates an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use node_ring::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ring: Rc::new(Ring::new()),
        }
    }

    /// Creates a list holding the elements of `source` in iteration order.
    ///
    /// Returns [`ListError::NullInput`] if `source` is `None`; nothing is
    /// constructed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::{List, ListError};
    ///
    /// let list = List::from_source(Some(vec![1, 2, 3])).unwrap();
    /// assert_eq!(list.count(), 3);
    ///
    /// let missing: Option<Vec<i32>> = None;
    /// assert_eq!(List::from_source(missing).unwrap_err(), ListError::NullInput);
    /// ```
    pub fn from_source<I>(source: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let source = source.ok_or(ListError::NullInput)?;
        Ok(source.into_iter().collect())
    }

    /// Returns the number of nodes in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn count(&self) -> usize {
        self.ring.count()
    }

    /// Returns `true` if the list has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the structural version of the list. It changes on every
    /// insertion, removal and clear, and never on [`Node::set_value`].
    #[inline]
    pub fn version(&self) -> u64 {
        self.ring.version()
    }

    /// Returns the first node, or `None` if the list is empty.
    pub fn first(&self) -> Option<Node<T>> {
        self.ring.head().map(Node::from_link)
    }

    /// Returns the last node, or `None` if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn last(&self) -> Option<Node<T>> {
        self.ring.tail().map(Node::from_link)
    }

    /// Returns `true` if `node` belongs to this list.
    pub fn owns(&self, node: &Node<T>) -> bool {
        node.link.is_owned_by(&self.ring)
    }

    /// Same as [`add_last`](List::add_last).
    #[inline]
    pub fn add(&mut self, value: T) -> Node<T> {
        self.add_last(value)
    }

    /// Adds `value` first in the list and returns its node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    /// list.add_first(2);
    /// let first = list.add_first(1);
    ///
    /// assert_eq!(list.first(), Some(first));
    /// assert_eq!(list.get(1), Ok(2));
    /// ```
    pub fn add_first(&mut self, value: T) -> Node<T> {
        let link = NodeCell::detached(value);
        self.attach_node(self.end_point(true), Rc::clone(&link));
        Node::from_link(link)
    }

    /// Inserts the detached `node` first in the list.
    ///
    /// Returns [`ListError::AlreadyInList`] if `node` belongs to a list.
    pub fn add_first_node(&mut self, node: &Node<T>) -> Result<()> {
        self.insert(Anchor::Front, &node.link)
    }

    /// Appends `value` to the list and returns its node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    /// list.add_last(1);
    /// let last = list.add_last(2);
    ///
    /// assert_eq!(list.last(), Some(last));
    /// assert_eq!(list.get(0), Ok(1));
    /// ```
    pub fn add_last(&mut self, value: T) -> Node<T> {
        let link = NodeCell::detached(value);
        self.attach_node(self.end_point(false), Rc::clone(&link));
        Node::from_link(link)
    }

    /// Appends the detached `node` to the list.
    ///
    /// Returns [`ListError::AlreadyInList`] if `node` belongs to a list.
    pub fn add_last_node(&mut self, node: &Node<T>) -> Result<()> {
        self.insert(Anchor::Back, &node.link)
    }

    /// Inserts `value` right before `node` and returns the new node. If `node`
    /// is the first node, the new node becomes the first one.
    ///
    /// Returns [`ListError::Ownership`] if `node` does not belong to this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    /// let three = list.add(3);
    /// list.add_before(&three, 2).unwrap();
    /// let first = list.first().unwrap();
    /// list.add_before(&first, 1).unwrap();
    ///
    /// assert_eq!(format!("{:?}", list), "[1, 2, 3]");
    /// ```
    pub fn add_before(&mut self, node: &Node<T>, value: T) -> Result<Node<T>> {
        self.insert_value(Anchor::Before(node), value)
    }

    /// Inserts the detached `new_node` right before `node`.
    ///
    /// Returns [`ListError::Ownership`] if `node` does not belong to this
    /// list, or [`ListError::AlreadyInList`] if `new_node` belongs to a list.
    pub fn add_before_node(&mut self, node: &Node<T>, new_node: &Node<T>) -> Result<()> {
        self.insert(Anchor::Before(node), &new_node.link)
    }

    /// Inserts `value` right after `node` and returns the new node.
    ///
    /// Returns [`ListError::Ownership`] if `node` does not belong to this list.
    pub fn add_after(&mut self, node: &Node<T>, value: T) -> Result<Node<T>> {
        self.insert_value(Anchor::After(node), value)
    }

    /// Inserts the detached `new_node` right after `node`.
    ///
    /// Returns [`ListError::Ownership`] if `node` does not belong to this
    /// list, or [`ListError::AlreadyInList`] if `new_node` belongs to a list.
    pub fn add_after_node(&mut self, node: &Node<T>, new_node: &Node<T>) -> Result<()> {
        self.insert(Anchor::After(node), &new_node.link)
    }

    /// Removes `node` from the list. The node becomes detached and may be
    /// inserted again, into this or another list.
    ///
    /// Returns [`ListError::Ownership`] if `node` does not belong to this list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    /// list.add(1);
    /// let two = list.add(2);
    /// list.add(3);
    ///
    /// list.remove(&two).unwrap();
    /// assert!(two.is_detached());
    /// assert_eq!(format!("{:?}", list), "[1, 3]");
    ///
    /// let mut other = List::new();
    /// other.add_last_node(&two).unwrap();
    /// assert_eq!(other.first(), Some(two));
    /// ```
    pub fn remove(&mut self, node: &Node<T>) -> Result<()> {
        self.validate_node(node)?;
        self.detach_node(&node.link);
        Ok(())
    }

    /// Removes the first node and returns it detached, or `None` if the list
    /// is empty.
    pub fn remove_first(&mut self) -> Option<Node<T>> {
        let head = self.ring.head()?;
        self.detach_node(&head);
        Some(Node::from_link(head))
    }

    /// Removes the last node and returns it detached, or `None` if the list
    /// is empty.
    pub fn remove_last(&mut self) -> Option<Node<T>> {
        let tail = self.ring.tail()?;
        self.detach_node(&tail);
        Some(Node::from_link(tail))
    }

    /// Removes all nodes from the list. Every node handle still held
    /// elsewhere becomes detached.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    /// let node = list.add(1);
    /// list.add(2);
    ///
    /// list.clear();
    /// assert_eq!(list.count(), 0);
    /// assert_eq!(list.first(), None);
    /// assert!(node.list_owner().is_none());
    /// ```
    pub fn clear(&mut self) {
        let head = self.ring.head.borrow_mut().take();
        // open the ring at the tail so that nodes are released front to back
        if let Some(tail) = head.as_ref().and_then(|head| head.prev_link()) {
            tail.next.borrow_mut().take();
        }
        // every node is invalidated and the count reset before any element is
        // dropped, so element destructors only observe an empty list
        let mut unlinked = Vec::with_capacity(self.ring.count());
        let mut current = head;
        while let Some(link) = current {
            current = link.invalidate();
            unlinked.push(link);
        }
        self.ring.count.set(0);
        self.ring.bump_version();
        drop(unlinked);
    }
}

impl<T> ListRef<T> {
    pub(crate) fn new(ring: Rc<Ring<T>>) -> Self {
        Self { ring }
    }

    /// Returns the number of nodes in the list.
    pub fn count(&self) -> usize {
        self.ring.count()
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the structural version of the list.
    pub fn version(&self) -> u64 {
        self.ring.version()
    }

    /// Returns the first node of the list.
    pub fn first(&self) -> Option<Node<T>> {
        self.ring.head().map(Node::from_link)
    }

    /// Returns the last node of the list.
    pub fn last(&self) -> Option<Node<T>> {
        self.ring.tail().map(Node::from_link)
    }

    /// Returns `true` if this is a view of `list`.
    pub fn is(&self, list: &List<T>) -> bool {
        Rc::ptr_eq(&self.ring, &list.ring)
    }
}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        Self::new(Rc::clone(&self.ring))
    }
}

impl<T: Debug> Debug for ListRef<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.ring.fmt_entries(f)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.ring.fmt_entries(f)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Walk the whole ring and check that it is closed, doubly linked, of length
/// `count` and that every node is owned by it.
#[cfg(all(debug_assertions, feature = "ring-checks"))]
fn assert_ring<T>(ring: &Rc<Ring<T>>) {
    let head = match ring.head() {
        Some(head) => head,
        None => {
            assert_eq!(ring.count(), 0);
            return;
        }
    };
    let mut current = Rc::clone(&head);
    for _ in 0..ring.count() {
        assert!(current.is_owned_by(ring));
        let next = current.next_link().expect("attached node without successor");
        let back = next.prev_link().expect("attached node without predecessor");
        assert!(Rc::ptr_eq(&back, &current));
        current = next;
    }
    assert!(Rc::ptr_eq(&current, &head), "ring length differs from count");
}
