use crate::list::{ListRef, Ring};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ptr;
use std::rc::{Rc, Weak};

pub(crate) type Link<T> = Rc<NodeCell<T>>;

/// The shared state behind a [`Node`] handle.
///
/// While attached, `owner`, `next` and `prev` are all set. A detached node
/// has all three empty.
pub(crate) struct NodeCell<T> {
    owner: RefCell<Weak<Ring<T>>>,
    pub(crate) next: RefCell<Option<Link<T>>>,
    pub(crate) prev: RefCell<Option<Link<T>>>,
    value: RefCell<T>,
}

impl<T> NodeCell<T> {
    pub(crate) fn detached(value: T) -> Link<T> {
        Rc::new(NodeCell {
            owner: RefCell::new(Weak::new()),
            next: RefCell::new(None),
            prev: RefCell::new(None),
            value: RefCell::new(value),
        })
    }

    pub(crate) fn next_link(&self) -> Option<Link<T>> {
        self.next.borrow().clone()
    }

    pub(crate) fn prev_link(&self) -> Option<Link<T>> {
        self.prev.borrow().clone()
    }

    pub(crate) fn value(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    pub(crate) fn try_value(&self) -> Option<Ref<'_, T>> {
        self.value.try_borrow().ok()
    }

    pub(crate) fn owner(&self) -> Option<Rc<Ring<T>>> {
        self.owner.borrow().upgrade()
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.owner.borrow().strong_count() > 0
    }

    pub(crate) fn is_owned_by(&self, ring: &Rc<Ring<T>>) -> bool {
        ptr::eq(self.owner.borrow().as_ptr(), Rc::as_ptr(ring))
    }

    pub(crate) fn adopt(&self, ring: &Rc<Ring<T>>) {
        *self.owner.borrow_mut() = Rc::downgrade(ring);
    }

    /// Clear `owner`, `next` and `prev`, handing back the old `next` link so
    /// that a caller walking the ring can continue without recursion.
    pub(crate) fn invalidate(&self) -> Option<Link<T>> {
        *self.owner.borrow_mut() = Weak::new();
        self.prev.borrow_mut().take();
        self.next.borrow_mut().take()
    }
}

/// A handle to a node of a [`List`](crate::List).
///
/// Cloning a `Node` clones the handle, not the element: both handles refer
/// to the same node, and two handles compare equal only if they refer to the
/// same node.
///
/// A node is either *attached* to exactly one list or *detached*. Navigation
/// with [`next`](Node::next) and [`previous`](Node::previous) follows the
/// linear view of the owning list, so it stops at both ends instead of
/// wrapping around.
///
/// # Examples
///
/// ```
/// use node_ring::{List, Node};
///
/// let mut list = List::new();
/// let one = list.add_last(1);
/// let two = list.add_last(2);
///
/// assert_eq!(one.next(), Some(two.clone()));
/// assert_eq!(two.next(), None);
/// assert_eq!(one.previous(), None);
///
/// let detached = Node::new(3);
/// assert!(detached.is_detached());
/// assert!(detached.next().is_none());
/// ```
pub struct Node<T> {
    pub(crate) link: Link<T>,
}

impl<T> Node<T> {
    /// Creates a detached node holding `value`, ready to be inserted with one
    /// of the `add_*_node` methods of a [`List`](crate::List).
    pub fn new(value: T) -> Self {
        Self::from_link(NodeCell::detached(value))
    }

    pub(crate) fn from_link(link: Link<T>) -> Self {
        Self { link }
    }

    /// Returns a read-only view of the list owning this node, or `None` if the
    /// node is detached.
    pub fn list_owner(&self) -> Option<ListRef<T>> {
        self.link.owner().map(ListRef::new)
    }

    /// Returns `true` if the node does not belong to any list.
    pub fn is_detached(&self) -> bool {
        !self.link.is_attached()
    }

    /// Returns the next node of the owning list, or `None` if this node is the
    /// last one or is detached.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn next(&self) -> Option<Node<T>> {
        let ring = self.link.owner()?;
        let next = self.link.next_link()?;
        if ring.is_head(&next) {
            return None;
        }
        Some(Node::from_link(next))
    }

    /// Returns the previous node of the owning list, or `None` if this node is
    /// the first one or is detached.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn previous(&self) -> Option<Node<T>> {
        let ring = self.link.owner()?;
        if ring.is_head(&self.link) {
            return None;
        }
        self.link.prev_link().map(Node::from_link)
    }

    /// Borrows the element.
    ///
    /// # Panics
    ///
    /// Panics if the element is currently borrowed by [`value_mut`](Node::value_mut).
    pub fn value(&self) -> Ref<'_, T> {
        self.link.value()
    }

    /// Mutably borrows the element.
    ///
    /// # Panics
    ///
    /// Panics if the element is currently borrowed.
    pub fn value_mut(&self) -> RefMut<'_, T> {
        self.link.value.borrow_mut()
    }

    /// Replaces the element, returning the old one. The structure of the
    /// owning list is not affected.
    ///
    /// # Panics
    ///
    /// Panics if the element is currently borrowed by [`value`](Node::value)
    /// or [`value_mut`](Node::value_mut).
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    /// let node = list.add(1);
    /// let version = list.version();
    ///
    /// assert_eq!(node.set_value(5), 1);
    /// assert_eq!(list.get(0), Ok(5));
    /// assert_eq!(list.version(), version);
    /// ```
    pub fn set_value(&self, value: T) -> T {
        self.link.value.replace(value)
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self::from_link(Rc::clone(&self.link))
    }
}

impl<T> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.link, &other.link)
    }
}

impl<T> Eq for Node<T> {}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Node");
        match self.link.try_value() {
            Some(value) => f.field("value", &*value),
            None => f.field("value", &format_args!("<borrowed>")),
        };
        f.field("attached", &self.link.is_attached()).finish()
    }
}
