use crate::error::{ListError, Result};
use crate::list::{List, Node};
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self
                .ring
                .links()
                .zip(other.ring.links())
                .all(|(a, b)| *a.value() == *b.value())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    /// Clones the elements into a new list. The nodes of the clone are new
    /// nodes, owned by the clone.
    fn clone(&self) -> Self {
        self.ring.links().map(|link| link.value().clone()).collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for link in self.ring.links() {
            link.value().hash(state);
        }
        self.count().hash(state);
    }
}

impl<T> List<T> {
    /// Returns the first node holding a value equal to `value`, or `None`.
    ///
    /// The scan starts at the first node and follows the ring until it wraps
    /// back to the head.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 1]);
    ///
    /// let found = list.find(&1).unwrap();
    /// assert_eq!(found, list.first().unwrap());
    /// assert_eq!(list.find(&3), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<Node<T>>
    where
        T: PartialEq,
    {
        self.ring
            .links()
            .find(|link| *link.value() == *value)
            .map(Node::from_link)
    }

    /// Returns the last node holding a value equal to `value`, or `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 1]);
    /// assert_eq!(list.find_last(&1), list.last());
    /// ```
    pub fn find_last(&self, value: &T) -> Option<Node<T>>
    where
        T: PartialEq,
    {
        self.ring
            .links_back()
            .find(|link| *link.value() == *value)
            .map(Node::from_link)
    }

    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.add_last(0);
    /// list.add_last(1);
    /// list.add_last(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Returns the node at position `index`, counting from the first node.
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= count`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn node_at(&self, index: usize) -> Result<Node<T>> {
        let count = self.count();
        self.ring
            .links()
            .nth(index)
            .map(Node::from_link)
            .ok_or(ListError::IndexOutOfRange { index, count })
    }

    /// Returns a clone of the element at position `index`.
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_ring::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'c']);
    /// assert_eq!(list.get(2), Ok('c'));
    /// assert_eq!(
    ///     list.get(3),
    ///     Err(ListError::IndexOutOfRange { index: 3, count: 3 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        let node = self.node_at(index)?;
        let value = node.value().clone();
        Ok(value)
    }

    /// Removes the first node holding a value equal to `value`. Returns
    /// `false` if there is none.
    pub fn remove_value(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find(value) {
            Some(node) => {
                self.detach_node(&node.link);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn list_find_first_and_last() {
        let list = List::from_iter([3, 1, 3, 2]);
        let first = list.find(&3).unwrap();
        let last = list.find_last(&3).unwrap();
        assert_ne!(first, last);
        assert_eq!(first.next(), Some(list.find(&1).unwrap()));
        assert_eq!(last.next(), list.last());
        assert_eq!(list.find(&4), None);
        assert_eq!(list.find_last(&4), None);
        assert!(list.contains(&2));
    }

    #[test]
    fn list_node_at() {
        let list = List::from_iter(0..4);
        for i in 0..4 {
            assert_eq!(*list.node_at(i).unwrap().value(), i);
        }
        assert!(list.node_at(4).is_err());
        assert_eq!(list.node_at(3).ok(), list.last());
    }

    #[test]
    fn list_remove_value() {
        let mut list = List::from_iter([1, 2, 1]);
        let version = list.version();
        assert!(list.remove_value(&1));
        assert_eq!(list, List::from_iter([2, 1]));
        assert!(list.version() > version);
        assert!(!list.remove_value(&5));
        assert!(list.remove_value(&1));
        assert!(list.remove_value(&2));
        assert!(list.is_empty());
    }

    #[test]
    fn list_eq_clone_and_hash() {
        let list = List::from_iter(vec![String::from("a"), String::from("b")]);
        let cloned = list.clone();
        assert_eq!(list, cloned);
        assert_eq!(hash_of(&list), hash_of(&cloned));

        // the clone owns its own nodes
        let node = cloned.first().unwrap();
        assert!(!list.owns(&node));
        node.set_value(String::from("z"));
        assert_ne!(list, cloned);
        assert_eq!(list.get(0).unwrap(), "a");

        assert_ne!(List::from_iter([1, 2]), List::from_iter([1, 2, 3]));
    }
}
