//! An ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented with an AVL tree.
///
/// Duplicates are rejected and missing values are ignored on removal;
/// both outcomes are reported through the returned `bool`.
///
/// ```
/// use avl_explorer::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
/// assert!(set.contains(&1));
/// assert_eq!(set.in_order(), vec![1, 2, 3]);
/// set.remove(&1);
/// assert!(!set.contains(&1));
/// ```
#[derive(Clone)]
pub struct AvlTreeSet<T> {
    root: Link<T>,
    num_nodes: usize,
}

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

type Link<T> = Option<Box<Node<T>>>;

/// A read-only view of a node in the tree.
///
/// Views borrow the set, so they cannot outlive the next mutation.
pub struct NodeView<'a, T> {
    node: &'a Node<T>,
}

/// An iterator over the values of a set, in ascending order.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

/// An owning iterator over the values of a set, in ascending order.
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T: Ord> AvlTreeSet<T> {
    /// Creates an empty set.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Inserts a value into the set.
    /// Returns `false` and leaves the set unchanged if the value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = Node::insert(self.root.take(), value);
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = Node::remove(self.root.take(), value);
        self.root = root;
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Returns a reference to the value in the set that is equal to the given value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value).map(|node| &node.value)
    }

    /// Returns true if the set contains a value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value).is_some()
    }

    /// Returns a read-only view of the node holding the given value.
    pub fn find<Q>(&self, value: &Q) -> Option<NodeView<'_, T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value).map(|node| NodeView { node })
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = Node::check_subtree(&self.root, None, None);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.count_nodes(), self.num_nodes);
    }

    fn search<Q>(&self, value: &Q) -> Option<&Node<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match value.cmp(node.value.borrow()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }
}

impl<T> AvlTreeSet<T> {
    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Counts the nodes by walking the whole tree.
    /// Always agrees with [`len`](Self::len), which is tracked on every update.
    pub fn count_nodes(&self) -> usize {
        Node::count(&self.root)
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single value.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns the smallest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.root
            .as_deref()
            .map(|node| &Node::find_minimum(node).value)
    }

    /// Returns the largest value in the set.
    pub fn last(&self) -> Option<&T> {
        self.root
            .as_deref()
            .map(|node| &Node::find_maximum(node).value)
    }

    /// Returns the values of the set in ascending order.
    /// The sequence is recomputed on every call.
    pub fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::with_capacity(self.num_nodes);
        Node::collect_in_order(&self.root, &mut values);
        values
    }

    /// Gets an iterator over the values of the set in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.num_nodes)
    }

    /// Returns a view of the root node, from which the shape of the whole tree can be walked.
    pub fn root(&self) -> Option<NodeView<'_, T>> {
        self.root.as_deref().map(|node| NodeView { node })
    }
}

fn height<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

fn balance_factor<T>(link: &Link<T>) -> isize {
    match link {
        None => 0,
        Some(node) => node.balance_factor(),
    }
}

impl<T> Node<T> {
    fn create(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    //     y          x
    //    / \        / \
    //   x   c  ->  a   y
    //  / \            / \
    // a   b          b   c
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            None => node,
            Some(mut left) => {
                node.left = left.right.take();
                node.update_height();
                left.right = Some(node);
                left.update_height();
                left
            }
        }
    }

    //   x              y
    //  / \            / \
    // a   y    ->    x   c
    //    / \        / \
    //   b   c      a   b
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            None => node,
            Some(mut right) => {
                node.right = right.left.take();
                node.update_height();
                right.left = Some(node);
                right.update_height();
                right
            }
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Children must already be balanced, with a height difference of at most 2 here.
    /// Returns the root of the rebalanced subtree.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        node.update_height();
        let balance = node.balance_factor();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Left heavy, rotate left child first if it leans right
            if balance_factor(&node.left) < 0 {
                node.left = node.left.take().map(Self::rotate_left);
            }
            Self::rotate_right(node)
        } else if balance < -1 {
            // Right heavy, rotate right child first if it leans left
            if balance_factor(&node.right) > 0 {
                node.right = node.right.take().map(Self::rotate_right);
            }
            Self::rotate_left(node)
        } else {
            node
        }
    }

    fn find_minimum(mut node: &Self) -> &Self {
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node
    }

    fn find_maximum(mut node: &Self) -> &Self {
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }

    /// Detaches the in-order successor candidate, i.e. the smallest node of the subtree.
    /// Returns the rebalanced remainder and the detached value.
    fn remove_minimum(mut node: Box<Self>) -> (Link<T>, T) {
        match node.left.take() {
            None => {
                let Node { value, right, .. } = *node;
                (right, value)
            }
            Some(left) => {
                let (left, minimum) = Self::remove_minimum(left);
                node.left = left;
                (Some(Self::rebalance(node)), minimum)
            }
        }
    }

    /// Removes given node from the tree, returning the subtree taking its place.
    fn unlink(mut node: Box<Self>) -> Link<T> {
        match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(left), None) => Some(left),
            (None, Some(right)) => Some(right),
            (Some(left), Some(right)) => {
                // Replace value by in-order successor, which has no left child
                let (right, successor) = Self::remove_minimum(right);
                node.value = successor;
                node.left = Some(left);
                node.right = right;
                Some(Self::rebalance(node))
            }
        }
    }

    fn count(link: &Link<T>) -> usize {
        match link {
            None => 0,
            Some(node) => 1 + Self::count(&node.left) + Self::count(&node.right),
        }
    }

    fn collect_in_order(link: &Link<T>, values: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(node) = link {
            Self::collect_in_order(&node.left, values);
            values.push(node.value.clone());
            Self::collect_in_order(&node.right, values);
        }
    }

    fn drain_in_order(link: Link<T>, values: &mut Vec<T>) {
        if let Some(node) = link {
            let Node {
                value, left, right, ..
            } = *node;
            Self::drain_in_order(left, values);
            values.push(value);
            Self::drain_in_order(right, values);
        }
    }
}

impl<T: Ord> Node<T> {
    /// Inserts value into the subtree and returns its new root,
    /// along with whether the value was actually inserted.
    fn insert(link: Link<T>, value: T) -> (Box<Self>, bool) {
        let mut node = match link {
            None => return (Self::create(value), true),
            Some(node) => node,
        };
        let inserted = match value.cmp(&node.value) {
            Ordering::Equal => return (node, false),
            Ordering::Less => {
                let (left, inserted) = Self::insert(node.left.take(), value);
                node.left = Some(left);
                inserted
            }
            Ordering::Greater => {
                let (right, inserted) = Self::insert(node.right.take(), value);
                node.right = Some(right);
                inserted
            }
        };
        (Self::rebalance(node), inserted)
    }

    /// Removes value from the subtree and returns its new root,
    /// along with whether the value was actually removed.
    fn remove<Q>(link: Link<T>, value: &Q) -> (Link<T>, bool)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match link {
            None => return (None, false),
            Some(node) => node,
        };
        let removed = match value.cmp(node.value.borrow()) {
            Ordering::Equal => return (Self::unlink(node), true),
            Ordering::Less => {
                let (left, removed) = Self::remove(node.left.take(), value);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(node.right.take(), value);
                node.right = right;
                removed
            }
        };
        (Some(Self::rebalance(node)), removed)
    }

    /// Checks ordering, height and balance of the subtree; returns its number of nodes.
    #[cfg(any(test, feature = "consistency_check"))]
    fn check_subtree(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> usize {
        let node = match link {
            None => return 0,
            Some(node) => node,
        };

        // Check ordering against all ancestors
        if let Some(lower) = lower {
            assert!(node.value > *lower);
        }
        if let Some(upper) = upper {
            assert!(node.value < *upper);
        }

        let num_left = Self::check_subtree(&node.left, lower, Some(&node.value));
        let num_right = Self::check_subtree(&node.right, Some(&node.value), upper);

        // Check height
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

        // Check AVL condition (nearly balance)
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);

        num_left + num_right + 1
    }
}

impl<'a, T> NodeView<'a, T> {
    /// Returns the value stored at this node.
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// Returns the left child, if present.
    pub fn left(&self) -> Option<NodeView<'a, T>> {
        self.node.left.as_deref().map(|node| NodeView { node })
    }

    /// Returns the right child, if present.
    pub fn right(&self) -> Option<NodeView<'a, T>> {
        self.node.right.as_deref().map(|node| NodeView { node })
    }

    /// Returns the height of the subtree rooted here (a leaf has height 1).
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// Returns the height of the left subtree minus the height of the right subtree.
    pub fn balance_factor(&self) -> isize {
        self.node.balance_factor()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<T> Clone for NodeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeView<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("value", self.value())
            .field("left", &self.left().map(|left| left.value()))
            .field("right", &self.right().map(|right| right.value()))
            .field("height", &self.height())
            .finish()
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_edge(root);
        iter
    }

    fn push_left_edge(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_edge(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.values.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T: Ord> Default for AvlTreeSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for AvlTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTreeSet<T> {}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(mut self) -> Self::IntoIter {
        let mut values = Vec::with_capacity(self.num_nodes);
        Node::drain_in_order(self.root.take(), &mut values);
        IntoIter {
            values: values.into_iter(),
        }
    }
}
