//! An interactive session over a tree: the tree, a highlighted value and statistics.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::layout::{self, Layout};
use crate::parse;
use crate::set::AvlTreeSet;

/// Node count and height of a tree, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub nodes: usize,
    pub height: usize,
}

/// Holds a tree together with the value currently highlighted for display.
///
/// Unlike the tree, a session checks its preconditions and reports
/// duplicates and missing values as errors.
///
/// ```
/// use avl_explorer::{Error, Session};
/// let mut session = Session::new();
/// session.populate_from_text("15,10,20").unwrap();
/// session.insert(12).unwrap();
/// assert_eq!(session.highlighted(), Some(&12));
/// assert!(matches!(session.insert(12), Err(Error::DuplicateKey { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct Session<T> {
    tree: AvlTreeSet<T>,
    highlighted: Option<T>,
}

impl<T> Session<T>
where
    T: Ord + Clone + fmt::Display,
{
    pub fn new() -> Self {
        Self {
            tree: AvlTreeSet::new(),
            highlighted: None,
        }
    }

    /// Replaces the tree by a new one built from the given values.
    /// Returns the number of values given, duplicates included.
    pub fn populate<I>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = AvlTreeSet::new();
        let mut count = 0;
        for value in values {
            tree.insert(value);
            count += 1;
        }
        if count == 0 {
            warn!("refusing to populate from an empty list");
            return Err(Error::EmptyList);
        }

        self.tree = tree;
        self.highlighted = None;
        info!(
            given = count,
            nodes = self.tree.len(),
            height = self.tree.height(),
            "tree populated"
        );
        Ok(count)
    }

    /// Parses a comma-separated list and populates the tree from it.
    /// The current tree is left untouched if the list is empty or malformed.
    pub fn populate_from_text(&mut self, text: &str) -> Result<usize>
    where
        T: FromStr,
    {
        let values = parse::parse_list(text).map_err(|err| {
            warn!(%err, "rejected population list");
            err
        })?;
        self.populate(values)
    }

    /// Inserts a new value and highlights it.
    pub fn insert(&mut self, value: T) -> Result<()> {
        if self.tree.contains(&value) {
            debug!(%value, "duplicate insert rejected");
            return Err(Error::duplicate_key(&value));
        }
        self.tree.insert(value.clone());
        debug!(%value, height = self.tree.height(), "inserted");
        self.highlighted = Some(value);
        Ok(())
    }

    /// Looks up a value, highlighting it if found and clearing the highlight otherwise.
    pub fn search(&mut self, value: &T) -> Result<()> {
        if self.tree.contains(value) {
            debug!(%value, "found");
            self.highlighted = Some(value.clone());
            Ok(())
        } else {
            debug!(%value, "not found");
            self.highlighted = None;
            Err(Error::not_found(value))
        }
    }

    /// Removes a present value and clears the highlight.
    pub fn remove(&mut self, value: &T) -> Result<()> {
        if !self.tree.remove(value) {
            debug!(%value, "removal of missing value rejected");
            return Err(Error::not_found(value));
        }
        debug!(%value, height = self.tree.height(), "removed");
        self.highlighted = None;
        Ok(())
    }

    /// Removes all values and clears the highlight.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.highlighted = None;
        debug!("tree cleared");
    }
}

impl<T> Session<T> {
    pub fn tree(&self) -> &AvlTreeSet<T> {
        &self.tree
    }

    pub fn highlighted(&self) -> Option<&T> {
        self.highlighted.as_ref()
    }

    pub fn is_highlighted(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.highlighted.as_ref() == Some(value)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            nodes: self.tree.len(),
            height: self.tree.height(),
        }
    }

    /// Lays out the current tree for display.
    pub fn layout(&self) -> Layout<'_, T> {
        layout::layout(&self.tree)
    }
}

impl<T> Default for Session<T>
where
    T: Ord + Clone + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL_LIST: &str = "15,10,20,8,12,17,25,6,11,14,19,30,5,13,18,22,35,3,7,16,21,27,40,2,4";

    #[test]
    fn test_populate_from_text() {
        let mut session = Session::<i32>::new();
        assert_eq!(session.populate_from_text(INITIAL_LIST), Ok(25));
        assert_eq!(session.stats().nodes, 25);
        assert!(session.stats().height <= 6);
        assert!(session.highlighted().is_none());
        session.tree().check_consistency();
    }

    #[test]
    fn test_populate_counts_duplicates() {
        let mut session = Session::<i32>::new();
        assert_eq!(session.populate_from_text("1,2,2,3"), Ok(4));
        assert_eq!(session.stats().nodes, 3);
    }

    #[test]
    fn test_populate_rejected_keeps_tree() {
        let mut session = Session::<i32>::new();
        session.populate_from_text("1,2,3").unwrap();
        session.insert(4).unwrap();

        assert_eq!(session.populate_from_text(" , "), Err(Error::EmptyList));
        assert!(matches!(
            session.populate_from_text("5,six,7"),
            Err(Error::MalformedInput { position: 2, .. })
        ));
        assert_eq!(session.tree().in_order(), vec![1, 2, 3, 4]);
        assert_eq!(session.highlighted(), Some(&4));
    }

    #[test]
    fn test_populate_clears_highlight() {
        let mut session = Session::<i32>::new();
        session.insert(1).unwrap();
        assert!(session.is_highlighted(&1));
        session.populate(vec![7, 8, 9]).unwrap();
        assert!(session.highlighted().is_none());
        assert_eq!(session.tree().in_order(), vec![7, 8, 9]);
    }

    #[test]
    fn test_insert() {
        let mut session = Session::<i32>::new();
        session.insert(10).unwrap();
        session.insert(5).unwrap();
        assert!(session.is_highlighted(&5));
        assert!(!session.is_highlighted(&10));

        assert_eq!(
            session.insert(10),
            Err(Error::DuplicateKey {
                value: String::from("10")
            })
        );
        assert!(session.is_highlighted(&5));
        assert_eq!(session.stats(), Stats { nodes: 2, height: 2 });
    }

    #[test]
    fn test_search() {
        let mut session = Session::<i32>::new();
        session.populate(vec![2, 1, 3]).unwrap();

        assert_eq!(session.search(&3), Ok(()));
        assert_eq!(session.highlighted(), Some(&3));

        assert_eq!(
            session.search(&42),
            Err(Error::NotFound {
                value: String::from("42")
            })
        );
        assert!(session.highlighted().is_none());
        assert_eq!(session.stats().nodes, 3);
    }

    #[test]
    fn test_remove() {
        let mut session = Session::<i32>::new();
        session.populate(vec![2, 1, 3]).unwrap();
        session.search(&1).unwrap();

        assert!(matches!(session.remove(&42), Err(Error::NotFound { .. })));
        assert_eq!(session.highlighted(), Some(&1));

        assert_eq!(session.remove(&2), Ok(()));
        assert!(session.highlighted().is_none());
        assert_eq!(session.tree().in_order(), vec![1, 3]);
        session.tree().check_consistency();
    }

    #[test]
    fn test_clear() {
        let mut session = Session::<i32>::new();
        session.populate_from_text(INITIAL_LIST).unwrap();
        session.insert(100).unwrap();
        session.clear();
        assert!(session.tree().is_empty());
        assert!(session.highlighted().is_none());
        assert_eq!(session.stats(), Stats::default());
        assert!(session.layout().is_empty());
    }

    #[test]
    fn test_strings() {
        let mut session = Session::<String>::new();
        session.populate_from_text("pear, apple, fig").unwrap();
        assert_eq!(
            session.tree().in_order(),
            vec!["apple".to_string(), "fig".to_string(), "pear".to_string()]
        );
        assert!(session.insert(String::from("fig")).is_err());
    }
}
