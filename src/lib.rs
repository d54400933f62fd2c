//! An ordered set implemented with an AVL tree, plus the pieces needed to
//! explore it interactively: list parsing, a session with a highlighted value,
//! and a planar layout of the tree shape.
//!
//! ```
//! use avl_explorer::AvlTreeSet;
//! let set: AvlTreeSet<i32> = [1, 2, 3, 4, 5].into_iter().collect();
//! assert_eq!(set.height(), 3);
//! assert_eq!(set.in_order(), vec![1, 2, 3, 4, 5]);
//! ```

pub mod error;
pub mod layout;
pub mod parse;
pub mod session;
pub mod set;

pub use error::{Error, Result};
pub use session::{Session, Stats};
pub use set::{AvlTreeSet, NodeView};
