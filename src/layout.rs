//! Planar layout of the tree shape, for consumers that draw the tree.
//!
//! The root sits at the origin. Every level is placed one `level_gap` below its
//! parent, and the horizontal offset between a parent and its children halves
//! with each level, starting at `root_spacing`.

use crate::set::{AvlTreeSet, NodeView};

/// A point in the drawing plane. `y` decreases with depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal offset between the root and its children.
    pub root_spacing: f64,
    /// Vertical distance between two levels.
    pub level_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_spacing: 1.0,
            level_gap: 1.0,
        }
    }
}

/// A node together with its assigned position and the values of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode<'a, T> {
    pub value: &'a T,
    pub position: Position,
    /// Distance from the root, which has depth 0.
    pub depth: usize,
    pub left: Option<&'a T>,
    pub right: Option<&'a T>,
}

/// Positions of all nodes of a tree, in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<'a, T> {
    nodes: Vec<PlacedNode<'a, T>>,
}

/// Lays out the tree with the default configuration.
pub fn layout<T>(set: &AvlTreeSet<T>) -> Layout<'_, T> {
    layout_with(set, LayoutConfig::default())
}

/// Lays out the tree with the given spacing.
pub fn layout_with<T>(set: &AvlTreeSet<T>, config: LayoutConfig) -> Layout<'_, T> {
    let mut nodes = Vec::with_capacity(set.len());
    if let Some(root) = set.root() {
        place(
            root,
            Position { x: 0.0, y: 0.0 },
            0,
            config.root_spacing,
            config.level_gap,
            &mut nodes,
        );
    }
    Layout { nodes }
}

fn place<'a, T>(
    view: NodeView<'a, T>,
    position: Position,
    depth: usize,
    spacing: f64,
    level_gap: f64,
    nodes: &mut Vec<PlacedNode<'a, T>>,
) {
    let left = view.left();
    let right = view.right();
    nodes.push(PlacedNode {
        value: view.value(),
        position,
        depth,
        left: left.map(|left| left.value()),
        right: right.map(|right| right.value()),
    });

    let y = position.y - level_gap;
    if let Some(left) = left {
        let x = position.x - spacing;
        place(left, Position { x, y }, depth + 1, spacing / 2.0, level_gap, nodes);
    }
    if let Some(right) = right {
        let x = position.x + spacing;
        place(right, Position { x, y }, depth + 1, spacing / 2.0, level_gap, nodes);
    }
}

impl<'a, T> Layout<'a, T> {
    pub fn nodes(&self) -> &[PlacedNode<'a, T>] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the parent-child edges as pairs of values.
    pub fn edges(&self) -> Vec<(&'a T, &'a T)> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.left
                    .into_iter()
                    .chain(node.right)
                    .map(move |child| (node.value, child))
            })
            .collect()
    }

    /// Returns the lower-left and upper-right corners enclosing all positions.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let first = self.nodes.first()?.position;
        let bounds = self.nodes.iter().fold((first, first), |(min, max), node| {
            let Position { x, y } = node.position;
            (
                Position {
                    x: min.x.min(x),
                    y: min.y.min(y),
                },
                Position {
                    x: max.x.max(x),
                    y: max.y.max(y),
                },
            )
        });
        Some(bounds)
    }

    /// Returns the position assigned to the given value.
    pub fn position_of(&self, value: &T) -> Option<Position>
    where
        T: PartialEq,
    {
        self.nodes
            .iter()
            .find(|node| node.value == value)
            .map(|node| node.position)
    }
}

impl<'a, T> IntoIterator for Layout<'a, T> {
    type Item = PlacedNode<'a, T>;
    type IntoIter = std::vec::IntoIter<PlacedNode<'a, T>>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = AvlTreeSet::<i32>::new();
        let layout = layout(&set);
        assert!(layout.is_empty());
        assert!(layout.bounds().is_none());
        assert!(layout.edges().is_empty());
    }

    #[test]
    fn test_positions() {
        //          15
        //        /    \
        //      10      20
        //     /  \    /  \
        //    8   12  17  25
        let set: AvlTreeSet<i32> = [15, 10, 20, 8, 12, 17, 25].into_iter().collect();
        let layout = layout(&set);
        assert_eq!(layout.len(), 7);

        let at = |value: i32| layout.position_of(&value).unwrap();
        assert_eq!(at(15), Position { x: 0.0, y: 0.0 });
        assert_eq!(at(10), Position { x: -1.0, y: -1.0 });
        assert_eq!(at(20), Position { x: 1.0, y: -1.0 });
        assert_eq!(at(8), Position { x: -1.5, y: -2.0 });
        assert_eq!(at(12), Position { x: -0.5, y: -2.0 });
        assert_eq!(at(17), Position { x: 0.5, y: -2.0 });
        assert_eq!(at(25), Position { x: 1.5, y: -2.0 });

        assert_eq!(
            layout.bounds(),
            Some((Position { x: -1.5, y: -2.0 }, Position { x: 1.5, y: 0.0 }))
        );
    }

    #[test]
    fn test_preorder_and_edges() {
        let set: AvlTreeSet<i32> = [2, 1, 3, 4].into_iter().collect();
        let layout = layout(&set);
        let values: Vec<i32> = layout.nodes().iter().map(|node| *node.value).collect();
        assert_eq!(values, vec![2, 1, 3, 4]);

        let root = &layout.nodes()[0];
        assert_eq!(root.depth, 0);
        assert_eq!(root.left, Some(&1));
        assert_eq!(root.right, Some(&3));

        let edges: Vec<(i32, i32)> = layout.edges().into_iter().map(|(p, c)| (*p, *c)).collect();
        assert_eq!(edges, vec![(2, 1), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_config() {
        let set: AvlTreeSet<i32> = [2, 1, 3].into_iter().collect();
        let config = LayoutConfig {
            root_spacing: 4.0,
            level_gap: 2.0,
        };
        let layout = layout_with(&set, config);
        assert_eq!(layout.position_of(&1), Some(Position { x: -4.0, y: -2.0 }));
        assert_eq!(layout.position_of(&3), Some(Position { x: 4.0, y: -2.0 }));
    }
}
