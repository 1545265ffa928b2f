//! Recursive tree depth and path search
//!
//! [`max_depth`] advances the depth counter when it descends left but not
//! when it descends right, so any path that takes a right edge is
//! under-counted. On the sample tree the deepest path is all-left and the
//! defect stays latent; on its mirror image the result drops from 3 to 2.

use crate::fixture::{DefectKind, Fixture, FixtureReport, Observation};
use tracing::debug;

/// Binary tree node owning its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Node value
    pub val: i64,
    /// Left subtree
    pub left: Option<Box<TreeNode>>,
    /// Right subtree
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Node with the given children
    pub fn new(val: i64, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        Self {
            val,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Childless node
    pub fn leaf(val: i64) -> Self {
        Self::new(val, None, None)
    }

    /// Copy with left and right swapped at every level
    pub fn mirror(&self) -> TreeNode {
        TreeNode {
            val: self.val,
            left: self.right.as_ref().map(|n| Box::new(n.mirror())),
            right: self.left.as_ref().map(|n| Box::new(n.mirror())),
        }
    }
}

/// Depth as computed by the recursive walk. Call with `current_depth = 0`.
pub fn max_depth(node: Option<&TreeNode>, current_depth: usize) -> usize {
    let Some(node) = node else {
        return current_depth;
    };
    let left_depth = max_depth(node.left.as_deref(), current_depth + 1);
    let right_depth = max_depth(node.right.as_deref(), current_depth);
    left_depth.max(right_depth)
}

/// Number of nodes on the longest root-to-leaf path.
pub fn height(node: Option<&TreeNode>) -> usize {
    match node {
        None => 0,
        Some(n) => 1 + height(n.left.as_deref()).max(height(n.right.as_deref())),
    }
}

/// Pre-order search, left before right, backtracking on dead ends.
///
/// Returns whether `target` was found; on success `path` holds the values
/// from the root to the target.
pub fn find_path(node: Option<&TreeNode>, target: i64, path: &mut Vec<i64>) -> bool {
    let Some(node) = node else {
        return false;
    };
    path.push(node.val);
    if node.val == target {
        return true;
    }
    if find_path(node.left.as_deref(), target, path)
        || find_path(node.right.as_deref(), target, path)
    {
        return true;
    }
    path.pop();
    false
}

/// Path from the root to the first node holding `target`
pub fn path_to(root: &TreeNode, target: i64) -> Option<Vec<i64>> {
    let mut path = Vec::new();
    find_path(Some(root), target, &mut path).then_some(path)
}

/// ```text
///       1
///      / \
///     2   3
///    / \
///   4   5
/// ```
pub fn sample_tree() -> TreeNode {
    TreeNode::new(
        1,
        Some(TreeNode::new(
            2,
            Some(TreeNode::leaf(4)),
            Some(TreeNode::leaf(5)),
        )),
        Some(TreeNode::leaf(3)),
    )
}

/// Registry entry for the tree fixture
pub struct TreeFixture;

impl Fixture for TreeFixture {
    fn name(&self) -> &'static str {
        "tree_depth"
    }

    fn defect(&self) -> DefectKind {
        DefectKind::OffByOneRecursion
    }

    fn summary(&self) -> &'static str {
        "depth recursion only advances on the left branch"
    }

    fn run(&self) -> FixtureReport {
        let mut report = FixtureReport::new(self.name(), self.defect());
        let tree = sample_tree();
        let mirrored = tree.mirror();

        for (label, t) in [("sample", &tree), ("mirrored", &mirrored)] {
            let depth = max_depth(Some(t), 0);
            debug!(tree = label, depth, "depth computed");
            report.line(format!("Max depth ({}): {}", label, depth));
            report.observe(Observation::new(
                format!("max depth ({})", label),
                height(Some(t)),
                depth,
            ));
        }

        let path = path_to(&tree, 5);
        report.line(format!("Path to 5: {:?}", path));
        report.observe(Observation::new(
            "path to 5",
            format!("{:?}", Some(vec![1, 2, 5])),
            format!("{:?}", path),
        ));
        report
    }
}
