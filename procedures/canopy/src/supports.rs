pub mod branch;
pub mod builder;

use branch::{Branch, BranchKind};

/// Arena of the branches grown from one start point.
///
/// Branches are stored in emission order; index 0 is the trunk and every fork
/// records the index of the branch it grows from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupportTree {
	branches: Vec<Branch>,
}

impl SupportTree {
	pub(crate) fn push(&mut self, branch: Branch) -> usize {
		self.branches.push(branch);
		self.branches.len() - 1
	}

	pub fn branches(&self) -> &[Branch] {
		&self.branches
	}

	pub fn get(&self, index: usize) -> Option<&Branch> {
		self.branches.get(index)
	}

	pub fn trunk(&self) -> Option<&Branch> {
		self.branches.first().filter(|branch| branch.kind == BranchKind::Trunk)
	}

	pub fn forks(&self) -> impl Iterator<Item = &Branch> {
		self.branches.iter().filter(|branch| branch.kind == BranchKind::Fork)
	}

	pub fn children(&self, index: usize) -> impl Iterator<Item = (usize, &Branch)> {
		self.branches.iter().enumerate().filter(move |(_, branch)| branch.parent == Some(index))
	}

	/// Trunk plus forks.
	pub fn len(&self) -> usize {
		self.branches.len()
	}

	pub fn is_empty(&self) -> bool {
		self.branches.is_empty()
	}

	/// Deepest fork generation, or `None` when the tree has only its trunk.
	pub fn depth(&self) -> Option<u32> {
		self.forks().map(|branch| branch.generation).max()
	}
}
