use crate::engine::TreeSolver;

/// Configures a [`TreeSolver`].
///
/// The root only changes which of several tied optima is returned; the minimum
/// energy is the same for every root.
#[derive(Debug, Clone, Default)]
pub struct TreeSolverBuilder {
    root: Option<usize>,
}

impl TreeSolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_root(mut self, root: usize) -> Self {
        self.root = Some(root);
        self
    }
    pub fn build(self) -> TreeSolver {
        match self.root {
            Some(r) => TreeSolver::with_root(r),
            None => TreeSolver::new(),
        }
    }
}
