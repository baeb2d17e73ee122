//! Provides a DFS visitor to allow simple AIG traversal.
//!
//! See [`Dfs`] for details.
//!
//! [`Dfs`]: Dfs

use std::collections::HashSet;

use crate::{Aig, Lit, Var};

/// A simple DFS visitor.
///
/// Variables of defined nodes (inputs and and gates) are yielded in preorder, each
/// one once. Constants and undefined variables are silently skipped. You can:
/// - start a DFS from a literal using [`from_lit`]
/// - or visit the logic reachable from the outputs using [`from_outputs`].
///
/// In the latter case, it will start by the fanin of the first output,
/// then explore all non-previously-explored nodes from the fanin of the second output,
/// and so on until all the outputs have been processed.
///
/// [`from_lit`]: Dfs::from_lit
/// [`from_outputs`]: Dfs::from_outputs
///
/// Example:
///
/// ```rust
/// use aigkit::{Aig, dfs::Dfs};
/// let aig: Aig = "aag 4 2 0 1 2\n2\n4\n8\n6 2 4\n8 6 3\n".parse().unwrap();
/// let mut dfs = Dfs::from_outputs(&aig);
/// let mut visited = Vec::new();
/// while let Some(var) = dfs.next(&aig) {
///     visited.push(var);
/// }
/// assert_eq!(visited, vec![4, 3, 2, 1]);
/// ```
///
/// Inspired by [petgraph DFS](https://docs.rs/petgraph/latest/petgraph/visit/struct.Dfs.html).
pub struct Dfs {
    /// Must maintain the following invariant:
    /// - all variables on the stack have not been visited yet
    /// - they are in `seen` to avoid adding them one more time to the stack
    /// - the different outputs from which to start a DFS are in starts, last one first
    ///   (they might have been visited already by the time we start the DFS from them,
    ///   and will simply be discarded if that's the case).
    stack: Vec<Var>,
    seen: HashSet<Var>,
    starts: Vec<Var>,
}

impl Dfs {
    /// Create a DFS from the node `start` refers to.
    /// You will only browse the fanin of this node.
    pub fn from_lit(start: Lit) -> Self {
        Dfs {
            stack: Vec::new(),
            seen: HashSet::new(),
            starts: Vec::from_iter((!start.is_const()).then_some(start.var())),
        }
    }

    /// Create a DFS from the outputs of the given AIG.
    pub fn from_outputs(aig: &Aig) -> Self {
        let starts = aig
            .get_outputs()
            .iter()
            .rev()
            .filter(|lit| !lit.is_const())
            .map(|lit| lit.var())
            .collect();
        Dfs {
            stack: Vec::new(),
            seen: HashSet::new(),
            starts,
        }
    }

    /// Returns true if we are ready to start again! Else false, we are done.
    /// Should only be called when stack is empty (ie we are done with the current fanin).
    fn new_start(&mut self) -> bool {
        debug_assert!(self.stack.is_empty());

        while let Some(var) = self.starts.pop() {
            if self.seen.insert(var) {
                self.stack.push(var);
                return true;
            }
        }
        false
    }

    /// Yield the next variable of the DFS, or None if it is done.
    /// If you created the DFS with the [`from_outputs`] method,
    /// this might be a new output if the current fanin has been fully explored.
    ///
    /// [`from_outputs`]: Dfs::from_outputs
    pub fn next(&mut self, aig: &Aig) -> Option<Var> {
        loop {
            while let Some(var) = self.stack.pop() {
                let Some(node) = aig.get_node(var) else {
                    // Dangling reference, nothing to yield
                    continue;
                };
                // Pushing fanin1 first so that fanin0 is visited first
                for child in node.get_fanins().into_iter().rev() {
                    if !child.is_const() && self.seen.insert(child.var()) {
                        self.stack.push(child.var());
                    }
                }
                return Some(var);
            }

            // Maybe we can start from a different output?
            if !self.new_start() {
                return None;
            }
        }
    }
}
