//! Module defining the [`Aig`] struct, as well as [`AigNode`], [`Lit`] and some others relevant structs.
//!
//! To read a circuit, check [`Aig::from_file`] or parse a string with [`str::parse`].
//! Structural queries live in [`analysis`], simulation in [`simulation`] and the
//! optimization pass in [`Aig::sweep`].

pub mod analysis;
mod blif;
pub mod dfs;
pub mod error;
mod integrity;
pub mod literal;
pub mod node;
mod parser;
pub mod simulation;
pub mod sweep;
mod writer;

use std::collections::{HashMap, HashSet};

pub use error::{AigError, ParserError, Result};
pub use literal::{Lit, Var};
pub use node::AigNode;

/// A whole AIG.
///
/// Nodes live in an arena, in declaration order (for a parsed file: inputs, then
/// outputs, then and gates). Each variable maps to the position of its defining
/// node, and nodes refer to each other through [`Lit`]s only.
///
/// An AIG is built once, by a parser or with [`add_input`], [`add_output`] and
/// [`add_and`]. Transformations such as [`Aig::sweep`] never touch the source
/// and return a brand new AIG, so both can be compared afterwards.
///
/// Building does not validate anything: references may dangle and gates may
/// loop. Use [`Aig::check_integrity`] when the source is not trusted.
///
/// [`add_input`]: Aig::add_input
/// [`add_output`]: Aig::add_output
/// [`add_and`]: Aig::add_and
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aig {
    nodes: Vec<AigNode>,
    /// Input literals as declared (not necessarily canonical).
    inputs: Vec<Lit>,
    outputs: Vec<Lit>,
    /// Position in `nodes` of the node defining each variable.
    /// If a variable is defined twice, the last definition wins.
    defs: HashMap<Var, usize>,
}

impl Aig {
    /// Create a brand new empty AIG.
    pub fn new() -> Self {
        Aig::default()
    }

    fn push_definition(&mut self, var: Var, node: AigNode) -> Var {
        self.defs.insert(var, self.nodes.len());
        self.nodes.push(node);
        var
    }

    /// Declare a primary input. The canonical form of `lit` defines a fresh variable.
    pub fn add_input(&mut self, lit: Lit) -> Var {
        self.inputs.push(lit);
        self.push_definition(lit.var(), AigNode::Input(lit.var()))
    }

    /// Declare a primary output driven by `lit` (any literal, constants included).
    pub fn add_output(&mut self, lit: Lit) {
        self.outputs.push(lit);
        self.nodes.push(AigNode::Output(lit));
    }

    /// Declare an and gate. The canonical form of `lit` defines a fresh variable.
    pub fn add_and(&mut self, lit: Lit, fanin0: Lit, fanin1: Lit) -> Var {
        self.push_definition(lit.var(), AigNode::and(lit.var(), fanin0, fanin1))
    }

    /// Retrieves the input or and gate defining `var`.
    pub fn get_node(&self, var: Var) -> Option<&AigNode> {
        self.defs.get(&var).map(|&pos| &self.nodes[pos])
    }

    /// Retrieves all nodes, in declaration order.
    pub fn get_nodes(&self) -> &[AigNode] {
        &self.nodes
    }

    /// Retrieves input literals, in declaration order.
    pub fn get_inputs(&self) -> &[Lit] {
        &self.inputs
    }

    /// Retrieves output literals, in declaration order.
    pub fn get_outputs(&self) -> &[Lit] {
        &self.outputs
    }

    /// Iterates over and gates as `(var, fanin0, fanin1)`, in declaration order.
    pub fn get_ands(&self) -> impl Iterator<Item = (Var, Lit, Lit)> + '_ {
        self.nodes.iter().filter_map(|node| match *node {
            AigNode::And {
                var,
                fanin0,
                fanin1,
            } => Some((var, fanin0, fanin1)),
            _ => None,
        })
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn num_ands(&self) -> usize {
        self.get_ands().count()
    }

    /// Returns the fanins of `lit` if it refers to an and gate.
    fn and_fanins(&self, lit: Lit) -> Option<(Lit, Lit)> {
        if lit.is_const() {
            return None;
        }
        match self.get_node(lit.var())? {
            AigNode::And { fanin0, fanin1, .. } => Some((*fanin0, *fanin1)),
            _ => None,
        }
    }

    fn topological_visit(
        &self,
        root: Var,
        sort: &mut Vec<Var>,
        seen: &mut HashSet<Var>,
        done: &mut HashSet<Var>,
    ) -> Result<()> {
        let mut stack: Vec<(Var, bool)> = vec![(root, false)];

        while let Some((var, last_time)) = stack.pop() {
            // Post order: all fanins are done
            if last_time {
                done.insert(var);
                sort.push(var);
                continue;
            }

            if done.contains(&var) {
                continue;
            } else if seen.contains(&var) {
                return Err(AigError::CycleDetected(var));
            }

            seen.insert(var);
            stack.push((var, true));

            let Some((fanin0, fanin1)) = self.and_fanins(Lit::from_var(var, false)) else {
                continue;
            };
            // Pushing fanin1 first so that fanin0 gets sorted first
            for fanin in [fanin1, fanin0] {
                if self.and_fanins(fanin).is_some() && !done.contains(&fanin.var()) {
                    stack.push((fanin.var(), false));
                }
            }
        }

        Ok(())
    }

    /// Returns the variables of all and gates, each one after its fanins, will error
    /// if a cycle is detected.
    ///
    /// Gates are tried in declaration order, so a file that is already topologically
    /// sorted keeps its order.
    pub fn topological_order(&self) -> Result<Vec<Var>> {
        let mut sort = Vec::new();
        let mut seen = HashSet::new();
        let mut done = HashSet::new();

        for (var, _, _) in self.get_ands() {
            if !done.contains(&var) {
                self.topological_visit(var, &mut sort, &mut seen, &mut done)?;
            }
        }

        Ok(sort)
    }
}
