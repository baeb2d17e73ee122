//! Structural queries over an [`Aig`]: depth, fanouts and a summary in [`AigStats`].

use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use log::debug;

use crate::{Aig, AigError, Lit, Result, Var};

/// Summary of an AIG, as printed by `aigkit stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AigStats {
    pub inputs: usize,
    pub outputs: usize,
    pub ands: usize,
    pub depth: usize,
    pub max_fanout: usize,
}

impl Display for AigStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Inputs       : {}", self.inputs)?;
        writeln!(f, "Outputs      : {}", self.outputs)?;
        writeln!(f, "AND gates    : {}", self.ands)?;
        writeln!(f, "Depth        : {}", self.depth)?;
        write!(f, "Max fan-out  : {}", self.max_fanout)
    }
}

fn memo_depth(lit: Lit, memo: &HashMap<Var, usize>) -> usize {
    if lit.is_const() {
        0
    } else {
        memo.get(&lit.var()).copied().unwrap_or(0)
    }
}

impl Aig {
    /// Depth of the node `start` refers to, post order with an explicit stack.
    ///
    /// Constants, inputs and undefined variables have depth 0.
    fn depth_of(&self, start: Lit, memo: &mut HashMap<Var, usize>) -> Result<usize> {
        let mut in_progress: HashSet<Var> = HashSet::new();
        let mut stack: Vec<(Lit, bool)> = vec![(start, false)];

        while let Some((lit, last_time)) = stack.pop() {
            if lit.is_const() || (!last_time && memo.contains_key(&lit.var())) {
                continue;
            }

            let var = lit.var();
            let Some((fanin0, fanin1)) = self.and_fanins(lit) else {
                memo.insert(var, 0);
                continue;
            };

            if last_time {
                let depth = 1 + memo_depth(fanin0, memo).max(memo_depth(fanin1, memo));
                memo.insert(var, depth);
                in_progress.remove(&var);
            } else {
                if !in_progress.insert(var) {
                    return Err(AigError::CycleDetected(var));
                }
                stack.push((lit, true));
                stack.push((fanin1, false));
                stack.push((fanin0, false));
            }
        }

        Ok(memo_depth(start, memo))
    }

    /// Length of the longest chain of and gates from an input (or constant) to an output.
    ///
    /// Shared logic is only traversed once. Fails with [`AigError::CycleDetected`]
    /// instead of looping forever on a cyclic AIG.
    pub fn depth(&self) -> Result<usize> {
        let mut memo = HashMap::new();
        let mut depth = 0;
        for &output in self.get_outputs() {
            depth = depth.max(self.depth_of(output, &mut memo)?);
        }
        debug!("depth {} computed over {} variables", depth, memo.len());
        Ok(depth)
    }

    /// Number of references to each node, keyed by canonical literal.
    ///
    /// Both fanins of every and gate and every output count as a reference,
    /// constants are not counted.
    pub fn fanout_counts(&self) -> HashMap<Lit, usize> {
        let mut counts = HashMap::new();
        let references = self
            .get_ands()
            .flat_map(|(_, fanin0, fanin1)| [fanin0, fanin1])
            .chain(self.get_outputs().iter().copied());
        for lit in references.filter(|lit| !lit.is_const()) {
            *counts.entry(lit.canonical()).or_insert(0) += 1;
        }
        counts
    }

    /// The largest fanout count, 0 if nothing is referenced.
    pub fn max_fanout(&self) -> usize {
        self.fanout_counts().into_values().max().unwrap_or(0)
    }

    pub fn stats(&self) -> Result<AigStats> {
        Ok(AigStats {
            inputs: self.num_inputs(),
            outputs: self.num_outputs(),
            ands: self.num_ands(),
            depth: self.depth()?,
            max_fanout: self.max_fanout(),
        })
    }
}
