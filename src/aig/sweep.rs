//! Sweep optimization: dead code elimination followed by structural hashing.
//!
//! See [`Aig::sweep`].

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{Aig, Lit, Result, Var, dfs::Dfs};

/// Disjoint sets of variables, with path compression.
///
/// Variables that were never inserted are their own representative.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<Var, Var>,
}

impl UnionFind {
    pub fn new() -> Self {
        UnionFind::default()
    }

    /// Adds `var` as a singleton set, if not known yet.
    pub fn insert(&mut self, var: Var) {
        self.parent.entry(var).or_insert(var);
    }

    /// Representative of the set of `var`.
    /// Every variable on the way is redirected to the representative.
    pub fn find(&mut self, var: Var) -> Var {
        let mut root = var;
        while let Some(&parent) = self.parent.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = var;
        while current != root {
            // Every variable on the way is known since it has a parent
            let Some(parent) = self.parent.insert(current, root) else {
                break;
            };
            current = parent;
        }
        root
    }

    /// Merges the set of `var` into the set of `rep`, `rep`'s representative is kept.
    pub fn union(&mut self, var: Var, rep: Var) {
        let root = self.find(var);
        let rep = self.find(rep);
        if root != rep {
            self.parent.insert(root, rep);
        }
    }

    /// Points every known variable directly to its representative.
    pub fn compress(&mut self) {
        let vars = self.parent.keys().copied().collect::<Vec<_>>();
        for var in vars {
            self.find(var);
        }
    }

    /// Same node as `lit` once merged, the phase of `lit` is kept.
    pub fn resolve(&mut self, lit: Lit) -> Lit {
        if lit.is_const() {
            lit
        } else {
            lit.with_var(self.find(lit.var()))
        }
    }
}

fn ordered(fanin0: Lit, fanin1: Lit) -> (Lit, Lit) {
    if fanin0 <= fanin1 {
        (fanin0, fanin1)
    } else {
        (fanin1, fanin0)
    }
}

impl Aig {
    /// Returns a smaller, functionally equivalent AIG. `self` is left untouched.
    ///
    /// - and gates not reachable from any output are dropped
    /// - and gates with the same fanins (in any order, after earlier merges) are merged
    ///   into the first one declared, and every reference is redirected to it.
    ///
    /// Gates are hashed in one pass over the declaration order: redundancy
    /// exposed by a merge further up is not revisited. Surviving gates have their
    /// fanins ordered, and the result goes through the serializer and the parser,
    /// so it is exactly what writing and reading it back would give.
    ///
    /// ```rust
    /// use aigkit::Aig;
    /// // Both gates compute a & b
    /// let aig: Aig = "aag 4 2 0 2 2\n2\n4\n6\n8\n6 2 4\n8 4 2\n".parse().unwrap();
    /// let swept = aig.sweep().unwrap();
    /// assert_eq!(swept.to_string(), "aag 3 2 0 2 1\n2\n4\n6\n6\n6 2 4\n");
    /// ```
    pub fn sweep(&self) -> Result<Aig> {
        let mut reachable: HashSet<Var> = HashSet::new();
        let mut dfs = Dfs::from_outputs(self);
        while let Some(var) = dfs.next(self) {
            reachable.insert(var);
        }

        let mut classes = UnionFind::new();
        let mut strash: HashMap<(Lit, Lit), Var> = HashMap::new();
        let mut survivors: Vec<(Var, Lit, Lit)> = Vec::new();
        let mut reachable_ands = 0;

        for (var, fanin0, fanin1) in self.get_ands() {
            // A variable defined twice: only the definition in use is reachable
            if !reachable.contains(&var)
                || self.and_fanins(Lit::from_var(var, false)) != Some((fanin0, fanin1))
            {
                continue;
            }
            reachable_ands += 1;
            classes.insert(var);

            let key = ordered(classes.resolve(fanin0), classes.resolve(fanin1));
            match strash.get(&key) {
                Some(&rep) => classes.union(var, rep),
                None => {
                    strash.insert(key, var);
                    survivors.push((var, key.0, key.1));
                }
            }
        }
        classes.compress();

        debug!(
            "sweep: {} reachable and gates out of {}, {} merged, {} kept",
            reachable_ands,
            self.num_ands(),
            reachable_ands - survivors.len(),
            survivors.len()
        );

        let mut staging = Aig::new();
        for &input in self.get_inputs() {
            staging.add_input(input);
        }
        for &output in self.get_outputs() {
            staging.add_output(classes.resolve(output));
        }
        for (var, fanin0, fanin1) in survivors {
            // A fanin declared after its gate may have been merged since
            let (fanin0, fanin1) = ordered(classes.resolve(fanin0), classes.resolve(fanin1));
            staging.add_and(Lit::from_var(var, false), fanin0, fanin1);
        }

        staging.to_string().parse()
    }
}
