use super::{Lit, Var};

/// An AIG node.
///
/// Inputs and AND gates define a fresh variable. Outputs do not, they only record
/// the literal driving them and cannot be referenced by other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AigNode {
    /// A primary input.
    Input(Var),
    /// An AND gate with two (possibly complemented) fanins.
    And { var: Var, fanin0: Lit, fanin1: Lit },
    /// A primary output driven by the given literal.
    Output(Lit),
}

impl AigNode {
    /// Returns a new and gate.
    pub fn and(var: Var, fanin0: Lit, fanin1: Lit) -> Self {
        AigNode::And {
            var,
            fanin0,
            fanin1,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, AigNode::Input(_))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, AigNode::And { .. })
    }

    pub fn is_output(&self) -> bool {
        matches!(self, AigNode::Output(_))
    }

    /// Returns the variable defined by this node, [`None`] for outputs.
    pub fn get_var(&self) -> Option<Var> {
        match *self {
            AigNode::Input(var) => Some(var),
            AigNode::And { var, .. } => Some(var),
            AigNode::Output(_) => None,
        }
    }

    /// Returns the canonical literal defined by this node, [`None`] for outputs.
    pub fn get_lit(&self) -> Option<Lit> {
        self.get_var().map(|var| Lit::from_var(var, false))
    }

    /// Fanins of an and gate, or the driver of an output.
    pub fn get_fanins(&self) -> Vec<Lit> {
        match *self {
            AigNode::And { fanin0, fanin1, .. } => vec![fanin0, fanin1],
            AigNode::Output(driver) => vec![driver],
            AigNode::Input(_) => vec![],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn node_kinds() {
        let i = AigNode::Input(1);
        let a = AigNode::and(3, Lit::new(2), Lit::new(5));
        let o = AigNode::Output(Lit::new(7));

        assert!(i.is_input() && !i.is_and() && !i.is_output());
        assert!(a.is_and() && !a.is_input());
        assert!(o.is_output());

        assert_eq!(i.get_var(), Some(1));
        assert_eq!(a.get_lit(), Some(Lit::new(6)));
        assert_eq!(o.get_var(), None);
        assert_eq!(o.get_lit(), None);
    }

    #[test]
    fn fanins() {
        assert!(AigNode::Input(1).get_fanins().is_empty());
        assert_eq!(
            AigNode::and(3, Lit::new(2), Lit::new(5)).get_fanins(),
            vec![Lit::new(2), Lit::new(5)]
        );
        assert_eq!(AigNode::Output(Lit::new(7)).get_fanins(), vec![Lit::new(7)]);
    }
}
