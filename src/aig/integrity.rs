use std::collections::HashSet;

use crate::{Aig, AigError, Result};

impl Aig {
    /// Checking if the AIG structure is correct, that is:
    /// - no node defines variable 0, reserved for the constants
    /// - no variable is defined twice
    /// - every fanin and output refers to a constant or a defined variable
    /// - there is no cycle.
    ///
    /// Parsing and building never check anything, so this is the place to validate
    /// a circuit coming from an untrusted source.
    pub fn check_integrity(&self) -> Result<()> {
        let mut defined = HashSet::new();
        for var in self.get_nodes().iter().filter_map(|node| node.get_var()) {
            if var == 0 {
                return Err(AigError::VarZeroReserved);
            }
            if !defined.insert(var) {
                return Err(AigError::DuplicateVariable(var));
            }
        }

        let references = self
            .get_ands()
            .flat_map(|(_, fanin0, fanin1)| [fanin0, fanin1])
            .chain(self.get_outputs().iter().copied());
        for lit in references {
            if !lit.is_const() && !defined.contains(&lit.var()) {
                return Err(AigError::UndefinedLiteral(lit));
            }
        }

        // Checks for acyclicity
        self.topological_order()?;

        Ok(())
    }
}
