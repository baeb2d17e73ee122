//! Exhaustive boolean simulation of an [`Aig`].
//!
//! The cost is exponential: [`Aig::truth_table`] evaluates the AIG `2^I` times for `I` inputs.
//! Bounding `I` is left to the caller.

use std::{collections::HashMap, fmt::Display};

use log::debug;

use crate::{Aig, AigError, Lit, Result, Var};

/// Every assignment of `n` boolean inputs, in ascending binary order.
///
/// Row `k` holds the binary expansion of `k`, most significant bit first.
///
/// ```rust
/// use aigkit::simulation::enumerate_assignments;
/// assert_eq!(
///     enumerate_assignments(2),
///     vec![
///         vec![false, false],
///         vec![false, true],
///         vec![true, false],
///         vec![true, true],
///     ]
/// );
/// ```
///
/// # Panics
///
/// Panics if `2^n` does not fit in a `usize`, i.e. `n >= usize::BITS`.
/// [`Aig::truth_table`] reports [`AigError::TooManyInputs`] instead.
pub fn enumerate_assignments(n: usize) -> Vec<Vec<bool>> {
    assert!(
        n < usize::BITS as usize,
        "cannot enumerate 2^{} assignments",
        n
    );
    (0..1usize << n)
        .map(|row| (0..n).rev().map(|bit| (row >> bit) & 1 == 1).collect())
        .collect()
}

/// A truth table: each row holds the input bits followed by the output bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    num_inputs: usize,
    num_outputs: usize,
    rows: Vec<Vec<bool>>,
}

impl TruthTable {
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// The output bits of each row.
    pub fn outputs(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.rows.iter().map(|row| &row[self.num_inputs..])
    }
}

impl PartialEq<Vec<Vec<bool>>> for TruthTable {
    fn eq(&self, other: &Vec<Vec<bool>>) -> bool {
        self.rows == *other
    }
}

impl Display for TruthTable {
    /// One line per row, `0`/`1` separated by spaces, inputs and outputs separated by `|`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let bits = |bits: &[bool]| {
                bits.iter()
                    .map(|&b| if b { "1" } else { "0" })
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            let (inputs, outputs) = row.split_at(self.num_inputs);
            writeln!(f, "{} | {}", bits(inputs), bits(outputs))?;
        }
        Ok(())
    }
}

/// Values computed so far for one assignment.
struct Values(HashMap<Var, bool>);

impl Values {
    fn resolve(&self, lit: Lit) -> Result<bool> {
        if lit.is_const() {
            return Ok(lit == Lit::TRUE);
        }
        self.0
            .get(&lit.var())
            .map(|&value| value ^ lit.is_inverted())
            .ok_or(AigError::UnresolvedLiteral(lit))
    }
}

impl Aig {
    /// Evaluates the gates in `order`, every fanin must come before its gate.
    fn evaluate_in_order(&self, assignment: &[bool], order: &[Var]) -> Result<Vec<bool>> {
        if assignment.len() != self.num_inputs() {
            return Err(AigError::InputCountMismatch {
                expected: self.num_inputs(),
                got: assignment.len(),
            });
        }

        let mut values = Values(HashMap::with_capacity(assignment.len() + order.len()));
        for (input, &value) in self.get_inputs().iter().zip(assignment) {
            values.0.insert(input.var(), value);
        }

        for &var in order {
            let Some((fanin0, fanin1)) = self.and_fanins(Lit::from_var(var, false)) else {
                continue;
            };
            // Both fanins are resolved whatever their values
            let (value0, value1) = (values.resolve(fanin0)?, values.resolve(fanin1)?);
            values.0.insert(var, value0 && value1);
        }

        self.get_outputs()
            .iter()
            .map(|&output| values.resolve(output))
            .collect()
    }

    /// Output values for the given input values (one per input, in declaration order).
    ///
    /// Each and gate is evaluated once, after its fanins, whatever the declaration
    /// order of the file. Fails on cycles ([`AigError::CycleDetected`]) and on
    /// references to undefined variables ([`AigError::UnresolvedLiteral`]).
    pub fn evaluate(&self, assignment: &[bool]) -> Result<Vec<bool>> {
        let order = self.topological_order()?;
        self.evaluate_in_order(assignment, &order)
    }

    /// Simulates every input assignment, see [`enumerate_assignments`] for the row order.
    ///
    /// Fails with [`AigError::TooManyInputs`] when the rows cannot even be counted.
    pub fn truth_table(&self) -> Result<TruthTable> {
        if self.num_inputs() >= usize::BITS as usize {
            return Err(AigError::TooManyInputs(self.num_inputs()));
        }
        let order = self.topological_order()?;
        let assignments = enumerate_assignments(self.num_inputs());
        debug!(
            "simulating {} assignments over {} and gates",
            assignments.len(),
            order.len()
        );

        let rows = assignments
            .into_iter()
            .map(|mut row| {
                let outputs = self.evaluate_in_order(&row, &order)?;
                row.extend(outputs);
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TruthTable {
            num_inputs: self.num_inputs(),
            num_outputs: self.num_outputs(),
            rows,
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c == '1')
            .collect()
    }

    #[test]
    fn enumerate_assignments_test() {
        assert_eq!(enumerate_assignments(0), vec![Vec::<bool>::new()]);
        assert_eq!(enumerate_assignments(1), vec![bits("0"), bits("1")]);

        let rows = enumerate_assignments(4);
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows.iter().collect::<HashSet<_>>().len(), 16);
        assert_eq!(rows[5], bits("0101"));
        // Strictly ascending when read as binary numbers, MSB first
        assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn and2_truth_table() {
        let aig = Aig::from_file("assets/circuits/and2.aag").unwrap();
        let tt = aig.truth_table().unwrap();
        assert_eq!(tt.num_inputs(), 2);
        assert_eq!(tt.num_outputs(), 1);
        assert_eq!(tt, vec![bits("000"), bits("010"), bits("100"), bits("111")]);
        assert_eq!(tt.to_string(), "0 0 | 0\n0 1 | 0\n1 0 | 0\n1 1 | 1\n");
    }

    #[test]
    fn full_adder_truth_table() {
        let aig = Aig::from_file("assets/circuits/full_adder.aag").unwrap();
        let tt = aig.truth_table().unwrap();
        // A B Cin | Cout Sum
        let expected = [
            "000 00", "001 01", "010 01", "011 10", "100 01", "101 10", "110 10", "111 11",
        ]
        .map(bits)
        .to_vec();
        assert_eq!(tt, expected);
        assert_eq!(
            tt.outputs().collect::<Vec<_>>(),
            expected.iter().map(|row| &row[3..]).collect::<Vec<_>>()
        );
    }

    #[test]
    fn evaluate_single_assignment() {
        let aig = Aig::from_file("assets/circuits/full_adder.aag").unwrap();
        assert_eq!(aig.evaluate(&bits("011")).unwrap(), bits("10"));
        assert!(matches!(
            aig.evaluate(&bits("01")),
            Err(AigError::InputCountMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn constants_and_inverted_outputs() {
        // Outputs: false, true, !a, a & !a
        let aig: Aig = "aag 2 1 0 4 1\n2\n0\n1\n3\n4\n4 2 3\n".parse().unwrap();
        assert_eq!(
            aig.truth_table().unwrap(),
            vec![bits("0 0110"), bits("1 0100")]
        );
    }

    #[test]
    fn inputs_bind_in_declaration_order() {
        // Inputs declared b then a: the first assignment bit drives variable 2
        let aig: Aig = "aag 3 2 0 1 1\n4\n2\n6\n6 4 3\n".parse().unwrap();
        assert_eq!(aig.evaluate(&bits("10")).unwrap(), bits("1"));
        assert_eq!(aig.evaluate(&bits("01")).unwrap(), bits("0"));
    }

    #[test]
    fn unsorted_and_gates_are_evaluated_after_their_fanins() {
        let aig = Aig::from_file("assets/circuits/unsorted.aag").unwrap();
        assert_eq!(
            aig.truth_table().unwrap(),
            vec![bits("000"), bits("010"), bits("100"), bits("111")]
        );
    }

    #[test]
    fn dangling_reference_is_a_logic_error() {
        let aig: Aig = "aag 3 1 0 1 1\n2\n4\n4 2 6\n".parse().unwrap();
        // Whatever the value of the defined fanin
        for assignment in ["0", "1"] {
            assert!(matches!(
                aig.evaluate(&bits(assignment)),
                Err(AigError::UnresolvedLiteral(l)) if l == Lit::new(6)
            ));
        }
        assert!(matches!(aig.truth_table(), Err(AigError::UnresolvedLiteral(_))));

        // Dangling first fanin, the defined one being false
        let aig: Aig = "aag 3 1 0 1 1\n2\n4\n4 6 2\n".parse().unwrap();
        assert!(matches!(
            aig.evaluate(&bits("0")),
            Err(AigError::UnresolvedLiteral(l)) if l == Lit::new(6)
        ));
    }

    #[test]
    fn cycles_are_rejected() {
        let aig: Aig = "aag 3 1 0 1 2\n2\n4\n4 6 2\n6 5 2\n".parse().unwrap();
        assert!(matches!(aig.truth_table(), Err(AigError::CycleDetected(_))));
    }

    #[test]
    fn too_many_inputs_is_an_error() {
        let mut aig = Aig::new();
        let n = usize::BITS;
        for var in 1..=n {
            aig.add_input(Lit::from_var(var, false));
        }
        aig.add_output(Lit::from_var(1, false));
        assert!(matches!(
            aig.truth_table(),
            Err(AigError::TooManyInputs(count)) if count == n as usize
        ));
    }

    #[test]
    #[should_panic]
    fn enumerate_assignments_overflow_panics() {
        enumerate_assignments(usize::BITS as usize);
    }

    #[test]
    fn no_inputs_means_one_row() {
        let aig: Aig = "aag 0 0 0 1 0\n1\n".parse().unwrap();
        assert_eq!(aig.truth_table().unwrap(), vec![bits("1")]);
        assert_eq!(aig.truth_table().unwrap().to_string(), " | 1\n");
    }
}
