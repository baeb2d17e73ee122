//! Conversion from and to a combinational subset of BLIF.
//!
//! Only covers mapping directly to AIG nodes are understood: a single cube on
//! two signals (an and gate with optional inversions), a buffer, an inverter,
//! or a constant.

use std::{
    collections::{HashMap, HashSet},
    io::{BufRead, Write},
};

use log::debug;

use crate::{Aig, Lit, ParserError, Result, Var};

/// Reads logical lines: comments stripped, `\` continuations joined, blank lines skipped.
fn logical_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut pending = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.split('#').next().unwrap_or_default().trim_end();
        if let Some(head) = line.strip_suffix('\\') {
            pending.push_str(head);
            pending.push(' ');
            continue;
        }
        pending.push_str(line);
        if !pending.trim().is_empty() {
            lines.push(pending.trim().to_string());
        }
        pending.clear();
    }
    if !pending.trim().is_empty() {
        lines.push(pending.trim().to_string());
    }

    Ok(lines)
}

/// A `.names` block: input signals followed by the driven signal, and the cover rows.
#[derive(Debug)]
struct Names {
    signals: Vec<String>,
    rows: Vec<String>,
}

/// What a supported cover computes, inversion flags are true for `0` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cover {
    And([bool; 2]),
    Wire(bool),
    Const(bool),
}

impl Names {
    fn output(&self) -> &str {
        self.signals.last().map(String::as_str).unwrap_or_default()
    }

    fn inputs(&self) -> &[String] {
        &self.signals[..self.signals.len() - 1]
    }

    fn cover(&self) -> std::result::Result<Cover, ParserError> {
        let unsupported = || {
            ParserError::UnsupportedFeature(format!(
                "cover of {}, only single cube and gates, buffers, inverters and constants are supported",
                self.output()
            ))
        };
        let rows = self
            .rows
            .iter()
            .map(|row| row.split_whitespace().collect::<Vec<_>>())
            .collect::<Vec<_>>();

        match (self.inputs().len(), rows.as_slice()) {
            (0, []) => Ok(Cover::Const(false)),
            (0, [row]) if matches!(row.as_slice(), ["1"]) => Ok(Cover::Const(true)),
            (1, [row]) => match row.as_slice() {
                ["1", "1"] => Ok(Cover::Wire(false)),
                ["0", "1"] => Ok(Cover::Wire(true)),
                _ => Err(unsupported()),
            },
            (2, [row]) => match row.as_slice() {
                [cube, "1"] => match cube.as_bytes() {
                    [p @ (b'0' | b'1'), q @ (b'0' | b'1')] => {
                        Ok(Cover::And([*p == b'0', *q == b'0']))
                    }
                    _ => Err(unsupported()),
                },
                _ => Err(unsupported()),
            },
            _ => Err(unsupported()),
        }
    }
}

#[derive(Debug, Default)]
struct Netlist {
    inputs: Vec<String>,
    outputs: Vec<String>,
    blocks: Vec<Names>,
}

impl Netlist {
    fn read(reader: impl BufRead) -> Result<Self> {
        let mut netlist = Netlist::default();
        let mut in_names = false;

        for line in logical_lines(reader)? {
            if !line.starts_with('.') {
                match netlist.blocks.last_mut() {
                    Some(block) if in_names => block.rows.push(line),
                    _ => {
                        return Err(ParserError::InvalidToken(format!(
                            "cover row {:?} outside of a .names block",
                            line
                        ))
                        .into());
                    }
                }
                continue;
            }

            in_names = false;
            let mut tokens = line.split_whitespace();
            match tokens.next().unwrap_or_default() {
                ".model" => (),
                ".inputs" => netlist.inputs.extend(tokens.map(String::from)),
                ".outputs" => netlist.outputs.extend(tokens.map(String::from)),
                ".names" => {
                    let signals = tokens.map(String::from).collect::<Vec<_>>();
                    if signals.is_empty() {
                        let message = ".names without any signal".to_string();
                        return Err(ParserError::InvalidToken(message).into());
                    }
                    netlist.blocks.push(Names {
                        signals,
                        rows: Vec::new(),
                    });
                    in_names = true;
                }
                ".end" => break,
                directive => {
                    return Err(ParserError::UnsupportedFeature(format!(
                        "{} directive, only combinational logic is supported",
                        directive
                    ))
                    .into());
                }
            }
        }

        Ok(netlist)
    }
}

/// How a signal is driven.
#[derive(Debug, Clone, Copy)]
enum Driver<'a> {
    Lit(Lit),
    Alias { source: &'a str, inverted: bool },
}

/// Follows buffers and inverters from `name` down to an input, a gate or a constant.
fn resolve(
    drivers: &HashMap<&str, Driver<'_>>,
    name: &str,
) -> std::result::Result<Lit, ParserError> {
    let mut current = name;
    let mut inverted = false;
    let mut visited = HashSet::new();

    loop {
        match drivers.get(current) {
            None => return Err(ParserError::UndefinedSignal(current.to_string())),
            Some(Driver::Lit(lit)) => return Ok(lit.xor(inverted)),
            Some(&Driver::Alias {
                source,
                inverted: complement,
            }) => {
                if !visited.insert(current) {
                    return Err(ParserError::BufferLoop(name.to_string()));
                }
                inverted ^= complement;
                current = source;
            }
        }
    }
}

fn cube_bit(lit: Lit) -> char {
    if lit.is_inverted() { '0' } else { '1' }
}

impl Aig {
    /// Creates an AIG from a reader using the BLIF format.
    ///
    /// Inputs get variables `1..=I` in declaration order, then each and gate gets
    /// the next variable in file order. Signals may be used before being driven.
    pub fn from_blif(reader: impl BufRead) -> Result<Self> {
        let netlist = Netlist::read(reader)?;
        let mut drivers: HashMap<&str, Driver> = HashMap::new();
        let mut aig = Aig::new();
        let mut next_var: Var = 1;

        for name in &netlist.inputs {
            let lit = Lit::from_var(next_var, false);
            next_var += 1;
            if drivers.insert(name, Driver::Lit(lit)).is_some() {
                return Err(ParserError::MultipleDrivers(name.clone()).into());
            }
            aig.add_input(lit);
        }

        let mut ands = Vec::new();
        for block in &netlist.blocks {
            let driver = match block.cover()? {
                Cover::Const(value) => Driver::Lit(Lit::FALSE.xor(value)),
                Cover::Wire(inverted) => Driver::Alias {
                    source: &block.inputs()[0],
                    inverted,
                },
                Cover::And(inverted) => {
                    let lit = Lit::from_var(next_var, false);
                    next_var += 1;
                    ands.push((lit, block.inputs(), inverted));
                    Driver::Lit(lit)
                }
            };
            if drivers.insert(block.output(), driver).is_some() {
                let name = block.output().to_string();
                return Err(ParserError::MultipleDrivers(name).into());
            }
        }

        for output in &netlist.outputs {
            aig.add_output(resolve(&drivers, output)?);
        }
        for (lit, fanins, inverted) in ands {
            let fanin0 = resolve(&drivers, &fanins[0])?.xor(inverted[0]);
            let fanin1 = resolve(&drivers, &fanins[1])?.xor(inverted[1]);
            aig.add_and(lit, fanin0, fanin1);
        }

        debug!(
            "parsed blif: {} inputs, {} outputs, {} and gates out of {} .names blocks",
            aig.num_inputs(),
            aig.num_outputs(),
            aig.num_ands(),
            netlist.blocks.len()
        );
        Ok(aig)
    }

    /// Writes the AIG using the BLIF format.
    ///
    /// Inputs are named `i0, i1, ...`, outputs `o0, o1, ...` and and gates `n<var>`.
    /// Each and gate becomes a single cube, each output a buffer, an inverter or a constant.
    pub fn write_blif(&self, mut writer: impl Write) -> Result<()> {
        let input_names: HashMap<Var, String> = self
            .get_inputs()
            .iter()
            .enumerate()
            .map(|(k, input)| (input.var(), format!("i{}", k)))
            .collect();
        let name = |lit: Lit| match lit.var() {
            0 => "c0".to_string(),
            var => input_names
                .get(&var)
                .cloned()
                .unwrap_or_else(|| format!("n{}", var)),
        };

        // Only the definition in use of each variable
        let mut written = HashSet::new();
        let ands = self
            .get_ands()
            .filter(|&(var, fanin0, fanin1)| {
                self.and_fanins(Lit::from_var(var, false)) == Some((fanin0, fanin1))
                    && written.insert(var)
            })
            .collect::<Vec<_>>();

        writeln!(writer, ".model aigkit")?;
        if self.num_inputs() > 0 {
            let inputs = (0..self.num_inputs()).map(|k| format!(" i{}", k));
            writeln!(writer, ".inputs{}", inputs.collect::<String>())?;
        }
        if self.num_outputs() > 0 {
            let outputs = (0..self.num_outputs()).map(|k| format!(" o{}", k));
            writeln!(writer, ".outputs{}", outputs.collect::<String>())?;
        }

        // Constant fanins refer to c0, which is false
        if ands
            .iter()
            .any(|(_, fanin0, fanin1)| fanin0.is_const() || fanin1.is_const())
        {
            writeln!(writer, ".names c0")?;
        }
        for (var, fanin0, fanin1) in ands {
            writeln!(writer, ".names {} {} n{}", name(fanin0), name(fanin1), var)?;
            writeln!(writer, "{}{} 1", cube_bit(fanin0), cube_bit(fanin1))?;
        }

        for (k, &output) in self.get_outputs().iter().enumerate() {
            if output.is_const() {
                writeln!(writer, ".names o{}", k)?;
                if output == Lit::TRUE {
                    writeln!(writer, "1")?;
                }
            } else {
                writeln!(writer, ".names {} o{}", name(output), k)?;
                writeln!(writer, "{} 1", cube_bit(output))?;
            }
        }

        writeln!(writer, ".end")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::{env, fs};

    use test_log::test;

    use super::*;
    use crate::AigError;

    fn blif(text: &str) -> Result<Aig> {
        Aig::from_blif(text.as_bytes())
    }

    fn parser_error(result: Result<Aig>) -> ParserError {
        match result {
            Err(AigError::ParserError(e)) => e,
            other => panic!("expected a parser error, got {:?}", other),
        }
    }

    #[test]
    fn logical_lines_test() {
        let text = "# header\n.inputs a \\\n  b # two\n\n   \n.end\n";
        assert_eq!(
            logical_lines(text.as_bytes()).unwrap(),
            vec![".inputs a    b".to_string(), ".end".to_string()]
        );
    }

    #[test]
    fn cover_test() {
        fn names(signals: &[&str], rows: &[&str]) -> Names {
            Names {
                signals: signals.iter().map(|s| s.to_string()).collect(),
                rows: rows.iter().map(|s| s.to_string()).collect(),
            }
        }

        assert_eq!(names(&["y"], &[]).cover().unwrap(), Cover::Const(false));
        assert_eq!(names(&["y"], &["1"]).cover().unwrap(), Cover::Const(true));
        assert_eq!(names(&["a", "y"], &["1 1"]).cover().unwrap(), Cover::Wire(false));
        assert_eq!(names(&["a", "y"], &["0 1"]).cover().unwrap(), Cover::Wire(true));
        assert_eq!(
            names(&["a", "b", "y"], &["11 1"]).cover().unwrap(),
            Cover::And([false, false])
        );
        assert_eq!(
            names(&["a", "b", "y"], &["01 1"]).cover().unwrap(),
            Cover::And([true, false])
        );

        // Don't cares, off-sets, several cubes and wider gates
        assert!(names(&["a", "b", "y"], &["1- 1"]).cover().is_err());
        assert!(names(&["a", "b", "y"], &["11 0"]).cover().is_err());
        assert!(names(&["a", "b", "y"], &["10 1", "01 1"]).cover().is_err());
        assert!(names(&["a", "b", "c", "y"], &["111 1"]).cover().is_err());
        assert!(names(&["a", "y"], &[]).cover().is_err());
    }

    #[test]
    fn full_adder_blif() {
        let aig = Aig::from_file("assets/circuits/full_adder.blif").unwrap();
        assert_eq!(aig.num_inputs(), 3);
        assert_eq!(aig.num_ands(), 7);
        // cout is an inverter of the last gate, sum a buffer of the 6th one
        assert_eq!(aig.get_outputs(), &[Lit::new(21), Lit::new(18)]);

        let reference = Aig::from_file("assets/circuits/full_adder.aag").unwrap();
        assert_eq!(aig.truth_table().unwrap(), reference.truth_table().unwrap());
    }

    #[test]
    fn comments_and_continuations() {
        let text = ".model m\n.inputs a \\\n b # two inputs\n\
                    .outputs y\n.names a b y\n10 1\n.end\n.latch a b\n";
        let aig = blif(text).unwrap();
        let tt = aig.truth_table().unwrap();
        let outputs = tt.outputs().map(|o| o[0]).collect::<Vec<_>>();
        assert_eq!(outputs, vec![false, false, true, false]);
    }

    #[test]
    fn constants() {
        let aig = blif(".outputs f t\n.names f\n.names t\n1\n.end\n").unwrap();
        assert_eq!(aig.get_outputs(), &[Lit::FALSE, Lit::TRUE]);
        assert_eq!(aig.num_ands(), 0);
    }

    #[test]
    fn errors() {
        assert!(matches!(
            parser_error(blif(".inputs a\n.outputs y\n.names a b y\n11 1\n")),
            ParserError::UndefinedSignal(s) if s == "b"
        ));
        assert!(matches!(
            parser_error(blif(".outputs x\n.names x y\n1 1\n.names y x\n0 1\n")),
            ParserError::BufferLoop(s) if s == "x"
        ));
        assert!(matches!(
            parser_error(blif(".inputs a\n.outputs y\n.names a y\n1 1\n.names a y\n0 1\n")),
            ParserError::MultipleDrivers(s) if s == "y"
        ));
        assert!(matches!(
            parser_error(blif(".inputs a\n.outputs a\n.names a\n1\n")),
            ParserError::MultipleDrivers(s) if s == "a"
        ));
        assert!(matches!(
            parser_error(blif(".inputs a\n.outputs q\n.latch a q 0\n")),
            ParserError::UnsupportedFeature(_)
        ));
        assert!(matches!(
            parser_error(blif(".inputs a\n11 1\n")),
            ParserError::InvalidToken(_)
        ));
        assert!(matches!(parser_error(blif(".names\n")), ParserError::InvalidToken(_)));
    }

    #[test]
    fn write_and2() {
        let aig = Aig::from_file("assets/circuits/and2.aag").unwrap();
        let mut buf = Vec::new();
        aig.write_blif(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ".model aigkit\n\
             .inputs i0 i1\n\
             .outputs o0\n\
             .names i0 i1 n3\n\
             11 1\n\
             .names n3 o0\n\
             1 1\n\
             .end\n"
        );
    }

    #[test]
    fn write_constants() {
        // Outputs: false, !a, a & true
        let aig: Aig = "aag 2 1 0 3 1\n2\n0\n3\n4\n4 2 1\n".parse().unwrap();
        let mut buf = Vec::new();
        aig.write_blif(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            ".model aigkit\n\
             .inputs i0\n\
             .outputs o0 o1 o2\n\
             .names c0\n\
             .names i0 c0 n2\n\
             10 1\n\
             .names o0\n\
             .names i0 o1\n\
             0 1\n\
             .names n2 o2\n\
             1 1\n\
             .end\n"
        );

        let back = Aig::from_blif(buf.as_slice()).unwrap();
        assert_eq!(back.truth_table().unwrap(), aig.truth_table().unwrap());
    }

    #[test]
    fn write_then_read_full_adder() {
        let aig = Aig::from_file("assets/circuits/full_adder.aag").unwrap();
        let path = env::temp_dir().join("aigkit_full_adder_round_trip.blif");
        aig.to_file(&path).unwrap();
        let back = Aig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(back.num_ands(), aig.num_ands());
        assert_eq!(back.truth_table().unwrap(), aig.truth_table().unwrap());
        back.check_integrity().unwrap();
    }
}
