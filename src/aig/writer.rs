use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::{Aig, Lit, ParserError, Result, Var};

impl Aig {
    /// The largest variable index referenced anywhere (inputs, outputs, and gates and their fanins).
    ///
    /// This is the `M` of the AIGER header, recomputed rather than trusted from the source.
    pub fn max_var(&self) -> Var {
        let ands = self
            .get_ands()
            .flat_map(|(var, fanin0, fanin1)| [Lit::from_var(var, false), fanin0, fanin1]);
        self.get_inputs()
            .iter()
            .chain(self.get_outputs())
            .copied()
            .chain(ands)
            .filter(|lit| !lit.is_const())
            .map(Lit::var)
            .max()
            .unwrap_or(0)
    }

    /// Writes the AIG using the ASCII AIGER format.
    pub fn write_ascii(&self, mut writer: impl Write) -> Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the AIG to an .aag (resp. .blif) file using the ASCII AIGER (resp. BLIF) format.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str());
        if !matches!(extension, Some("aag") | Some("blif")) {
            return Err(ParserError::UnsupportedFeature(format!(
                "invalid extension for {}, expected .aag or .blif",
                path.display()
            ))
            .into());
        }

        debug!("writing {}", path.display());
        let writer = BufWriter::new(File::create(path)?);
        match extension {
            Some("blif") => self.write_blif(writer),
            _ => self.write_ascii(writer),
        }
    }
}

impl Display for Aig {
    /// Renders the AIG using the ASCII AIGER format:
    /// - header with recomputed `M` and no latches
    /// - inputs in canonical form, outputs as is
    /// - and gates sorted by variable index.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ands = self.get_ands().collect::<Vec<_>>();
        // Stable: a variable defined twice keeps its declaration order
        ands.sort_by_key(|&(var, _, _)| var);

        writeln!(
            f,
            "aag {} {} 0 {} {}",
            self.max_var(),
            self.num_inputs(),
            self.num_outputs(),
            ands.len()
        )?;
        for input in self.get_inputs() {
            writeln!(f, "{}", input.canonical())?;
        }
        for output in self.get_outputs() {
            writeln!(f, "{}", output)?;
        }
        for (var, fanin0, fanin1) in ands {
            writeln!(f, "{} {} {}", Lit::from_var(var, false), fanin0, fanin1)?;
        }
        Ok(())
    }
}
