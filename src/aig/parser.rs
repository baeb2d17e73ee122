use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use log::{debug, warn};

use crate::{Aig, AigError, Lit, Result, aig::error::ParserError};

fn read_u32(s: &str) -> std::result::Result<u32, ParserError> {
    s.parse::<u32>()
        .map_err(|_| ParserError::InvalidToken(s.to_string() + " expected u32"))
}

fn read_lit(s: &str) -> std::result::Result<Lit, ParserError> {
    read_u32(s).map(Lit::new)
}

/// Reads the next line into `line`, failing if the input is exhausted.
fn next_line(reader: &mut impl BufRead, line: &mut String, expected: &str) -> Result<()> {
    line.clear();
    if reader.read_line(line)? == 0 {
        return Err(ParserError::UnexpectedEof(expected.to_string()).into());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    _m: u32,
    i: u32,
    l: u32,
    o: u32,
    a: u32,
}

impl TryFrom<&str> for Header {
    type Error = ParserError;

    fn try_from(line: &str) -> std::result::Result<Self, Self::Error> {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        match tokens.first() {
            Some(&"aag") => (),
            Some(&"aig") => {
                return Err(ParserError::UnsupportedFeature(
                    "binary AIGER, only aag is supported".to_string(),
                ));
            }
            _ => {
                return Err(ParserError::InvalidToken("expected aag header".to_string()));
            }
        }

        if tokens.len() < 6 {
            return Err(ParserError::InvalidToken("missing header tokens".to_string()));
        }

        let m = read_u32(tokens[1])?;
        let i = read_u32(tokens[2])?;
        let l = read_u32(tokens[3])?;
        let o = read_u32(tokens[4])?;
        let a = read_u32(tokens[5])?;

        if tokens.len() > 6 {
            return Err(ParserError::UnsupportedFeature(
                "header only supports M I L O A".to_string(),
            ));
        }

        Ok(Header { _m: m, i, l, o, a })
    }
}

/// Reads a record made of exactly `N` literals.
fn read_record<const N: usize>(
    line: &str,
    what: &str,
) -> std::result::Result<[Lit; N], ParserError> {
    let tokens = line.split_whitespace().collect::<Vec<&str>>();

    if tokens.len() < N {
        return Err(ParserError::InvalidToken(format!(
            "not enough {} tokens, got {:?}",
            what,
            line.trim()
        )));
    }

    if tokens.len() > N {
        return Err(ParserError::InvalidToken(format!(
            "expected nothing after {}, got {}",
            what, tokens[N]
        )));
    }

    let mut record = [Lit::FALSE; N];
    for (slot, token) in record.iter_mut().zip(tokens) {
        *slot = read_lit(token)?;
    }
    Ok(record)
}

fn read_input(line: &str) -> std::result::Result<Lit, ParserError> {
    read_record::<1>(line, "input").map(|[lit]| lit)
}

fn read_output(line: &str) -> std::result::Result<Lit, ParserError> {
    read_record::<1>(line, "output").map(|[lit]| lit)
}

fn read_and(line: &str) -> std::result::Result<(Lit, Lit, Lit), ParserError> {
    read_record::<3>(line, "and").map(|[lhs, rhs0, rhs1]| (lhs, rhs0, rhs1))
}

/// Latches are read to be skipped: `next` and an optional reset value.
fn read_latch(line: &str) -> std::result::Result<(), ParserError> {
    let tokens = line.split_whitespace().collect::<Vec<&str>>();

    if tokens.len() < 2 {
        return Err(ParserError::InvalidToken("not enough latch tokens".to_string()));
    }

    if tokens.len() > 3 {
        return Err(ParserError::InvalidToken(
            "expected nothing after latch, got ".to_string() + tokens[3],
        ));
    }

    for token in tokens {
        read_u32(token)?;
    }
    Ok(())
}

impl Aig {
    /// Creates an AIG from a reader using the ASCII AIGER format.
    ///
    /// Latches are consumed and discarded, anything after the and gates (symbols,
    /// comments) is ignored. Nothing is validated: see [`Aig::check_integrity`].
    pub fn from_ascii(mut reader: impl BufRead) -> Result<Self> {
        let mut line = String::new();

        next_line(&mut reader, &mut line, "aag header")?;
        let header = Header::try_from(line.as_str())?;
        debug!("parsing aag header {:?}", header);

        let mut aig = Aig::new();

        for _ in 0..header.i {
            next_line(&mut reader, &mut line, "input")?;
            aig.add_input(read_input(&line)?);
        }

        for _ in 0..header.l {
            next_line(&mut reader, &mut line, "latch")?;
            read_latch(&line)?;
        }
        if header.l > 0 {
            warn!("ignoring {} latches, only combinational logic is supported", header.l);
        }

        for _ in 0..header.o {
            next_line(&mut reader, &mut line, "output")?;
            aig.add_output(read_output(&line)?);
        }

        for _ in 0..header.a {
            next_line(&mut reader, &mut line, "and gate")?;
            let (lhs, rhs0, rhs1) = read_and(&line)?;
            aig.add_and(lhs, rhs0, rhs1);
        }

        Ok(aig)
    }

    /// Creates an AIG from an .aag (resp. .blif) file using the ASCII AIGER (resp. BLIF) format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str());
        // Checking the extension before touching the file system
        if !matches!(extension, Some("aag") | Some("blif")) {
            return Err(ParserError::UnsupportedFeature(format!(
                "invalid extension for {}, expected .aag or .blif",
                path.display()
            ))
            .into());
        }

        debug!("reading {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        match extension {
            Some("blif") => Aig::from_blif(reader),
            _ => Aig::from_ascii(reader),
        }
    }
}

impl FromStr for Aig {
    type Err = AigError;

    /// Parses ASCII AIGER text.
    fn from_str(s: &str) -> Result<Self> {
        Aig::from_ascii(s.as_bytes())
    }
}
