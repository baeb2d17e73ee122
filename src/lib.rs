//! And-Inverter Graphs: read and write ASCII AIGER (and a BLIF subset), measure,
//! simulate exhaustively and sweep redundant logic.
//!
//! ```rust
//! use aigkit::Aig;
//! let aig: Aig = "aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n".parse().unwrap();
//! assert_eq!(aig.depth().unwrap(), 1);
//! assert_eq!(aig.evaluate(&[true, true]).unwrap(), vec![true]);
//! ```

pub mod aig;

// Re-exporting symbols and modules.
pub use aig::analysis::{self, AigStats};
pub use aig::dfs;
pub use aig::simulation::{self, TruthTable, enumerate_assignments};
pub use aig::sweep::{self, UnionFind};
pub use aig::{Aig, AigError, AigNode, Lit, ParserError, Result, Var};
