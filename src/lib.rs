//! # Pole Vector Library
//!
//! Places the pole vector target of a three-joint IK chain (e.g. shoulder,
//! elbow, wrist) from the world-space positions of its joints.
//!
//! The main components are:
//! - `solver`: the pole vector computation (`solve`, `solve_chain`, `solve_named`)
//!   and its error type `SolveError`.
//! - `intermediate`: names of the intermediate vectors and the `IntermediateSink`
//!   trait for observing them.
//! - `scene`: the `JointSource` lookup capability and the JSON-backed `JointTable`.
//! - `config`: `app.config` defaults for the command-line tool.

pub mod config;
pub mod intermediate;
pub mod scene;
pub mod solver;
pub mod text;

pub use intermediate::{Intermediate, IntermediateSink, IntermediateVectors, LogSink};
pub use scene::{JointSource, JointTable, LookupError};
pub use solver::{
    solve, solve_chain, solve_named, JointPositions, JointRole, PoleVectorError, SolveError,
    CHAIN_LENGTH_FACTOR,
};
