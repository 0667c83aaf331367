//! Pole vector placement for a three-joint chain.
//!
//! The pole vector sits in the plane of the chain, on the side of the middle
//! joint, pushed away from the start-end axis by three quarters of the chain
//! length. Positions are `Point3<f64>`, offsets between them are `Vector3<f64>`.

use std::fmt;

use log::trace;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::intermediate::{Intermediate, IntermediateSink};
use crate::scene::{JointSource, LookupError};

/// Fraction of the total chain length used as the pole vector distance from the mid joint.
pub const CHAIN_LENGTH_FACTOR: f64 = 0.75;

/// Relative length below which the mid joint counts as lying on the start-end axis.
pub const COLLINEAR_TOLERANCE: f64 = 1e-12;

// Coordinate differences inside this range are used as they are.
const RESCALE_MIN: f64 = 1e-150;
const RESCALE_MAX: f64 = 1e150;

/// Position of a joint within the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointRole {
    Start,
    Mid,
    End,
}

impl JointRole {
    pub const ALL: [JointRole; 3] = [JointRole::Start, JointRole::Mid, JointRole::End];

    pub fn as_str(self) -> &'static str {
        match self {
            JointRole::Start => "start",
            JointRole::Mid => "mid",
            JointRole::End => "end",
        }
    }
}

impl fmt::Display for JointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// World-space positions of the three joints of one chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPositions {
    pub start: Point3<f64>,
    pub mid: Point3<f64>,
    pub end: Point3<f64>,
}

impl JointPositions {
    pub fn new(start: Point3<f64>, mid: Point3<f64>, end: Point3<f64>) -> Self {
        JointPositions { start, mid, end }
    }

    pub fn get(&self, role: JointRole) -> Point3<f64> {
        match role {
            JointRole::Start => self.start,
            JointRole::Mid => self.mid,
            JointRole::End => self.end,
        }
    }

    /// Total length of the two chain segments (start-mid and mid-end).
    pub fn chain_length(&self) -> f64 {
        (self.mid - self.start).norm() + (self.end - self.mid).norm()
    }
}

/// Reasons a pole vector cannot be placed for a chain.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("{role} joint has a non-finite coordinate")]
    InvalidInput { role: JointRole },
    #[error("start and end joints coincide, the start-end axis has zero length")]
    DegenerateChain,
    #[error("mid joint lies on the start-end axis, the chain plane is undefined")]
    DegenerateProjection,
    #[error("chain coordinates overflow to a non-finite pole vector")]
    NonFiniteResult,
}

impl SolveError {
    /// Stable name of the error kind, used when reporting failures to users.
    pub fn kind(&self) -> &'static str {
        match self {
            SolveError::InvalidInput { .. } => "InvalidInputError",
            SolveError::DegenerateChain => "DegenerateChainError",
            SolveError::DegenerateProjection => "DegenerateProjectionError",
            SolveError::NonFiniteResult => "NonFiniteResultError",
        }
    }
}

/// Failure of a solve that first looks joints up by name.
#[derive(Debug, Error)]
pub enum PoleVectorError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

fn emit(reporter: &mut Option<&mut dyn IntermediateSink>, name: Intermediate, value: &Vector3<f64>) {
    trace!("{} = [{}, {}, {}]", name, value.x, value.y, value.z);
    if let Some(sink) = reporter {
        sink.record(name, value);
    }
}

/// Power-of-two factor bringing `largest` near 1 when it lies outside
/// [`RESCALE_MIN`, `RESCALE_MAX`]. Multiplying by it is exact.
fn rescale_factor(largest: f64) -> f64 {
    if !largest.is_finite() || largest == 0.0 || (RESCALE_MIN..=RESCALE_MAX).contains(&largest) {
        return 1.0;
    }
    let exponent = largest.log2().floor() as i32;
    2.0_f64.powi((-exponent).min(1000))
}

fn is_finite(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

/// Computes the pole vector position for the chain `start`-`mid`-`end`.
///
/// When `reporter` is given, it receives the six intermediate values in
/// computation order. The final pole vector is reported as its coordinates
/// relative to the world origin. Values computed before a failure are still
/// reported.
///
/// # Errors
///
/// * [`SolveError::InvalidInput`] if a coordinate is NaN or infinite.
/// * [`SolveError::DegenerateChain`] if `start == end`.
/// * [`SolveError::DegenerateProjection`] if `mid` lies on the start-end line.
/// * [`SolveError::NonFiniteResult`] if finite inputs overflow during the solve.
pub fn solve(
    start: Point3<f64>,
    mid: Point3<f64>,
    end: Point3<f64>,
    mut reporter: Option<&mut dyn IntermediateSink>,
) -> Result<Point3<f64>, SolveError> {
    for (role, joint) in [(JointRole::Start, &start), (JointRole::Mid, &mid), (JointRole::End, &end)] {
        if !is_finite(joint) {
            return Err(SolveError::InvalidInput { role });
        }
    }

    // Primary axis of the chain
    let start_end: Vector3<f64> = end - start;
    emit(&mut reporter, Intermediate::EndMinusStart, &start_end);

    let start_mid: Vector3<f64> = mid - start;
    emit(&mut reporter, Intermediate::MidMinusStart, &start_mid);

    if start == end {
        return Err(SolveError::DegenerateChain);
    }

    // Lengths are taken in a power-of-two rescaled frame so that squared norms
    // of very short or very long chains neither underflow nor overflow.
    // The factor is 1 for ordinary coordinates.
    let end_mid: Vector3<f64> = end - mid;
    let scale = rescale_factor(start_end.amax().max(start_mid.amax()));
    let (scaled_end, scaled_mid) = (start_end * scale, start_mid * scale);

    // Scalar projection of start_mid onto the axis, then back to a vector
    let start_end_length = scaled_end.norm();
    let dot = scaled_mid.dot(&scaled_end);
    let projection_length = dot / start_end_length;
    let start_end_unit = scaled_end / start_end_length;
    let scaled_projection = start_end_unit * projection_length;
    emit(&mut reporter, Intermediate::Projection, &(scaled_projection / scale));

    let perpendicular = scaled_mid - scaled_projection;
    let plane_direction = perpendicular
        .try_normalize(COLLINEAR_TOLERANCE * scaled_mid.norm())
        .ok_or(SolveError::DegenerateProjection)?;
    emit(&mut reporter, Intermediate::PlaneDirection, &plane_direction);

    let chain_length =
        ((start_mid * scale).norm() + (end_mid * scale).norm()) * CHAIN_LENGTH_FACTOR / scale;
    let plane_scaled = plane_direction * chain_length;
    emit(&mut reporter, Intermediate::PlaneScaled, &plane_scaled);

    let pole_vector = mid + plane_scaled;
    if !is_finite(&pole_vector) {
        return Err(SolveError::NonFiniteResult);
    }
    emit(&mut reporter, Intermediate::PoleVector, &pole_vector.coords);

    Ok(pole_vector)
}

/// Same as [`solve`], taking the joints as one [`JointPositions`].
pub fn solve_chain(
    joints: &JointPositions,
    reporter: Option<&mut dyn IntermediateSink>,
) -> Result<Point3<f64>, SolveError> {
    solve(joints.start, joints.mid, joints.end, reporter)
}

/// Looks the joints up by name in `source` (start, mid, end order) and solves the chain.
///
/// Lookup failures are returned unchanged as [`PoleVectorError::Lookup`].
pub fn solve_named<S: JointSource + ?Sized>(
    source: &S,
    names: [&str; 3],
    reporter: Option<&mut dyn IntermediateSink>,
) -> Result<Point3<f64>, PoleVectorError> {
    let [start, mid, end] = names;
    let joints = JointPositions::new(
        source.position(start)?,
        source.position(mid)?,
        source.position(end)?,
    );
    Ok(solve_chain(&joints, reporter)?)
}
