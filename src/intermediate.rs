//! Named intermediate vectors produced while solving a chain.

use std::fmt;

use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Serialize;
use serde_json::json;

/// The intermediate values of a solve, in the order they are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intermediate {
    EndMinusStart,
    MidMinusStart,
    Projection,
    PlaneDirection,
    PlaneScaled,
    PoleVector,
}

impl Intermediate {
    pub const ALL: [Intermediate; 6] = [
        Intermediate::EndMinusStart,
        Intermediate::MidMinusStart,
        Intermediate::Projection,
        Intermediate::PlaneDirection,
        Intermediate::PlaneScaled,
        Intermediate::PoleVector,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intermediate::EndMinusStart => "end_minus_start",
            Intermediate::MidMinusStart => "mid_minus_start",
            Intermediate::Projection => "projection",
            Intermediate::PlaneDirection => "plane_direction",
            Intermediate::PlaneScaled => "plane_scaled",
            Intermediate::PoleVector => "pole_vector",
        }
    }

    /// Name of the locator the visualization scene moves to show this value.
    pub fn locator_name(self) -> &'static str {
        match self {
            Intermediate::EndMinusStart => "end_minus_start_vector_LOC",
            Intermediate::MidMinusStart => "mid_minus_start_vector_LOC",
            Intermediate::Projection => "startEnd_normal_mult_projection_vector_LOC",
            Intermediate::PlaneDirection => "plane_vector_LOC",
            Intermediate::PlaneScaled => "plane_scaled_vector_LOC",
            Intermediate::PoleVector => "plane_scaled_vector_plus_mid_vector_LOC",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Intermediate::EndMinusStart => "End minus start vector",
            Intermediate::MidMinusStart => "Mid minus start vector",
            Intermediate::Projection => "Projection onto start-end axis",
            Intermediate::PlaneDirection => "In-plane direction (unit)",
            Intermediate::PlaneScaled => "Scaled in-plane vector",
            Intermediate::PoleVector => "Pole vector position",
        }
    }
}

impl fmt::Display for Intermediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for the intermediate values of a solve.
///
/// Implementations only observe; the solver never reads anything back.
pub trait IntermediateSink {
    fn record(&mut self, name: Intermediate, value: &Vector3<f64>);
}

/// Collects the intermediate values of one solve, in the order received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntermediateVectors {
    entries: Vec<(Intermediate, Vector3<f64>)>,
}

impl IntermediateVectors {
    pub fn new() -> Self {
        IntermediateVectors { entries: Vec::with_capacity(Intermediate::ALL.len()) }
    }

    pub fn get(&self, name: Intermediate) -> Option<&Vector3<f64>> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Intermediate, Vector3<f64>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once every intermediate value has been received.
    pub fn is_complete(&self) -> bool {
        Intermediate::ALL.iter().all(|name| self.get(*name).is_some())
    }

    /// JSON document with every recorded step and, if given, the solved pole vector.
    pub fn to_json(&self, pole_vector: Option<&Point3<f64>>) -> serde_json::Value {
        let steps: Vec<_> = self
            .entries
            .iter()
            .map(|(name, value)| {
                json!({
                    "name": name,
                    "locator": name.locator_name(),
                    "value": [value.x, value.y, value.z],
                })
            })
            .collect();

        json!({
            "steps": steps,
            "pole_vector": pole_vector.map(|p| [p.x, p.y, p.z]),
        })
    }
}

impl IntermediateSink for IntermediateVectors {
    fn record(&mut self, name: Intermediate, value: &Vector3<f64>) {
        self.entries.push((name, *value));
    }
}

/// Writes every intermediate value to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl IntermediateSink for LogSink {
    fn record(&mut self, name: Intermediate, value: &Vector3<f64>) {
        debug!("{:<16} [{:.6}, {:.6}, {:.6}]", name.as_str(), value.x, value.y, value.z);
    }
}

// Fan out to two sinks
impl<A: IntermediateSink, B: IntermediateSink> IntermediateSink for (A, B) {
    fn record(&mut self, name: Intermediate, value: &Vector3<f64>) {
        self.0.record(name, value);
        self.1.record(name, value);
    }
}
