//! Joint position lookup.
//!
//! A scene file is a JSON object mapping joint names to world-space
//! translations, e.g. `{ "joint1": [0.0, 0.0, 0.0], "joint2": [1.0, 1.0, 0.0] }`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unknown joint '{0}'")]
    UnknownJoint(String),
    #[error("failed to read scene file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves a joint name to its world-space position.
pub trait JointSource {
    fn position(&self, name: &str) -> Result<Point3<f64>, LookupError>;
}

/// Static name-to-position table, usually loaded from a scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointTable {
    joints: BTreeMap<String, [f64; 3]>,
}

impl JointTable {
    pub fn new() -> Self {
        JointTable::default()
    }

    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn from_file(path: &Path) -> Result<Self, LookupError> {
        let contents = fs::read_to_string(path).map_err(|source| LookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&contents).map_err(|source| LookupError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Loaded {} joints from {}: {}",
            table.len(),
            path.display(),
            table.names().collect::<Vec<_>>().join(", ")
        );
        Ok(table)
    }

    /// Adds or replaces a joint.
    pub fn insert(&mut self, name: impl Into<String>, position: Point3<f64>) {
        self.joints.insert(name.into(), [position.x, position.y, position.z]);
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.joints.keys().map(String::as_str)
    }
}

impl JointSource for JointTable {
    fn position(&self, name: &str) -> Result<Point3<f64>, LookupError> {
        self.joints
            .get(name)
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .ok_or_else(|| LookupError::UnknownJoint(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scene() {
        let table = JointTable::from_json_str(r#"{ "joint1": [0, 0, 0], "joint2": [1.5, -2, 3] }"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.position("joint2").unwrap(), Point3::new(1.5, -2.0, 3.0));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["joint1", "joint2"]);
    }

    #[test]
    fn test_reject_malformed_scene() {
        assert!(JointTable::from_json_str(r#"{ "joint1": [0, 0] }"#).is_err());
        assert!(JointTable::from_json_str(r#"{ "joint1": "origin" }"#).is_err());
        assert!(JointTable::from_json_str("[]").is_err());
    }

    #[test]
    fn test_unknown_joint() {
        let table = JointTable::new();
        match table.position("joint1") {
            Err(LookupError::UnknownJoint(name)) => assert_eq!(name, "joint1"),
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(JointTable::from_file(&path), Err(LookupError::Io { .. })));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(JointTable::from_file(&path), Err(LookupError::Parse { .. })));
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = JointTable::new();
        table.insert("elbow", Point3::new(1.0, 0.0, 0.0));
        table.insert("elbow", Point3::new(2.0, 0.0, 0.0));
        assert_eq!(table.len(), 1);
        assert_eq!(table.position("elbow").unwrap().x, 2.0);
    }
}
