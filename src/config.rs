use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "app.config";

/// Joint names used when neither the command line nor the config names any.
pub const DEFAULT_JOINTS: [&str; 3] = ["joint1", "joint2", "joint3"];

pub const DEFAULT_PRECISION: usize = 6;

/// Defaults read from `app.config`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub scene: Option<PathBuf>,
    pub joints: Option<[String; 3]>,
    pub precision: Option<usize>,
}

impl Config {
    /// Loads `key = value` lines from `path`. A missing file gives an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.with_context(|| format!("Failed to read config file: {:?}", path))?);
        }
        Self::parse(&lines.join("\n")).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut config = Config::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // Lines without '=' and unknown keys are skipped
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "scene" => config.scene = Some(PathBuf::from(value)),
                "joints" => {
                    config.joints = Some(parse_joint_names(value).context("Invalid value for 'joints'")?)
                }
                "precision" => {
                    config.precision = Some(
                        value
                            .parse::<usize>()
                            .with_context(|| format!("Invalid value for 'precision': {}", value))?,
                    )
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

/// Parses `start,mid,end` joint names.
pub fn parse_joint_names(s: &str) -> Result<[String; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        bail!("Joint names must be three comma-separated names (start,mid,end), got '{}'.", s);
    }
    Ok([parts[0].to_string(), parts[1].to_string(), parts[2].to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::parse(
            "# rig defaults\n\
             scene = rig/arm.json\n\
             joints = shoulder, elbow, wrist\n\
             precision=3\n\
             colour = blue\n\
             garbage line\n",
        )
        .unwrap();

        assert_eq!(config.scene, Some(PathBuf::from("rig/arm.json")));
        assert_eq!(
            config.joints,
            Some(["shoulder".to_string(), "elbow".to_string(), "wrist".to_string()])
        );
        assert_eq!(config.precision, Some(3));
    }

    #[test]
    fn test_bad_values() {
        assert!(Config::parse("precision = six").is_err());
        assert!(Config::parse("joints = a,b").is_err());
        assert!(parse_joint_names("a,,c").is_err());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "precision = 2\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().precision, Some(2));
    }
}
