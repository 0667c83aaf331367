use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use nalgebra::Point3;
use std::path::PathBuf;

/// Command-line arguments for the pole-vector tool.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Calculates the pole vector position of a three-joint IK chain."
)]
pub struct Args {
    /// JSON scene file mapping joint names to [x, y, z] world positions.
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Names of the start, mid and end joints (comma-separated). Defaults to joint1,joint2,joint3.
    #[arg(short, long, value_name = "START,MID,END")]
    pub joints: Option<String>,

    /// Start joint position, overrides the scene lookup.
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Mid joint position, overrides the scene lookup.
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub mid: Option<String>,

    /// End joint position, overrides the scene lookup.
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Print every intermediate vector of the calculation.
    #[arg(long)]
    pub steps: bool,

    /// Write the intermediate vectors and the result to a JSON file.
    #[arg(long, value_name = "FILE")]
    pub dump: Option<PathBuf>,

    /// Number of decimals printed for each coordinate.
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Print only the resulting coordinates.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses an `x,y,z` position.
pub fn parse_point(s: &str) -> Result<Point3<f64>> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("Position must be three comma-separated numbers (x,y,z), got '{}'.", s);
    }
    let mut coords = [0.0; 3];
    for (coord, part) in coords.iter_mut().zip(&parts) {
        *coord = part
            .parse::<f64>()
            .with_context(|| format!("Failed to parse coordinate '{}' in '{}'.", part, s))?;
    }
    Ok(Point3::from(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1, -2.5,3e2").unwrap(), Point3::new(1.0, -2.5, 300.0));
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,2,z").is_err());
    }

    #[test]
    fn test_negative_coordinates_as_values() {
        let args = Args::try_parse_from(["pole-vector", "--start", "-1,0,0", "--mid", "0,1,0", "--end", "1,0,0"]).unwrap();
        assert_eq!(args.start.as_deref(), Some("-1,0,0"));
        assert_eq!(args.verbose, 0);
    }
}
