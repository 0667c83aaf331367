use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use nalgebra::Point3;
use pole_vector::config::{parse_joint_names, Config, CONFIG_FILE, DEFAULT_JOINTS, DEFAULT_PRECISION};
use pole_vector::{
    solve_chain, text, Intermediate, IntermediateVectors, JointPositions, JointRole, JointSource,
    JointTable, LogSink, LookupError,
};
use std::fs;
use std::path::Path;

mod cli;

use cli::{parse_point, Args};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Prints the table of intermediate vectors.
fn print_steps(steps: &IntermediateVectors, precision: usize, line: &str) {
    println!("{} Intermediate vectors:", text::bold("Calculation"));
    println!("{}", line);
    for (name, value) in steps.iter() {
        println!(
            "{}\n  {}",
            name.title(),
            text::light(format!("└─{} {:<16} {}", text::ARROW, name.as_str(), text::triple(value, precision)))
        );
    }
    println!("{}", line);
}

/// Resolves the chain joint by joint: a command-line position wins for its
/// role, any other role is looked up by name in the scene table.
fn resolve_joints(
    table: Option<&JointTable>,
    names: &[String; 3],
    overrides: [Option<Point3<f64>>; 3],
) -> Result<JointPositions, LookupError> {
    let mut positions = [Point3::origin(); 3];
    for (i, role) in JointRole::ALL.iter().enumerate() {
        positions[i] = match (overrides[i], table) {
            (Some(position), _) => {
                debug!("Using command-line position for {} joint", role);
                position
            }
            (None, Some(table)) => table.position(&names[i])?,
            (None, None) => return Err(LookupError::UnknownJoint(names[i].clone())),
        };
    }
    Ok(JointPositions::new(positions[0], positions[1], positions[2]))
}

/// Main entry point for the pole-vector tool.
///
/// Resolves the three joint positions from the scene file and/or command line,
/// solves the chain and prints the pole vector position as `x, y, z`.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load(Path::new(CONFIG_FILE))?;
    debug!("Config: {:?}", config);

    let names = match args.joints.as_deref() {
        Some(joints) => parse_joint_names(joints)?,
        None => config
            .joints
            .clone()
            .unwrap_or_else(|| DEFAULT_JOINTS.map(String::from)),
    };
    let precision = args.precision.or(config.precision).unwrap_or(DEFAULT_PRECISION);

    let overrides = [
        args.start.as_deref().map(parse_point).transpose().context("Invalid --start")?,
        args.mid.as_deref().map(parse_point).transpose().context("Invalid --mid")?,
        args.end.as_deref().map(parse_point).transpose().context("Invalid --end")?,
    ];
    let all_overridden = overrides.iter().all(Option::is_some);

    // A scene is only read when some joint still has to be looked up
    let scene = args.scene.clone().or_else(|| config.scene.clone());
    let scene = if all_overridden { None } else { scene };

    let (line, dline) = text::rules();

    if !args.quiet {
        println!(
            "{}",
            text::banner(
                "Pole Vector Calculator",
                env!("CARGO_PKG_VERSION"),
                "Tool for calculating the pole vector position of a three-joint IK chain."
            )
        );

        println!("{} Configuration:", text::bold("Chain"));
        println!("  {:<20} {}", "Joints:", names.join(", "));
        match &scene {
            Some(path) => println!("  {:<20} {}", "Scene File:", path.display()),
            None => println!("  {:<20} {}", "Scene File:", "none (positions from command line)"),
        }
        if all_overridden && (args.scene.is_some() || config.scene.is_some()) {
            println!("  {}: All joint positions given on the command line, scene file not read.", text::warning("Warning"));
        }
    }

    if scene.is_none() && !all_overridden {
        anyhow::bail!(
            "No position source for some joints. Pass --scene <file> or all of --start, --mid and --end."
        );
    }

    let table = scene.as_deref().map(JointTable::from_file).transpose()?;
    let joints = resolve_joints(table.as_ref(), &names, overrides)?;

    if !args.quiet {
        for role in JointRole::ALL {
            let label = format!("{} Joint:", capitalize(role.as_str()));
            println!("  {:<20} {}", label, text::triple(&joints.get(role).coords, precision));
        }
        println!("{}\n", dline);
    }

    let mut sink = (LogSink, IntermediateVectors::new());
    let result = solve_chain(&joints, Some(&mut sink));
    let steps = sink.1;

    if let Some(path) = &args.dump {
        let doc = steps.to_json(result.as_ref().ok());
        fs::write(path, serde_json::to_string_pretty(&doc)?)
            .with_context(|| format!("Failed to write dump file: {:?}", path))?;
        if !args.quiet {
            println!("{}", text::status(format!("Intermediate vectors written to {}", path.display())));
        }
    }

    let pole_vector = match result {
        Ok(pole_vector) => pole_vector,
        Err(err) => {
            if args.steps && !steps.is_empty() {
                print_steps(&steps, precision, &line);
            }
            eprintln!("{}\n", text::failure(err.kind(), &err.to_string()));
            std::process::exit(1);
        }
    };

    if args.steps {
        print_steps(&steps, precision, &line);
    }

    if args.quiet {
        println!("{}", text::triple(&pole_vector.coords, precision));
        return Ok(());
    }

    println!("{}:", text::status(Intermediate::PoleVector.title()));
    println!("{}", text::triple(&pole_vector.coords, precision));
    println!("{}", line);
    println!("{}", text::status("Calculation completed successfully."));
    println!();

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
