use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use std::path::Path;
use std::process;

use geojson_lks94::{convert_file, ProjectionError, Transform};

const LKS94_INPUT: &str = "cordinate.geojson";
const LKS94_OUTPUT: &str = "converted_cordinate.geojson";
const SWAP_INPUT: &str = "input.geojson";
const SWAP_OUTPUT: &str = "output_swapped.geojson";
const RELATIVE_INPUT: &str = "lkscoord.geojson";
const RELATIVE_OUTPUT: &str = "output_folder/transformed_output.geojson";

const DEFAULT_REF_X: f64 = 6168029.0;
const DEFAULT_REF_Y: f64 = 606645.0;

fn main() {
    let matches = Command::new("geojson-lks94")
        .version(env!("CARGO_PKG_VERSION"))
        .author("geojson-lks94 developers")
        .about("Converts GeoJSON coordinates from WGS84 to the LKS94 grid")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log progress (-v) or per-feature detail (-vv) to stderr"),
        )
        .subcommand(lks94_command())
        .subcommand(
            Command::new("swap")
                .about(format!("Swap the two numbers of every position ({} -> {})", SWAP_INPUT, SWAP_OUTPUT)),
        )
        .subcommand(
            Command::new("relative")
                .about(format!(
                    "Make positions relative to a reference point ({} -> {})",
                    RELATIVE_INPUT, RELATIVE_OUTPUT
                ))
                .arg(
                    Arg::new("ref-x")
                        .long("ref-x")
                        .value_parser(clap::value_parser!(f64))
                        .help(format!(
                            "Reference x subtracted from the first number [default: {}]",
                            DEFAULT_REF_X
                        )),
                )
                .arg(
                    Arg::new("ref-y")
                        .long("ref-y")
                        .value_parser(clap::value_parser!(f64))
                        .help(format!(
                            "Reference y subtracted from the second number [default: {}]",
                            DEFAULT_REF_Y
                        )),
                ),
        )
        .get_matches();

    // Set up logging; RUST_LOG still wins over -v
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Pick the transform and its fixed file names, then run it
    let result = match matches.subcommand() {
        Some(("swap", _)) => run(SWAP_INPUT, SWAP_OUTPUT, Transform::SwapAxes)
            .map(|output| format!("Coordinates swapped! Saved to: {}", output)),
        Some(("relative", sub)) => {
            // Reference point falls back to the site origin
            let x = sub.get_one::<f64>("ref-x").copied().unwrap_or(DEFAULT_REF_X);
            let y = sub.get_one::<f64>("ref-y").copied().unwrap_or(DEFAULT_REF_Y);
            run(RELATIVE_INPUT, RELATIVE_OUTPUT, Transform::RelativeTo { x, y })
                .map(|output| format!("Transformed GeoJSON data saved to {}", output))
        }
        other => grid_transform(other.map(|(_, sub)| sub))
            .map_err(|e| e.to_string())
            .and_then(|transform| run(LKS94_INPUT, LKS94_OUTPUT, transform))
            .map(|output| {
                format!(
                    "Coordinates converted successfully to LKS94. Saved in: {}",
                    output
                )
            }),
    };

    // Report the outcome
    match result {
        Ok(message) => println!("{}", message),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn lks94_command() -> Command {
    let command = Command::new("lks94").about(format!(
        "Project WGS84 positions to LKS94 ({} -> {}); the default",
        LKS94_INPUT, LKS94_OUTPUT
    ));
    #[cfg(feature = "proj")]
    let command = command.arg(
        Arg::new("proj")
            .long("proj")
            .action(ArgAction::SetTrue)
            .help("Project with PROJ instead of the built-in series"),
    );
    command
}

fn grid_transform(matches: Option<&ArgMatches>) -> Result<Transform, ProjectionError> {
    #[cfg(feature = "proj")]
    {
        if matches.map_or(false, |m| m.get_flag("proj")) {
            let projector = geojson_lks94::projection::ProjProjector::lks94()?;
            return Ok(Transform::ToGrid(Box::new(projector)));
        }
    }
    let _ = matches;
    Ok(Transform::lks94())
}

fn run(input: &str, output: &str, transform: Transform) -> Result<String, String> {
    convert_file(Path::new(input), Path::new(output), &transform).map_err(|e| e.to_string())?;
    Ok(output.to_string())
}
