//! # Pattern Executable
//!
//! Generates a single search pattern from the command line, logging every waypoint and archiving
//! the resulting path into the session directory. Also provides a comparison of the available
//! distance formulas.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::PathBuf;

use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info, warn};
use structopt::{clap::AppSettings, StructOpt};

use pattern_lib::{
    CirclePattern, Coordinate, DistanceStrategy, EarthModel, HelixPattern, Pattern,
    PatternParams, SpiralFacing,
};
use util::{
    logger::{level_from_str, logger_init},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the default parameter file, relative to the params directory.
const PARAMS_FILE: &str = "pattern_exec.toml";

/// Coordinate pairs used by the distance comparison, from a few meters up to hundreds of
/// kilometers apart.
const COMPARE_PAIRS: [((f64, f64), (f64, f64)); 6] = [
    ((-31.98, 115.82), (-31.98003, 115.82004)),
    ((-31.98, 115.82), (-31.9805, 115.8215)),
    ((-31.98, 115.82), (-31.99, 115.83)),
    ((-32.0, 116.0), (-32.0, 116.5)),
    ((-30.0, 150.0), (-31.0, 150.0)),
    ((-30.0, 150.0), (-35.0, 151.0)),
];

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Generate search pattern paths.
#[derive(Debug, StructOpt)]
#[structopt(name = "pattern_exec")]
struct Opts {
    /// Path to the parameter file. If not given `pattern_exec.toml` is loaded from the params
    /// directory of the software root, falling back to the default parameters.
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Which way spiral waypoints should face, either `inward` or `outward`.
    #[structopt(long, default_value = "inward")]
    facing: SpiralFacing,

    /// Minimum log level, one of `info`, `debug` or `trace`.
    #[structopt(long, default_value = "info")]
    log_level: String,

    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, StructOpt)]
enum Cmd {
    /// Sweep the box between two opposite corners.
    #[structopt(name = "lawnmower", setting = AppSettings::AllowNegativeNumbers)]
    Lawnmower {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,

        /// Altitude of the sweep in meters.
        #[structopt(long, default_value = "0")]
        alt: f64,
    },

    /// Fly a level circle around a centre, starting and ending at a boundary point.
    #[structopt(name = "circle", setting = AppSettings::AllowNegativeNumbers)]
    Circle {
        c_lat: f64,
        c_lon: f64,
        b_lat: f64,
        b_lon: f64,
        b_alt: f64,
    },

    /// Spiral around a centre from a boundary point to a target point.
    #[structopt(name = "helix", setting = AppSettings::AllowNegativeNumbers)]
    Helix {
        c_lat: f64,
        c_lon: f64,
        b_lat: f64,
        b_lon: f64,
        b_alt: f64,
        t_lat: f64,
        t_lon: f64,
        t_alt: f64,
    },

    /// Generate a pattern described in a TOML file.
    #[structopt(name = "file")]
    File {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },

    /// Compare the distance formulas over a set of reference coordinates.
    #[structopt(name = "compare")]
    Compare,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("pattern_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(level_from_str(&opts.log_level), &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Pattern Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("Options: {:#?}", opts);

    // ---- LOAD PARAMETERS ----

    let params = load_params(&opts)?;
    params.validate().wrap_err("Invalid pattern parameters")?;
    debug!("Parameters: {:#?}", params);

    // ---- PROCESS COMMAND ----

    let pattern = match build_pattern(&opts.cmd, opts.facing)? {
        Some(p) => p,
        None => {
            compare_distances(&params.earth)?;
            session.exit();
            return Ok(());
        }
    };

    info!("Generating {} pattern", pattern.name());

    let path = pattern
        .generate(&params)
        .wrap_err_with(|| format!("Failed to generate the {} pattern", pattern.name()))?;

    for (i, waypoint) in path.waypoints().iter().enumerate() {
        info!("{:5}: {}", i, waypoint);
    }

    info!(
        "Generated {} waypoints, {:.3} m long",
        path.len(),
        path.length_m(&params.earth)
    );

    // ---- ARCHIVE ----

    session.save("params.json", params);
    session.save("pattern.json", pattern);
    session.save("path.json", path);

    session.exit();

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Load the parameters from the path given on the command line, or from the software root.
fn load_params(opts: &Opts) -> Result<PatternParams> {
    match opts.params {
        Some(ref path) => {
            info!("Loading parameters from {:?}", path);
            util::params::load_from_path(path).wrap_err("Could not load pattern params")
        }
        None => match util::params::load(PARAMS_FILE) {
            Ok(p) => {
                info!("Loaded parameters from {}", PARAMS_FILE);
                Ok(p)
            }
            Err(e) => {
                warn!("Could not load {} ({}), using default parameters", PARAMS_FILE, e);
                Ok(PatternParams::default())
            }
        },
    }
}

/// Build the pattern requested on the command line, or `None` for commands which don't generate
/// one.
fn build_pattern(cmd: &Cmd, facing: SpiralFacing) -> Result<Option<Pattern>> {
    let pattern = match *cmd {
        Cmd::Lawnmower {
            lat1,
            lon1,
            lat2,
            lon2,
            alt,
        } => Pattern::Lawnmower {
            corner1: Coordinate::new(lat1, lon1, alt).wrap_err("Invalid first corner")?,
            corner2: Coordinate::new(lat2, lon2, alt).wrap_err("Invalid second corner")?,
        },
        Cmd::Circle {
            c_lat,
            c_lon,
            b_lat,
            b_lon,
            b_alt,
        } => Pattern::Circle(CirclePattern {
            center: Coordinate::new_2d(c_lat, c_lon).wrap_err("Invalid centre")?,
            boundary: Coordinate::new(b_lat, b_lon, b_alt).wrap_err("Invalid boundary")?,
            facing,
        }),
        Cmd::Helix {
            c_lat,
            c_lon,
            b_lat,
            b_lon,
            b_alt,
            t_lat,
            t_lon,
            t_alt,
        } => Pattern::Helix(HelixPattern {
            center: Coordinate::new_2d(c_lat, c_lon).wrap_err("Invalid centre")?,
            boundary: Coordinate::new(b_lat, b_lon, b_alt).wrap_err("Invalid boundary")?,
            target: Coordinate::new(t_lat, t_lon, t_alt).wrap_err("Invalid target")?,
            facing,
        }),
        Cmd::File { ref path } => {
            info!("Loading pattern from {:?}", path);
            util::params::load_from_path::<Pattern, _>(path)
                .wrap_err("Could not load the pattern file")?
        }
        Cmd::Compare => return Ok(None),
    };

    Ok(Some(pattern))
}

/// Log a table of the distances between each of the reference pairs for each strategy.
fn compare_distances(earth: &EarthModel) -> Result<()> {
    info!("Distance comparison (meters, error relative to haversine)\n");

    for &((lat1, lon1), (lat2, lon2)) in COMPARE_PAIRS.iter() {
        let a = Coordinate::new_2d(lat1, lon1).wrap_err("Invalid reference coordinate")?;
        let b = Coordinate::new_2d(lat2, lon2).wrap_err("Invalid reference coordinate")?;

        let exact_m = earth.haversine_m(&a, &b);
        info!("{} -> {}", a, b);

        for strategy in DistanceStrategy::ALL.iter() {
            let d_m = earth.distance_m(*strategy, &a, &b);
            info!(
                "    {:20} {:16.6} ({:+.3e})",
                format!("{:?}", strategy),
                d_m,
                (d_m - exact_m) / exact_m
            );
        }
    }

    Ok(())
}
