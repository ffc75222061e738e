#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use tracks::{
    DistanceTimeAtFraction, ElapsedTimeAtFraction, FractionStrategy, InterpolatedPointAtTime,
    PointAtFraction, Pt2D, ResampleOptions, TimeAtFraction, Track, Trajectory, TrajectoryPoint,
};

#[derive(StructOpt)]
#[structopt(name = "tracks", about = "Find points partway along timestamped trajectories")]
struct Args {
    /// The path to a CSV file with object_id, timestamp, x, and y columns
    #[structopt(long)]
    input: String,
    /// A fraction of the way along each trajectory to report. Can be repeated.
    #[structopt(long, allow_hyphen_values = true)]
    fraction: Vec<f64>,
    /// Instead of specific fractions, resample each trajectory to this many evenly spaced points
    #[structopt(long)]
    resample: Option<usize>,
    /// How a fraction maps to a time: "elapsed" or "distance"
    #[structopt(long, default_value = "elapsed")]
    strategy: FractionStrategy,
    /// Only look at the trajectory for this object
    #[structopt(long)]
    object: Option<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    object_id: &'a str,
    fraction: f64,
    point: &'a TrajectoryPoint<Pt2D>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::from_args();
    if args.fraction.is_empty() == args.resample.is_none() {
        bail!("Specify either --fraction or --resample, but not both");
    }

    let file = fs_err::File::open(&args.input)?;
    let mut trajectories =
        tracks::load_csv(file).with_context(|| format!("loading {}", args.input))?;
    if let Some(ref object) = args.object {
        trajectories.retain(|id, _| id == object);
        if trajectories.is_empty() {
            bail!("{} has no trajectory for {}", args.input, object);
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (object_id, trajectory) in &trajectories {
        if let Some(count) = args.resample {
            let opts = ResampleOptions {
                count,
                strategy: args.strategy,
            };
            let resampled = tracks::resample(trajectory, &opts)?;
            for (idx, point) in resampled.iter().enumerate() {
                let fraction = if count > 1 {
                    idx as f64 / (count - 1) as f64
                } else {
                    0.0
                };
                print_point(&mut out, object_id, fraction, point)?;
            }
        } else {
            match args.strategy {
                FractionStrategy::Elapsed => report(
                    &mut out,
                    object_id,
                    trajectory,
                    &args.fraction,
                    &PointAtFraction::new(ElapsedTimeAtFraction, InterpolatedPointAtTime),
                )?,
                FractionStrategy::Distance => report(
                    &mut out,
                    object_id,
                    trajectory,
                    &args.fraction,
                    &PointAtFraction::new(DistanceTimeAtFraction, InterpolatedPointAtTime),
                )?,
            }
        }
    }
    Ok(())
}

fn report<W: Write, F: TimeAtFraction>(
    out: &mut W,
    object_id: &str,
    trajectory: &Trajectory<Pt2D>,
    fractions: &[f64],
    query: &PointAtFraction<F>,
) -> Result<()> {
    debug!("{} has {} points", object_id, trajectory.len());
    for fraction in fractions {
        let point = query
            .apply(trajectory, *fraction)
            .with_context(|| format!("finding {} along {}", fraction, object_id))?;
        print_point(out, object_id, *fraction, &point)?;
    }
    Ok(())
}

fn print_point<W: Write>(
    out: &mut W,
    object_id: &str,
    fraction: f64,
    point: &TrajectoryPoint<Pt2D>,
) -> Result<()> {
    let line = serde_json::to_string(&Output {
        object_id,
        fraction,
        point,
    })?;
    writeln!(out, "{}", line)?;
    Ok(())
}
