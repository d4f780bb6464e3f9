use clap::Parser;
use env_logger::Env;
use gaussbeam::{
    console::{Args, Command},
    error::{GbError, GbResult},
    plottable::Plottable,
    profile::{BeamProfiles, ProfileSampler},
    ray_optics::{ImagingDistances, LensSystem},
    solvers::{MagnificationSolution, MagnificationSolver, WaistFocalSolution, WaistFocalSolver},
    SolverConfig,
};
use log::info;
use serde::Serialize;
use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};
use uom::{
    fmt::DisplayStyle::Abbreviation,
    si::{
        f64::Length,
        length::{micrometer, millimeter, nanometer},
    },
};

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Report {
    TestBeams(WaistFocalSolution),
    Magnification(MagnificationSolution),
    Ray {
        lens: LensSystem,
        imaging: ImagingDistances,
        magnification: f64,
    },
    Demo {
        test_beams: WaistFocalSolution,
        magnification: MagnificationSolution,
        ray: ImagingDistances,
        ray_magnification: f64,
    },
}

fn print_test_beams(solution: &WaistFocalSolution) {
    let um = Length::format_args(micrometer, Abbreviation);
    let mm = Length::format_args(millimeter, Abbreviation);
    println!("Test beams");
    println!("  object waist     : {:.6}", um.with(solution.object_waist));
    println!("  focal length     : {:.6}", mm.with(solution.focal_length));
    println!("  object distance  : {:.6}", mm.with(solution.object_distance));
    println!("  magnification    : {:.6}", solution.magnification());
}

fn print_magnification(solution: &MagnificationSolution) {
    let um = Length::format_args(micrometer, Abbreviation);
    let mm = Length::format_args(millimeter, Abbreviation);
    println!("Gaussian magnification");
    println!("  magnification    : {:.6}", solution.magnification);
    println!("  object distance  : {:.6}", mm.with(solution.object_distance));
    println!("  image distance   : {:.6}", mm.with(solution.image_distance));
    println!("  object waist     : {:.6}", um.with(solution.object_waist));
    println!("  min. NA          : {:.6}", solution.min_numerical_aperture);
}

fn print_ray(imaging: &ImagingDistances) {
    let mm = Length::format_args(millimeter, Abbreviation);
    println!("Ray optics");
    println!("  magnification    : {:.6}", imaging.magnification());
    println!("  object distance  : {:.6}", mm.with(imaging.object_distance));
    println!("  image distance   : {:.6}", mm.with(imaging.image_distance));
}

fn run(
    command: &Command,
    config: &SolverConfig,
    sampler: &ProfileSampler,
) -> GbResult<(Report, Option<BeamProfiles>)> {
    match *command {
        Command::TestBeams {
            image_distance,
            image_waist,
            distance,
            wavelength,
        } => {
            let solution = WaistFocalSolver::from(config).solve(
                Length::new::<millimeter>(image_distance),
                Length::new::<micrometer>(image_waist),
                Length::new::<millimeter>(distance),
                Length::new::<nanometer>(wavelength),
            )?;
            print_test_beams(&solution);
            let profiles = solution.beam_profiles(sampler)?;
            Ok((Report::TestBeams(solution), Some(profiles)))
        }
        Command::Magnification {
            image_waist,
            distance,
            focal_length,
            wavelength,
        } => {
            let solution = MagnificationSolver::from(config).solve(
                Length::new::<micrometer>(image_waist),
                Length::new::<millimeter>(distance),
                Length::new::<millimeter>(focal_length),
                Length::new::<nanometer>(wavelength),
            )?;
            print_magnification(&solution);
            let profiles = solution.beam_profiles(sampler)?;
            Ok((Report::Magnification(solution), Some(profiles)))
        }
        Command::Ray {
            distance,
            focal_length,
        } => {
            let lens = LensSystem::new(
                Length::new::<millimeter>(focal_length),
                Length::new::<millimeter>(distance),
            )?;
            let imaging = lens.imaging_distances()?;
            print_ray(&imaging);
            Ok((
                Report::Ray {
                    lens,
                    imaging,
                    magnification: imaging.magnification(),
                },
                None,
            ))
        }
        Command::Demo {
            image_distance,
            image_waist,
            distance,
            wavelength,
        } => {
            let test_beams = WaistFocalSolver::from(config).solve(
                Length::new::<millimeter>(image_distance),
                Length::new::<micrometer>(image_waist),
                Length::new::<millimeter>(distance),
                Length::new::<nanometer>(wavelength),
            )?;
            print_test_beams(&test_beams);
            let magnification = MagnificationSolver::from(config).solve(
                test_beams.image_waist,
                test_beams.object_distance + test_beams.image_distance,
                test_beams.focal_length,
                test_beams.wavelength,
            )?;
            print_magnification(&magnification);
            let ray = test_beams.lens_system()?.imaging_distances()?;
            print_ray(&ray);
            let profiles = magnification.beam_profiles(sampler)?;
            Ok((
                Report::Demo {
                    test_beams,
                    magnification,
                    ray,
                    ray_magnification: ray.magnification(),
                },
                Some(profiles),
            ))
        }
    }
}

fn create_report_file(path: &Path, report: &Report) -> GbResult<()> {
    print!("Write report to {}...", path.display());
    let _ = io::stdout().flush();
    let yaml = serde_yaml::to_string(report)
        .map_err(|e| GbError::Other(format!("serialization of report failed: {e}")))?;
    let mut output = File::create(path)
        .map_err(|e| GbError::Other(format!("report file creation failed: {e}")))?;
    write!(output, "{yaml}")
        .map_err(|e| GbError::Other(format!("writing report file failed: {e}")))?;
    println!("Success");
    Ok(())
}

fn main() -> GbResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    //parse CLI arguments
    let args = Args::parse();
    args.validate()?;
    let config = args.solver_config()?;
    info!("using {} samples per sweep", config.num_samples);
    let sampler = ProfileSampler::from(&config);

    let (report, profiles) = run(&args.command, &config, &sampler)?;

    if let Some(path) = &args.report {
        create_report_file(path, &report)?;
    }
    if let Some(profiles) = profiles {
        if let Some(path) = &args.plot {
            profiles.to_plot(path)?;
            info!("beam profiles plotted to {}", path.display());
        }
        if let Some(path) = &args.csv {
            profiles.to_csv(path)?;
            info!("beam profiles exported to {}", path.display());
        }
    }
    Ok(())
}
