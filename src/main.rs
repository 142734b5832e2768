use std::env;
use std::io::Write;
use std::process::ExitCode;

use chrono::Local;
use log::LevelFilter;

use godic::configuration::PipelineConfiguration;
use godic::pipeline::run_pipeline;

fn init_logging() {
    let log_level = env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let configuration = match env::args().nth(1) {
        Some(path) => match PipelineConfiguration::from_reader(&path) {
            Ok(configuration) => configuration,
            Err(error) => {
                log::error!("cannot load {}: {}", path, error);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("no configuration file given, using defaults");
            PipelineConfiguration::default()
        }
    };

    let output = match run_pipeline(&configuration) {
        Ok(output) => output,
        Err(error) => {
            log::error!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    println!("# {}", output.model_name);
    println!(
        "{:>12} {:>16} {:>16} {:>16} {:>16}",
        "r", "density", "mean_speed", "mean_square", "dispersion"
    );
    for profile in &output.profiles {
        println!(
            "{:>12.6} {:>16.9e} {:>16.9e} {:>16.9e} {:>16.9e}",
            profile.radius,
            profile.density,
            profile.mean_speed,
            profile.mean_square_speed,
            profile.dispersion
        );
    }
    ExitCode::SUCCESS
}
