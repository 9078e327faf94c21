//! Command line entry point.

use std::path::PathBuf;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(script), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: inkslate <script.json> <output.png>");
        std::process::exit(2);
    };

    let script = PathBuf::from(script);
    let output = PathBuf::from(output);
    log::info!("Replaying {:?}", script);

    if let Err(e) = inkslate_app::run_script(&script, &output) {
        log::error!("Failed to export drawing: {}", e);
        std::process::exit(1);
    }
    log::info!("Exported PNG to: {:?}", output);
}
