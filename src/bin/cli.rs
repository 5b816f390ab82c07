use bordercrop::{exit_codes, logging, BorderCrop, Config};

use std::process;
use tracing::{dispatcher, error};

fn main() {
    let config = Config::default();

    let log = match logging::file_dispatch(&config.log_path) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(exit_codes::GENERAL_ERROR);
        }
    };

    let cropper = BorderCrop::new(config.strategy).with_log(log.clone());
    let code = match cropper.run(&config.input, &config.output) {
        Ok(_) => exit_codes::SUCCESS,
        Err(e) => {
            dispatcher::with_default(&log, || error!("{}", e));
            e.exit_code()
        }
    };

    process::exit(code);
}
