//! FlibberGen - evaluate a saved model graph and print the generated code

use flibbergen::FlibberError;

fn main() -> Result<(), FlibberError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    flibbergen::run(std::env::args().collect())
}
