//! The main entrypoint for imgref, used in the binary.

mod cli;
mod config;

fn main() {
    // Set up logging first so configuration loading can trace.
    imgref_utils::initialize_tracing();
    tracing::trace!("starting imgref");
    imgref_utils::run_main(|| cli::run_from_iter(std::env::args()))
}
