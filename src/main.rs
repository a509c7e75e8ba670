fn main() {
    // Errors surface here with their context chain, then exit 1.
    if let Err(err) = srccheck::cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
