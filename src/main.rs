use tracklift::cli::run;

fn main() {
    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
