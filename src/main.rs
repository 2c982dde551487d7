fn main() {
    std::process::exit(mcdeploy::app::cli::run());
}
