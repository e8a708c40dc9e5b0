use cantinho_client::Config;

fn main() {
    // Values from .env are used unless already set in the environment
    dotenvy::dotenv().ok();

    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=warn, RUST_LOG=cantinho_client=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Cantinho");

    if let Err(e) = cantinho_app::ui::launch_gui(Config::from_env()) {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
