use bishop_board::config::BoardConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = BoardConfig::from_env();
    log::info!("Bishop board - assets from {}", config.asset_dir.display());
    bishop_board::mock::run_interactive_terminal(&config);
}
