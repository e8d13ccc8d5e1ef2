use axum::http::HeaderValue;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use std::net::SocketAddr;
use weather::app::{AppState, cors_layer, create_app};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "WEATHER_ADDRESS", default_value = "0.0.0.0:3000")]
    address: SocketAddr,

    #[arg(short, long, env = "KEY_FILE_PATH", requires = "cert_file_path")]
    key_file_path: Option<String>,

    #[arg(short, long, env = "CERT_FILE_PATH", requires = "key_file_path")]
    cert_file_path: Option<String>,

    /// Seed every request's generator with this value for reproducible forecasts.
    #[arg(short, long, env = "WEATHER_SEED")]
    seed: Option<u64>,

    /// Origins allowed to call the service from a browser, `*` for any.
    #[arg(long, env = "WEATHER_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<HeaderValue>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Some(seed) = args.seed {
        log::info!("using fixed seed {} for every forecast", seed);
    }
    if !args.allowed_origins.is_empty() {
        log::info!("allowing cross-origin requests from {:?}", args.allowed_origins);
    }
    let app = create_app(
        AppState::new(args.seed),
        cors_layer(&args.allowed_origins),
    );

    log::info!("listening on {}", args.address);
    match (args.key_file_path, args.cert_file_path) {
        (Some(key_file_path), Some(cert_file_path)) => {
            log::info!(
                "using tls with key file {} and cert file {}",
                key_file_path,
                cert_file_path
            );
            let tls = RustlsConfig::from_pem_file(cert_file_path, key_file_path).await?;
            axum_server::bind_rustls(args.address, tls)
                .serve(app.into_make_service())
                .await
        }
        _ => {
            axum_server::bind(args.address)
                .serve(app.into_make_service())
                .await
        }
    }
}
