#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use study_tracker::{AppConfig, http_api, logging};

    let config = AppConfig::resolve(None)?;
    logging::init_logging(&config.logging)?;

    let addr: SocketAddr = config.server.addr.parse()?;
    println!("study-tracker dashboard listening on http://{addr}");
    http_api::serve(addr, config.build_manager()).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
