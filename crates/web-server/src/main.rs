// Entry point for `cargo run -p web-server`: loads configuration and serves
// the API with whichever store backend is configured.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let store = database::open_store(&config.database).await?;
    web_server::run_server(config.server.socket_addr()?, store).await
}
