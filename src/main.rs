use std::time::Duration;

use anyhow::Result;
use clap::Parser as _;

mod args;
mod config;
mod event_loop;
mod spotify;
mod sync;
mod telegram;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = args::Args::parse();
    args.init_tracing_subscriber();

    let config = config::Config::from_env()?;

    let spotify = spotify::SpotifyClient::connect(config.spotify).await?;
    let telegram = telegram::ProfileClient::connect(config.tg_api_id, &config.tg_api_hash).await?;

    event_loop::run(
        spotify,
        telegram,
        Duration::from_secs_f64(args.check_every),
        args.single,
    )
    .await
}
