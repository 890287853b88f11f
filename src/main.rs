use dotenvy::dotenv;

mod cli;
mod config;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    cli::run()
}
