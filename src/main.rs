use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use clap::{Parser, Subcommand};

use ltcg::api::{CompareArgs, build_compare_response, build_parameters, run_http_server};
use ltcg::core::compare;

#[derive(Parser, Debug)]
#[command(
    name = "ltcg",
    about = "Compare India's indexed (20%) and flat (12.5%) real-estate capital gains regimes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the interactive comparison page and JSON API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print the yearly tax series for one set of inputs
    Compare {
        #[command(flatten)]
        args: CompareArgs,
        /// Print the API response JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Only print every Nth year (start, crossover and final years are always kept)
        #[arg(long, default_value_t = 1)]
        every: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    match Cli::parse().command {
        Command::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            run_http_server(addr)
                .await
                .with_context(|| format!("HTTP server on {addr} failed"))?;
        }
        Command::Compare { args, json, every } => {
            let parameters = build_parameters(&args)?;
            let comparison = compare(&parameters);
            if json {
                let response = build_compare_response(&comparison);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", ltcg::report::render(&comparison, every));
            }
        }
    }
    Ok(())
}
