use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Operator CLI for the dynamic router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9090")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered forward targets
    List,
    /// Check whether a forward target is registered
    Has {
        /// Target name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/list", cli.url.trim_end_matches('/')))
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: router returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    match cli.command {
        Commands::List => {
            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Has { name } => {
            let names: Vec<String> = res.json().await?;
            if names.contains(&name) {
                println!("{} is registered", name);
            } else {
                println!("{} is not registered", name);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
