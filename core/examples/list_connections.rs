//! Example: List the connections of a process as a packet filter.
//!
//! Usage: cargo run --example list_connections -- <selector>

use lsaddr_core::{encode, LookupConfig, OutputFormat, Platform};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Some(selector) = std::env::args().nth(1) else {
        eprintln!("usage: list_connections <selector>");
        std::process::exit(2);
    };

    let platform = Platform::current();
    let config = LookupConfig::default();
    println!("Looking up \"{}\" on {}...\n", selector, platform);

    match lsaddr_core::open_net_files(&selector, platform, &config).await {
        Ok(files) => {
            if files.is_empty() {
                println!("No connections found.");
                return;
            }

            println!("{:<20} {:<6} {:<30} {}", "COMMAND", "PROTO", "SOURCE", "DESTINATION");
            println!("{}", "-".repeat(90));
            for file in &files {
                let dst = file.dst.as_ref().map(|d| d.to_string()).unwrap_or_default();
                println!(
                    "{:<20} {:<6} {:<30} {}",
                    file.command,
                    file.src.network(),
                    file.src.to_string(),
                    dst
                );
            }

            println!();
            if let Err(e) = encode(OutputFormat::Bpf, &files, std::io::stdout()) {
                eprintln!("Error: {}", e);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }
}
