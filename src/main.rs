// src/main.rs

use robobatch::{cli, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if !args.run_backup && !args.dry_run {
        println!("Interactive mode is not available. Use --run-backup to run the configured backups.");
        return;
    }

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Critical Error: {err}");
            std::process::exit(1);
        }
    }
}
