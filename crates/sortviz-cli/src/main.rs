#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    let cli = sortviz_cli::Cli::parse();
    sortviz_cli::logging::init(cli.log_json);
    let json = cli.json;
    if let Err(error) = sortviz_cli::run(cli) {
        if json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("error: {error}");
        }
        std::process::exit(error.exit_code());
    }
}
