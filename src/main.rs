use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use chat::{app::run_query, cli::Args, openai::OpenAiClient, sources::ConfigSource};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    if let Err(e) = args.prompt() {
        eprintln!("Error: {e}\n\n{}", Args::command().render_usage());
        std::process::exit(1);
    }

    let res = ConfigSource::defaults().and_then(|sources| {
        let client = OpenAiClient::new()?;
        run_query(&args, &sources, &client)
    });
    match res {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
