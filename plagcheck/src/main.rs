mod args;
mod commands;
mod config;
mod error;
mod report;
mod similarity;
mod tokens;

use args::{Args, Paths, Reporter, USAGE};
use clap::Parser;
use commands::check;
use error::Result;
use log::error;
use report::{AnsiReporter, FileSink, JsonReporter, SilentReporter, StdoutSink};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let Some(paths) = args.paths() else {
        println!("{USAGE}");
        return;
    };

    if let Err(err) = run(&args, &paths).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: &Args, paths: &Paths<'_>) -> Result<()> {
    let config = config::load(args).await?;
    let settings = config.resolve(args)?;

    let mut reporter: Box<dyn report::Reporter> = match args.console_reporter() {
        Some(Reporter::Ansi) => Box::new(AnsiReporter::new(!args.no_color)),
        Some(Reporter::Json) => Box::new(JsonReporter),
        None => Box::new(SilentReporter),
    };

    if paths.writes_to_stdout() {
        check(&settings, paths, &mut StdoutSink, reporter.as_mut()).await?;
    } else {
        check(&settings, paths, &mut FileSink::new(paths.output), reporter.as_mut()).await?;
    }

    Ok(())
}
