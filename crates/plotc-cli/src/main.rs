use anyhow::Context as _;
use clap::Parser;
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The equation to compile, e.g. "y = x*sin(x)^2".
    equation: Option<String>,

    /// Read the equation from a file instead.
    #[arg(short, long, conflicts_with = "equation")]
    file: Option<PathBuf>,

    /// Write the generated fragment shader here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::trace!("CLI args = {:?}", args);

    let equation = match (&args.equation, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            anyhow::bail!("no equation given (pass one as an argument, or use --file)")
        }
    };
    let equation = equation.trim();

    let source =
        plotc::compile(equation).with_context(|| format!("failed to compile `{}`", equation))?;

    match &args.output {
        Some(path) => fs::write(path, &source)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", source),
    }

    Ok(())
}
