#![forbid(unsafe_code)]

pub mod cli;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sink;
pub mod validate;

/// Run the hotelier pipeline. Returns exit code (0, 1, or 2).
pub fn run() -> Result<u8, Box<dyn std::error::Error>> {
    use std::io::{self, Write};

    let args = match cli::args::Args::parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            return Ok(2);
        }
    };

    std::fs::create_dir_all(&args.out_dir)?;
    let import = pipeline::import(&args.input, &args.out_dir);
    let outcome = import.outcome();
    let mode = if args.json {
        cli::exit::OutputMode::Json
    } else {
        cli::exit::OutputMode::Human
    };
    let output = if args.json {
        import.to_json()?
    } else {
        report::render_human(&import).join("\n")
    };
    let stream = cli::exit::output_stream(outcome, mode);

    match stream {
        cli::exit::OutputStream::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
        cli::exit::OutputStream::Stderr => {
            let mut stderr = io::stderr();
            stderr.write_all(output.as_bytes())?;
            stderr.flush()?;
        }
    }

    Ok(cli::exit::exit_code(outcome))
}
