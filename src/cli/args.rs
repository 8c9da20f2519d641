use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing & validation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hotelier",
    about = "Validate a hotel CSV feed and publish the clean dataset to JSON and SQLite.",
    override_usage = "hotelier <hotels.csv> [--out-dir <dir>] [--json]"
)]
pub struct Args {
    /// Hotel CSV path.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Directory receiving hotels_valid.json and hotels.sqlite (default: output).
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub out_dir: PathBuf,

    /// Emit the import report as JSON (single object).
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_with_just_an_input() {
        let args = Args::try_parse_from(["hotelier", "hotels.csv"]).expect("parse");
        assert_eq!(args.input, PathBuf::from("hotels.csv"));
        assert_eq!(args.out_dir, PathBuf::from("output"));
        assert!(!args.json);
    }

    #[test]
    fn out_dir_and_json_are_accepted() {
        let args =
            Args::try_parse_from(["hotelier", "feed.csv", "--out-dir", "/tmp/data", "--json"])
                .expect("parse");
        assert_eq!(args.out_dir, PathBuf::from("/tmp/data"));
        assert!(args.json);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(Args::try_parse_from(["hotelier"]).is_err());
    }
}
