use std::{convert::Infallible, fmt, path::PathBuf, str::FromStr};

use clap::{CommandFactory, Parser, error::ErrorKind};

use crate::render::Format;

/// Reading list generator: turn a BibTeX file into a sorted, deduplicated reading list
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the BibTeX file containing literature references
    #[arg(short = 'f', long, value_name = "FILE")]
    pub bib_file: PathBuf,

    /// Output format for the literature references [possible values: text, html]
    #[arg(short = 'F', long, default_value = "text")]
    pub format: Format,

    /// Output file to save the formatted references, `-` for stdout
    #[arg(short = 'O', long, value_name = "FILE", default_value = "-")]
    pub output_file: Output,

    /// Open the output file after writing (requires an output file)
    #[arg(long)]
    pub open: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse the command line, exiting with a usage error on invalid combinations.
    pub fn parse_checked() -> Self {
        let cli = Cli::parse();
        if let Err(msg) = cli.validate() {
            Cli::command().error(ErrorKind::ArgumentConflict, msg).exit();
        }
        cli
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.open && self.output_file == Output::Stdout {
            return Err("cannot open stdout, please specify an output file with --output-file");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where the rendered document goes: standard output (`-`) or a file.
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl FromStr for Output {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Output::Stdout)
        } else {
            Ok(Output::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("<stdout>"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}
