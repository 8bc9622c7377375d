//! `carl`: translates Notation3 (N3) documents into N3P.
//!
//! File discovery, argument parsing and stream buffering live here, outside
//! the library's specified core (see `lib.rs`'s module docs).

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use std::time::Instant;

use clap::Parser as ClapArgs;
use log::{debug, info};

use carl::{FormatOptions, Lexer, Parser, TripleSink, Writer};

/// Translates Notation3 (N3) documents into N3P, a Prolog-style fact/rule
/// stream consumed by a forward-chaining rule engine.
#[derive(ClapArgs, Debug)]
#[command(name = "carl", version, about, long_about = None)]
struct Cli {
    /// Initial base IRI. Defaults per-input to a `file://` URL derived from
    /// the input's path (or `file:///dev/stdin` for standard input).
    #[arg(short = 'b', long = "base", value_name = "BASE-URI")]
    base: Option<String>,

    /// Output file, or `-` for standard output.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Input files, or `-` for standard input. With none given, nothing is
    /// translated.
    inputs: Vec<String>,
}

const OUTPUT_BUFFER_SIZE: usize = 1024 * 1024;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let out = match open_output(cli.output.as_deref()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("carl: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut writer = Writer::new(out, FormatOptions::default());
    writer.start();

    let started = Instant::now();
    let mut ok = true;
    for input in &cli.inputs {
        debug!("translating {}", input);
        if let Err(e) = translate_one(input, cli.base.as_deref(), &mut writer) {
            eprintln!("{}", e);
            ok = false;
            break;
        }
    }

    let count = writer.count();
    writer.end();

    if ok {
        info!(
            "translated {} triples in {:.1} ms",
            count,
            started.elapsed().as_secs_f64() * 1000.0
        );
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn translate_one(
    input: &str,
    base_override: Option<&str>,
    writer: &mut Writer<Box<dyn Write>>,
) -> carl::Result<()> {
    let text = read_input(input)?;
    let base = base_override
        .map(str::to_string)
        .unwrap_or_else(|| default_base(input));

    let lexer = Lexer::new(&text);
    let mut parser = Parser::new(lexer, base, writer)?;
    parser.parse_document()
}

fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    match path {
        None | Some("-") => Ok(Box::new(io::BufWriter::with_capacity(
            OUTPUT_BUFFER_SIZE,
            io::stdout(),
        ))),
        Some(path) => {
            let file = fs::File::create(path)?;
            Ok(Box::new(io::BufWriter::with_capacity(
                OUTPUT_BUFFER_SIZE,
                file,
            )))
        }
    }
}

fn read_input(input: &str) -> carl::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn default_base(input: &str) -> String {
    if input == "-" {
        return "file:///dev/stdin".to_string();
    }
    let absolute = fs::canonicalize(input).unwrap_or_else(|_| input.into());
    format!("file://{}", absolute.to_string_lossy())
}
