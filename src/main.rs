use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use strtool::io_utils::{io_cli_error, simple_cli_error, str_cli_error};
use strtool::{
    codepage_path_for, container, CodepageTable, Config, DumpReport, EscapeMode, StrFile,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Operation {
    /// Export entries of BASE.str into BASE.txt
    #[value(aliases = ["x", "e"])]
    Export,
    /// Create BASE.str from BASE.txt
    #[value(aliases = ["c"])]
    Create,
    /// Dump the structure of BASE.str
    #[value(aliases = ["d"])]
    Dump,
}

/// Convert string table files to editable Unicode text and back.
#[derive(Parser)]
#[command(name = "strtool", version)]
struct Args {
    /// STR/text file path without extension
    base: PathBuf,
    /// Operation to perform, in any letter case
    #[arg(value_enum, ignore_case = true)]
    operation: Operation,
    /// Codepage table (default: MBToUni.dat next to the STR file)
    #[arg(long, value_name = "FILE")]
    codepage: Option<PathBuf>,
    /// Keep unknown backslash escapes literally instead of reading them as `\\`
    #[arg(long)]
    strict_escapes: bool,
    /// Emit the dump as JSON
    #[arg(long)]
    json: bool,
    /// Report progress
    #[arg(short, long)]
    verbose: bool,
    /// Report every entry processed
    #[arg(long)]
    debug: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn load_codepage(
    args: &Args,
    str_path: &Path,
    config: &Config,
) -> Result<CodepageTable, Box<dyn std::error::Error>> {
    let path = args
        .codepage
        .clone()
        .unwrap_or_else(|| codepage_path_for(str_path, config));
    info!(path = %path.display(), "loading codepage");
    let table = CodepageTable::from_file(&path)
        .map_err(|e| str_cli_error("reading codepage", &path, e))?;
    info!(mappings = table.len(), "codepage loaded");
    Ok(table)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args);

    let mut config = Config::default();
    if args.strict_escapes {
        config.codec.escapes = EscapeMode::Strict;
    }
    let str_path = with_extension(&args.base, &config.str_extension);
    let txt_path = with_extension(&args.base, &config.txt_extension);

    match args.operation {
        Operation::Export => {
            let table = load_codepage(&args, &str_path, &config)?;
            info!(path = %str_path.display(), "opening STR file");
            let strfile = StrFile::read_from(&str_path, &table)
                .map_err(|e| str_cli_error("reading STR file", &str_path, e))?;
            info!(path = %txt_path.display(), entries = strfile.entries.len(), "writing text file");
            strfile
                .write_text(&txt_path)
                .map_err(|e| str_cli_error("writing text file", &txt_path, e))?;
            info!("extraction finished");
        }
        Operation::Create => {
            info!(path = %txt_path.display(), "opening text file");
            let strfile = StrFile::read_text(&txt_path)
                .map_err(|e| str_cli_error("reading text file", &txt_path, e))?;
            let table = load_codepage(&args, &str_path, &config)?;
            info!(path = %str_path.display(), entries = strfile.entries.len(), "writing STR file");
            strfile
                .write_to(&str_path, &table, &config.codec)
                .map_err(|e| str_cli_error("writing STR file", &str_path, e))?;
            info!("creation finished");
        }
        Operation::Dump => {
            let table = load_codepage(&args, &str_path, &config)?;
            let data =
                fs::read(&str_path).map_err(|e| io_cli_error("reading STR file", &str_path, e))?;
            let (header, store) = container::parse(&data)
                .map_err(|e| str_cli_error("reading STR file", &str_path, e.into()))?;
            let report = DumpReport::build(header, &store, &table);
            if args.json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report.render_text());
            }
            if report.error_count() > 0 {
                return Err(simple_cli_error(&format!(
                    "{} malformed entries in '{}'. Verify the file is intact.",
                    report.error_count(),
                    str_path.display()
                ))
                .into());
            }
        }
    }
    Ok(())
}
