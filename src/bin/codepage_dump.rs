//! Prints every mapping of a codepage table as `index U+XXXX char`.
//! With a second argument only indices up to that value are shown.

use std::path::Path;
use strtool::io_utils::{simple_cli_error, str_cli_error};
use strtool::CodepageTable;

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        return Err(simple_cli_error(&format!(
            "Usage: {} <codepage_file> [max_index]",
            args[0]
        ))
        .into());
    }

    let path = Path::new(&args[1]);
    let max_index = match args.get(2) {
        Some(s) => s
            .parse::<usize>()
            .map_err(|_| simple_cli_error("invalid max_index"))?,
        None => usize::MAX,
    };

    let table =
        CodepageTable::from_file(path).map_err(|e| str_cli_error("reading codepage", path, e))?;

    for (index, &unit) in table.units().iter().enumerate() {
        if index > max_index {
            break;
        }
        let shown = char::from_u32(u32::from(unit))
            .filter(|c| !c.is_control())
            .unwrap_or('.');
        println!("{index:5} U+{unit:04X} {shown}");
    }
    println!("Total mappings: {}", table.len());

    Ok(())
}
