use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pseudocpp::{Console, ConvertError, Converter, Timer, Type, TypeHints};

/// Convert a pseudo-code function into a C++ program.
#[derive(Parser, Debug)]
#[command(name = "pseudocpp", version)]
struct Cli {
    /// Pseudo-code source file
    input: PathBuf,

    /// Write the generated C++ here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Type of a variable, e.g. `--type a=int` (repeatable)
    #[arg(short = 't', long = "type", value_name = "NAME=TYPE", value_parser = parse_hint)]
    types: Vec<(String, Type)>,

    /// Fail instead of asking for missing types on the terminal
    #[arg(long)]
    no_prompt: bool,

    /// Trace every token and type binding
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print the generated code and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print how long each stage took
    #[arg(long)]
    timings: bool,
}

fn parse_hint(value: &str) -> Result<(String, Type), String> {
    let (name, ty) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TYPE, got '{}'", value))?;
    let ty = ty.parse::<Type>().map_err(|err| err.to_string())?;
    Ok((name.trim().to_string(), ty))
}

fn prompt_type(variable: &str) -> Result<Type> {
    let choices = Type::ALL.map(|ty| ty.as_str()).join(", ");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("Enter datatype for variable '{}' ({}): ", variable, choices);
        std::io::stderr().flush()?;
        let Some(line) = lines.next() else {
            bail!("no type given for variable '{}'", variable);
        };
        match line?.parse::<Type>() {
            Ok(ty) => return Ok(ty),
            Err(err) => eprintln!("{}", err),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(windows)]
    let _ = ansi_term::enable_ansi_support();

    let console = if cli.verbose {
        Console::verbose()
    } else if cli.quiet {
        Console::quiet()
    } else {
        Console::normal()
    };

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let mut hints: TypeHints = cli.types.into_iter().collect();

    let converter = Converter::new(console);
    let (program, timer) = loop {
        let mut timer = Timer::new();
        match converter.convert_timed(&source, &hints, &mut timer) {
            Ok(program) => break (program, timer),
            Err(ConvertError::MissingType { variable }) if !cli.no_prompt => {
                let ty = prompt_type(&variable)?;
                console.println(format!("[Main] Retrying with '{}' as {}", variable, ty));
                hints.insert(variable, ty);
            }
            Err(err) => {
                console.force_println(err.render(&source));
                std::process::exit(1);
            }
        }
    };

    if cli.timings {
        console.force_println(&timer);
    }

    match cli.output {
        Some(path) => {
            std::fs::write(&path, program.source())
                .with_context(|| format!("failed to write {}", path.display()))?;
            console.println(format!("[Main] Wrote {}", path.display()));
        }
        None => print!("{}", program),
    }
    Ok(())
}
