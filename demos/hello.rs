//! A toy tokenizer that groups arguments the way the converters expect.
//!
//! Try `hello --name world -v -v --repeat 3 --define greeting=Hi,punct=!`.

use std::collections::BTreeMap;

use optval::prelude::*;

#[derive(Debug)]
struct Args {
    name: String,
    repeat: u32,
    verbosity: usize,
    define: BTreeMap<String, String>,
}

/// Collect the occurrences of `--long` (or `-short`), taking as many
/// values per occurrence as `arg_type` allows.
fn occurrences(args: &[String], long: &str, short: &str, arg_type: ArgType) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        let name = match arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) {
            Some(name) if name == long || name == short => name,
            _ => continue,
        };
        let mut occ = Occurrence::flag(name);
        match arg_type {
            ArgType::Flag => (),
            ArgType::Single => occ.tokens.extend(iter.next().cloned()),
            ArgType::List => {
                while let Some(value) = iter.next_if(|value| !value.starts_with('-')) {
                    occ.tokens.push(value.clone());
                }
            }
        }
        found.push(occ);
    }
    found
}

fn get<C: Converter>(args: &[String], long: &str, short: &str, conv: C) -> Result<Option<C::Value>, String> {
    let occs = occurrences(args, long, short, conv.arg_type());
    conv.convert(&occs)
        .into_result()
        .map_err(|err| format!("--{}: {}", long, err))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    Ok(Args {
        name: get(&args, "name", "n", optval::converter::<String>())?
            .ok_or("missing --name")?,
        repeat: get(&args, "repeat", "r", optval::opt_default(2, optval::converter::<u32>()))?
            .unwrap_or(1),
        verbosity: get(&args, "verbose", "v", optval::tally())?.unwrap_or(0),
        define: get(&args, "define", "D", optval::props(optval::converter::<String>()))?
            .unwrap_or_default(),
    })
}

fn main() -> Result<(), String> {
    let args = parse_args()?;
    if args.verbosity > 0 {
        println!("{:#?}", args);
    }
    let greeting = args.define.get("greeting").map_or("Hello", String::as_str);
    let punct = args.define.get("punct").map_or("", String::as_str);
    for _ in 0..args.repeat {
        println!("{} {}{}", greeting, args.name, punct);
    }
    Ok(())
}
