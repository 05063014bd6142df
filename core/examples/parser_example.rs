//! Classic three-option parser example.
//!
//! Declares `-a/--all` (bool, default true), `-b/--bar` (float) and `-c`
//! (string), matches the process arguments against them and prints what was
//! bound.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p pagoda-core --example parser_example -- -a --bar=2.5 -c name rest
//! cargo run -p pagoda-core --example parser_example -- --help
//! ```

use pagoda_core::{Parser, Specification};

const SPEC: &str = r#"{
  "options" : [
  {
    "Short_option" : "a",
    "Long_option"  : "all",
    "Description"  : "list them all",
    "Type"         : "bool",
    "Default"      : "true"
  },
  {
    "Short_option" : "b",
    "Long_option"  : "bar",
    "Description"  : "this causes trouble",
    "Type"         : "float"
  },
  {
    "Short_option" : "c",
    "Description"  : "the name of the thing",
    "Type"         : "string"
  }
  ],
  "Usage_info" : "[options] <filename>"
}"#;

fn main() {
    let spec = match Specification::from_json(SPEC.as_bytes()) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("error: failed to decode specification: {err}");
            std::process::exit(1);
        }
    };
    let parser = match Parser::new(spec) {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let program = std::env::args().next().unwrap_or_else(|| "parser_example".into());
    let result = match parser.parse_from(std::env::args_os()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(usage) = err.usage() {
                eprint!("\n{usage}");
            }
            std::process::exit(2);
        }
    };

    if result.help_requested() {
        print!("{}", parser.usage_for(&program, &result));
        return;
    }

    // Unbound options are reported rather than replaced by their defaults
    match result.get_bool("all") {
        Ok(all) => println!("all:  {all}"),
        Err(err) => println!("all:  {err}"),
    }
    match result.get_float("bar") {
        Ok(bar) => println!("bar:  {bar}"),
        Err(err) => println!("bar:  {err}"),
    }
    match result.get_str("c") {
        Ok(name) => println!("c:    {name}"),
        Err(err) => println!("c:    {err}"),
    }
    println!("rest: {:?}", result.remainder());
}
