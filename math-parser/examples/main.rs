use std::env;
use std::io::{self, BufRead, Write};

use math_parser::MathParser;

fn pretty_print_variables(parser: &MathParser) -> String {
    let mut variables: Vec<(&str, f64)> = parser.bindings().variables().collect();
    variables.sort_by(|a, b| a.0.cmp(b.0));

    let mut result = String::new();
    for (name, value) in variables {
        result.push_str(&format!("{} = {}\n", name, value));
    }
    result
}

/// Handles one line of input. Returns `false` when the session should end.
fn run_line(parser: &mut MathParser, line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }

    if let Some(command) = line.strip_prefix(':') {
        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "quit" | "q" => return false,
            "vars" => print!("{}", pretty_print_variables(parser)),
            "rpn" => match parser.to_rpn(rest) {
                Ok(rpn) => println!("{}", rpn),
                Err(e) => eprintln!("Failed to convert the input to RPN: {}", e),
            },
            "compile" => match parser.compile(rest) {
                Ok(program) => println!("{}", program),
                Err(e) => eprintln!("Failed to compile the expression: {}", e),
            },
            _ => eprintln!("Unknown command: {}", name),
        }
        return true;
    }

    match parser.evaluate(line) {
        Ok(result) => println!("{}", result),
        Err(e) => eprintln!("Failed to evaluate the expression: {}", e),
    }
    true
}

fn main() {
    env_logger::init();

    let mut parser = MathParser::new();
    let args: Vec<String> = env::args().skip(1).collect();

    if !args.is_empty() {
        for expression in &args {
            run_line(&mut parser, expression);
        }
        return;
    }

    println!("Please enter an expression to evaluate (:quit to exit):");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => return,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read the input: {}", e);
                return;
            }
        }

        if !run_line(&mut parser, &input) {
            return;
        }
    }
}
