use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use tally::{parse_program, tokenize_file, Interpreter};

mod debug;

#[derive(Default)]
struct Options {
    script: Option<String>,
    show_tokens: bool,
    show_tree: bool,
}

impl Options {
    fn from_args(args: &[String]) -> Result<Self, String> {
        let mut options = Self::default();
        for arg in args {
            match arg.as_str() {
                "--tokens" => options.show_tokens = true,
                "--tree" => options.show_tree = true,
                flag if flag.starts_with("--") => return Err(format!("Unknown option {flag}")),
                path if options.script.is_none() => options.script = Some(path.to_string()),
                _ => return Err("Usage: tally [--tokens] [--tree] [FILE]".to_string()),
            }
        }
        Ok(options)
    }
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = Options::from_args(&args)?;
    match options.script {
        Some(ref filename) => run_script(filename, &options)?,
        None => run_repl().map_err(|e| e.to_string())?,
    }
    Ok(())
}

fn run_script(filename: &str, options: &Options) -> Result<(), String> {
    let tokens = tokenize_file(filename).map_err(|e| format!("{filename}: {e}"))?;
    if options.show_tokens {
        debug::print_tokens(&tokens);
    }
    let statements = parse_program(&tokens).map_err(|e| format!("Parse error: {e}"))?;
    if options.show_tree {
        debug::print_trees(&statements);
    }
    let mut interpreter = Interpreter::new();
    let result = interpreter.execute(&statements);
    debug::print_environment(interpreter.environment());
    result.map(|_| ()).map_err(|e| e.to_string())
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    let mut interpreter = Interpreter::new();
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                match interpreter.run(&line) {
                    Ok(values) => {
                        if let Some(value) = values.last() {
                            println!("{value}");
                        }
                    }
                    Err(err) => println!("Error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
