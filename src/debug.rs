use tally::{Environment, Node, Token};

pub fn print_tokens(tokens: &[Token]) {
    println!("Tokens:");
    for token in tokens {
        println!("{token}");
    }
}

pub fn print_trees(statements: &[Node]) {
    println!("\nParsed result:");
    for statement in statements {
        println!("{statement}");
    }
}

pub fn print_environment(env: &Environment) {
    println!("\nOutput:");
    for (name, value) in env.sorted() {
        println!("{name} = {value}");
    }
}
