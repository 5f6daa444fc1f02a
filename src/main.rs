use calcex::{eval_postfix, evaluate, parse_postfix, parse_tree, tokenize};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let text = if text.trim().is_empty() {
        "2*(1+1)+1".to_string()
    } else {
        text
    };

    let tokens = tokenize(&text)?;
    for token in tokens.iter() {
        println!("{}", token);
    }

    let postfix = parse_postfix(&tokens)?;
    let postfix_str = postfix
        .iter()
        .map(|t| t.lexeme())
        .collect::<Vec<_>>()
        .join(" ");
    println!("postfix: {} = {}", postfix_str, eval_postfix(&postfix)?);

    let tree = parse_tree(&tokens)?;
    println!("tree: {} = {}", tree, evaluate(&tree)?);
    Ok(())
}
