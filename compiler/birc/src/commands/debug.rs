//! Debug commands: `lex` and `parse` for inspecting the front end.

use bir_diagnostic::emitter::DiagnosticEmitter;
use bir_ir::Statement;

use super::{read_file, stderr_emitter};

/// Lex a file and print the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = match bir_lexer::lex(&content) {
        Ok(tokens) => tokens,
        Err(err) => {
            let mut emitter = stderr_emitter().with_source(content).with_file_path(path);
            emitter.emit(&err.to_diagnostic());
            emitter.flush();
            std::process::exit(1);
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {:?} @ {}", token.kind, token.position);
    }
}

/// Parse a file and print a summary of its imports and top-level items.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let program = match bir_parse::parse(&content) {
        Ok(program) => program,
        Err(err) => {
            let mut emitter = stderr_emitter().with_source(content).with_file_path(path);
            emitter.emit(&err.to_diagnostic());
            emitter.flush();
            std::process::exit(1);
        }
    };

    println!("Parse result for '{path}':");
    println!("  Imports: {}", program.imports.len());
    println!("  Statements: {}", program.statements.len());

    if !program.imports.is_empty() {
        println!();
        println!("Imports:");
        for import in &program.imports {
            println!("  use \"{}\" @ {}", import.source, import.position);
        }
    }

    let blocks: Vec<_> = program
        .statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::BlockDecl(decl) => Some(decl),
            _ => None,
        })
        .collect();
    if !blocks.is_empty() {
        println!();
        println!("Blocks:");
        for decl in blocks {
            let verbs: Vec<_> = decl.verbs.iter().map(|verb| verb.value.as_str()).collect();
            let args: Vec<_> = decl.args.iter().map(|arg| arg.value.as_str()).collect();
            match &decl.implements {
                Some(parent) => println!("  {} implements {}", decl.name.value, parent.value),
                None if verbs.is_empty() => {
                    println!("  {} [{}]", decl.name.value, args.join(", "));
                }
                None => println!("  {}:{} [{}]", decl.name.value, verbs.join(":"), args.join(", ")),
            }
        }
    }
}
