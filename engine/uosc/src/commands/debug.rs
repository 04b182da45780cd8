//! Debug commands: `lex` and `parse` for inspecting engine internals.

use uos_lexer::{LexemeKind, Lexer, LexerConfig, LogicalLine};

use super::read_file;
use crate::CliError;

/// Lex a file and display its statements, one per line.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let source = read_file(path)?;
    let config = LexerConfig::default();
    let lines = Lexer::new(&config)
        .lex(&source)
        .map_err(|err| CliError::Lex {
            path: path.to_string(),
            source: err,
        })?;

    println!("Statements for '{path}' ({} statements):", lines.len());
    for line in render_lexemes(&lines) {
        println!("  {line}");
    }
    Ok(())
}

/// One line per statement: the line number, then each lexeme. Quoted
/// lexemes are shown in quotes.
pub fn render_lexemes(lines: &[LogicalLine]) -> Vec<String> {
    lines
        .iter()
        .map(|logical| {
            let lexemes: Vec<String> = logical
                .lexemes
                .iter()
                .map(|lexeme| match lexeme.kind {
                    LexemeKind::Word => lexeme.text.clone(),
                    LexemeKind::Quoted => format!("{:?}", lexeme.text),
                })
                .collect();
            format!("{:>4}: {}", logical.line, lexemes.join(" "))
        })
        .collect()
}

/// Parse a file and display its syntax tree.
pub fn parse_file(path: &str) -> Result<(), CliError> {
    let source = read_file(path)?;
    let tree = uos_parse::parse(&source, &LexerConfig::default()).map_err(|errors| {
        CliError::Syntax {
            path: path.to_string(),
            errors,
        }
    })?;

    println!("Parse result for '{path}':");
    println!("  Statements: {}", tree.statements().len());
    println!("  Nodes: {}", tree.len());
    println!();
    print!("{}", tree.dump());
    Ok(())
}
