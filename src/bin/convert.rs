// The CLI (spec §6.2): reads HTML from stdin or a `--file` path, writes
// Markdown to stdout. Kept to plain `std::env::args` rather than a flag
// parsing crate, matching the teacher's own minimal `bin/convert.rs`.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use html2markdown::{BulletMarker, CodeBlockStyle, FenceLiteral, HeadingStyle, HtmlNode, Options};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut file_path: Option<String> = None;
    let mut options: Options<HtmlNode> = Options::default();

    let takes_value =
        |flag: &str| matches!(flag, "--file" | "--heading-style" | "--fence" | "--bullet" | "--base-url" | "--break");

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if !takes_value(&arg) {
            eprintln!("html2markdown: unrecognized argument {arg}");
            return ExitCode::FAILURE;
        }
        let Some(value) = iter.next() else {
            eprintln!("html2markdown: missing value for {arg}");
            return ExitCode::FAILURE;
        };

        match arg.as_str() {
            "--file" => file_path = Some(value),
            "--heading-style" => {
                options.heading_style = match value.as_str() {
                    "setext" => HeadingStyle::Setext,
                    "atx" => HeadingStyle::Atx,
                    other => {
                        eprintln!("html2markdown: unknown --heading-style {other}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--fence" => {
                options.code_block_style = CodeBlockStyle::Fenced;
                options.fence_literal = match value.as_str() {
                    "`" | "backtick" => FenceLiteral::Backtick,
                    "~" | "tilde" => FenceLiteral::Tilde,
                    other => {
                        eprintln!("html2markdown: unknown --fence {other}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--bullet" => {
                options.bullet_marker = match value.as_str() {
                    "*" => BulletMarker::Asterisk,
                    "-" => BulletMarker::Dash,
                    "+" => BulletMarker::Plus,
                    other => {
                        eprintln!("html2markdown: unknown --bullet {other}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--base-url" => options.base_url = Some(value),
            "--break" => options.line_break_literal = value,
            _ => unreachable!("matched above"),
        }
    }

    let html = match file_path {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("html2markdown: reading {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut buf = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut buf) {
                eprintln!("html2markdown: reading stdin: {err}");
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    match html2markdown::convert_with(&html, options) {
        Ok(markdown) => {
            let mut stdout = io::stdout();
            if writeln!(stdout, "{markdown}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("html2markdown: {err}");
            ExitCode::FAILURE
        }
    }
}
