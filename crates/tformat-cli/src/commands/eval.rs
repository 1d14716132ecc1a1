//! Implementation of the `tformat eval` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tformat::{LocaleId, Value};

use crate::commands::BundleArgs;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// Locale to translate for (e.g., de-DE, en_US)
    #[arg(long)]
    pub locale: LocaleId,

    /// Translation key
    #[arg(long)]
    pub key: String,

    /// Positional arguments in order (repeatable). Integers, floats, `null`
    /// and `[a,b,c]` lists are recognized; anything else is text.
    #[arg(short = 'a', long = "arg")]
    pub args: Vec<String>,

    /// Exit with an error instead of printing the key when translation fails
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalResult<'a> {
    locale: String,
    key: &'a str,
    result: &'a str,
}

/// Read a command-line argument as a formatting value.
fn parse_value(text: &str) -> Value {
    match text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) if inner.trim().is_empty() => Value::Sequence(Vec::new()),
        Some(inner) => Value::Sequence(inner.split(',').map(|item| parse_scalar(item.trim())).collect()),
        None => parse_scalar(text),
    }
}

fn parse_scalar(text: &str) -> Value {
    if text == "null" {
        Value::Null
    } else if let Ok(n) = text.parse::<i64>() {
        Value::from(n)
    } else if let Some(x) = text.parse::<f64>().ok().filter(|x| x.is_finite()) {
        Value::from(x)
    } else {
        Value::from(text)
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let (manager, _report) = args.bundle.load()?;
    let values: Vec<Value> = args.args.iter().map(String::as_str).map(parse_value).collect();

    let outcome = if args.strict {
        manager.strict().translate(&args.locale, &args.key, &values)
    } else {
        Ok(manager.translate(&args.locale, &args.key, &values))
    };

    match outcome {
        Ok(result) => {
            if args.json {
                let output = EvalResult {
                    locale: args.locale.to_string(),
                    key: &args.key,
                    result: &result,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!(
                    "{} {e}",
                    "error:".if_supports_color(Stream::Stderr, |text| text.red())
                );
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_typed() {
        assert_eq!(parse_value("42").as_integer(), Some(42));
        assert_eq!(parse_value("2.5").as_float(), Some(2.5));
        assert!(parse_value("null").is_null());
        assert_eq!(parse_value("Ana").as_text(), Some("Ana"));
        assert_eq!(parse_value("inf").as_text(), Some("inf"));
    }

    #[test]
    fn brackets_make_a_sequence() {
        let value = parse_value("[a, 2, null]");
        let items = value.as_sequence().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_text(), Some("a"));
        assert_eq!(items[1].as_integer(), Some(2));
        assert!(items[2].is_null());

        assert_eq!(parse_value("[]").as_sequence().map(<[Value]>::len), Some(0));
    }
}
