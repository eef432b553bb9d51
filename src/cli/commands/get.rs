//! hadith get - Print one hadith

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_json, emit_robot};
use crate::corpus::Catalog;
use crate::error::{HadithError, Result};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Book name (see `hadith books`)
    pub book: String,

    /// Hadith number within the book
    #[arg(allow_hyphen_values = true)]
    pub number: String,
}

pub fn run(ctx: &AppContext, args: &GetArgs) -> Result<()> {
    let number = parse_number(&args.number)?;
    let hadith = ctx
        .store
        .get(&args.book, number)
        .ok_or_else(|| HadithError::HadithNotFound {
            book: args.book.clone(),
            number,
        })?;

    if ctx.robot_mode {
        emit_robot(hadith)
    } else {
        emit_json(&hadith)
    }
}

pub(crate) fn parse_number(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|err| HadithError::InvalidArgument(format!("invalid number: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_integers() {
        assert_eq!(parse_number("42").unwrap(), 42);
        assert_eq!(parse_number("-3").unwrap(), -3);
    }

    #[test]
    fn rejects_non_integers() {
        let err = parse_number("4a").unwrap_err();
        assert!(err.to_string().contains("invalid number"));
    }
}
