//! Command line arguments
//!
//! `review-thread <rating-id> [--comment <id>] [--fixtures <dir>]`

use anyhow::{anyhow, bail, Context, Result};

pub const USAGE: &str = "Usage: review-thread <rating-id> [--comment <id>] [--fixtures <dir>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub rating_id: u64,
    /// Comment to deep link to on start
    pub comment: Option<String>,
    /// Overrides the configured fixtures directory
    pub fixtures: Option<String>,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut rating_id = None;
        let mut comment = None;
        let mut fixtures = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--comment" | "-c" => {
                    comment = Some(args.next().ok_or_else(|| anyhow!("--comment needs an id"))?);
                }
                "--fixtures" | "-f" => {
                    fixtures = Some(
                        args.next()
                            .ok_or_else(|| anyhow!("--fixtures needs a directory"))?,
                    );
                }
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                value => {
                    if rating_id.is_some() {
                        bail!("Unexpected argument: {}", value);
                    }
                    rating_id = Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid rating id: {}", value))?,
                    );
                }
            }
        }

        Ok(Self {
            rating_id: rating_id.ok_or_else(|| anyhow!("Missing rating id"))?,
            comment,
            fixtures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_full() {
        let args = parse(&["7", "--comment", "42", "--fixtures", "data"]).unwrap();
        assert_eq!(
            args,
            Args {
                rating_id: 7,
                comment: Some("42".to_string()),
                fixtures: Some("data".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_rating_only() {
        let args = parse(&["3"]).unwrap();
        assert_eq!(args.rating_id, 3);
        assert_eq!(args.comment, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["abc"]).is_err());
        assert!(parse(&["1", "2"]).is_err());
        assert!(parse(&["1", "--comment"]).is_err());
        assert!(parse(&["1", "--verbose"]).is_err());
    }
}
