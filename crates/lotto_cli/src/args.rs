use std::path::PathBuf;

use lotto_gate::api::PredictMethod;

use crate::error::CliError;

pub const USAGE: &str = "\
lotto (talks to the prediction API, http://localhost:8000/api by default)
Usage: lotto [--api URL] [--config PATH] <command> [args]

Commands:
  predict [--no-gate] [--sets N] [--method M] [--details] [--yes]
                              Watch-gate countdown, then fetch numbers
                              M: unified|statistical|ml|hybrid
  analysis                    Hot/cold numbers, odd/even ratio, seasons
  health                      Ping the API
  disclaimer                  Show the service disclaimer
  feedback <message...>       Send feedback
  paths                       Show the config file location

Environment: LOTTO_API_BASE, LOTTO_WATCH_GATE, RUST_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictArgs {
    pub no_gate: bool,
    pub sets: Option<u32>,
    pub method: Option<PredictMethod>,
    pub details: bool,
    /// Do not wait for Enter once the gate unlocks.
    pub yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Predict(PredictArgs),
    Analysis,
    Health,
    Disclaimer,
    Feedback(String),
    Paths,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub api: Option<String>,
    pub config: Option<PathBuf>,
    pub command: Command,
}

fn usage_err(msg: impl Into<String>) -> CliError {
    CliError::Usage(msg.into())
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Cli, CliError> {
    let mut args: Vec<String> = args.into_iter().collect();
    let mut api = None;
    let mut config = None;

    while let Some(first) = args.first() {
        match first.as_str() {
            "--api" | "--config" => {
                if args.len() < 2 {
                    return Err(usage_err(format!("{first} needs a value")));
                }
                let value = args[1].clone();
                if first == "--api" {
                    api = Some(value);
                } else {
                    config = Some(PathBuf::from(value));
                }
                args.drain(0..2);
            }
            _ => break,
        }
    }

    if args.is_empty() {
        return Err(usage_err("missing command"));
    }

    let cmd = args.remove(0);
    let command = match cmd.as_str() {
        "predict" => Command::Predict(parse_predict(&args)?),
        "analysis" => Command::Analysis,
        "health" => Command::Health,
        "disclaimer" => Command::Disclaimer,
        "feedback" => Command::Feedback(args.join(" ")),
        "paths" => Command::Paths,
        other => return Err(usage_err(format!("unknown command {other:?}"))),
    };

    Ok(Cli {
        api,
        config,
        command,
    })
}

fn method_choices() -> String {
    PredictMethod::all()
        .iter()
        .map(|m| m.label())
        .collect::<Vec<_>>()
        .join("|")
}

fn parse_predict(args: &[String]) -> Result<PredictArgs, CliError> {
    let mut out = PredictArgs::default();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--no-gate" => out.no_gate = true,
            "--details" => out.details = true,
            "--yes" | "-y" => out.yes = true,
            "--sets" => {
                let v = it.next().ok_or_else(|| usage_err("--sets needs a value"))?;
                let n: u32 = v
                    .parse()
                    .map_err(|_| usage_err(format!("--sets expects a number, got {v:?}")))?;
                if !(1..=10).contains(&n) {
                    return Err(usage_err("--sets must be between 1 and 10"));
                }
                out.sets = Some(n);
            }
            "--method" => {
                let v = it.next().ok_or_else(|| usage_err("--method needs a value"))?;
                out.method = Some(
                    PredictMethod::parse(v)
                        .ok_or_else(|| {
                            usage_err(format!("unknown method {v:?} (expected {})", method_choices()))
                        })?,
                );
            }
            other => return Err(usage_err(format!("unknown predict flag {other:?}"))),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn global_flags_precede_command() {
        let cli = parse_args(argv("--api http://h/api --config /tmp/c.json health")).unwrap();
        assert_eq!(cli.api.as_deref(), Some("http://h/api"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(cli.command, Command::Health);
    }

    #[test]
    fn predict_flags() {
        let cli = parse_args(argv("predict --no-gate --sets 3 --method ml --details -y")).unwrap();
        assert_eq!(
            cli.command,
            Command::Predict(PredictArgs {
                no_gate: true,
                sets: Some(3),
                method: Some(PredictMethod::Ml),
                details: true,
                yes: true,
            })
        );
    }

    #[test]
    fn feedback_joins_words() {
        let cli = parse_args(argv("feedback love the site")).unwrap();
        assert_eq!(cli.command, Command::Feedback("love the site".into()));
    }

    #[test]
    fn bad_input_is_a_usage_error() {
        for bad in ["", "--api", "bogus", "predict --sets 0", "predict --sets x", "predict --wat"] {
            assert!(
                matches!(parse_args(argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn unknown_method_lists_every_choice() {
        let Err(CliError::Usage(msg)) = parse_args(argv("predict --method lucky")) else {
            panic!("expected a usage error");
        };
        assert!(msg.contains("\"lucky\""), "{msg}");
        for m in PredictMethod::all() {
            assert!(msg.contains(m.label()), "{msg}");
        }
        assert!(USAGE.contains(&method_choices()));
    }
}
