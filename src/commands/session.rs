//! Interactive session - reads commands line by line and keeps one
//! prediction history until the input ends or `quit` is entered.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use medical_risk_analyst::export::prediction_row;
use medical_risk_analyst::{Export, PatientRecord, PredictionPipeline, RiskClassifier, Session};

use super::{check_bounds, print_prediction};

const HELP: &str = "\
Commands:
  predict [AGE BP GLUCOSE BMI]   predict risk (defaults 30 120 100 22.0)
  history                        show the session history
  export latest|history [DIR]    save a CSV export (DIR defaults to .)
  explain                        show feature importances
  help                           show this help
  quit                           end the session";

#[derive(Debug, PartialEq)]
enum Command {
    Predict(PatientRecord),
    History,
    Export { full: bool, dir: PathBuf },
    Explain,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match head {
        "predict" => Command::Predict(parse_record(&args)?),
        "history" => Command::History,
        "export" => {
            let full = match args.first().copied() {
                Some("latest") => false,
                Some("history") => true,
                _ => bail!("usage: export latest|history [DIR]"),
            };
            let dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            Command::Export { full, dir }
        }
        "explain" => Command::Explain,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}', type 'help'"),
    };
    Ok(Some(command))
}

fn parse_record(args: &[&str]) -> Result<PatientRecord> {
    let record = match args {
        [] => PatientRecord::default(),
        [age, bp, glucose, bmi] => PatientRecord::new(
            age.parse().context("age must be an integer")?,
            bp.parse().context("blood pressure must be an integer")?,
            glucose.parse().context("glucose must be an integer")?,
            bmi.parse().context("BMI must be a number")?,
        ),
        _ => return Err(anyhow!("usage: predict [AGE BP GLUCOSE BMI]")),
    };
    check_bounds(&record)?;
    Ok(record)
}

pub fn run<R: BufRead, W: Write>(
    classifier: &RiskClassifier,
    input: R,
    mut out: W,
) -> Result<()> {
    classifier.ensure_trained().context("Failed to train risk model")?;
    let pipeline = PredictionPipeline::new(classifier);
    let mut session = Session::new(classifier.config().session.clone());

    writeln!(out, "Session {} started. Type 'help' for commands.", session.id())?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e:#}")?;
                continue;
            }
        };

        match command {
            Command::Predict(record) => match session.predict(&pipeline, &record) {
                Ok(result) => print_prediction(&mut out, &result)?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Command::History => {
                if session.history().is_empty() {
                    writeln!(out, "No prediction history yet")?;
                } else {
                    for (i, result) in session.history().all().iter().enumerate() {
                        writeln!(out, "{:>3}  {}", i + 1, prediction_row(result).join("  "))?;
                    }
                }
            }
            Command::Export { full, dir } => {
                let export = if full {
                    session.export_history()?
                } else {
                    session.export_latest()?
                };
                match export {
                    Some(export) => save(&mut out, &export, &dir)?,
                    None => writeln!(out, "Nothing to export yet")?,
                }
            }
            Command::Explain => {
                for item in classifier.feature_importances()? {
                    writeln!(out, "{:>14} {:.3}", item.feature, item.importance)?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    session.finish();
    Ok(())
}

fn save<W: Write>(out: &mut W, export: &Export, dir: &Path) -> Result<()> {
    match export.write_to_dir(dir) {
        Ok(path) => writeln!(out, "Saved {} ({} rows)", path.display(), export.row_count())?,
        Err(e) => writeln!(out, "error: could not save export: {e}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medical_risk_analyst::AppConfig;

    fn classifier() -> RiskClassifier {
        let mut config = AppConfig::default();
        config.model.n_trees = 10;
        RiskClassifier::new(config)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command("predict").unwrap(),
            Some(Command::Predict(PatientRecord::default()))
        );
        assert_eq!(
            parse_command("predict 45 150 180 31.5").unwrap(),
            Some(Command::Predict(PatientRecord::new(45, 150, 180, 31.5)))
        );
        assert_eq!(
            parse_command("export history out").unwrap(),
            Some(Command::Export {
                full: true,
                dir: PathBuf::from("out")
            })
        );
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert!(parse_command("predict 45 150").is_err());
        assert!(parse_command("predict 10 150 180 31.5").is_err());
        assert!(parse_command("export everything").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_session_exports_history() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "history\npredict\npredict 60 170 200 35.0\nbogus\npredict 40 130 110 24.5\nexport history {}\nquit\npredict\n",
            dir.path().display()
        );
        let mut out = Vec::new();

        run(&classifier(), script.as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("No prediction history yet"));
        assert!(output.contains("unknown command 'bogus'"));
        assert!(output.contains("(3 rows)"));

        let saved = std::fs::read_to_string(dir.path().join("prediction_history.csv")).unwrap();
        assert_eq!(saved.lines().count(), 4);
        assert!(saved.lines().nth(2).unwrap().starts_with("60,170,200,35.0,"));
    }
}
