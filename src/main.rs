use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use showif::{
    Environment, ModelEvent, ReactiveModel, SurveyDefinition, Value, compile, compile_binding,
    evaluate,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// showif evaluates survey visibility conditions and title templates.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluates one expression and prints its value.
    Eval {
        /// The expression, for example `A.answer = 'Yes' and age > 18`.
        expression: String,

        /// Binds an answer before evaluating, as `name=value`. Dotted names
        /// such as `A.answer=25` write into a record. Repeatable.
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Allows a leading `name = expression` that stores its result.
        #[arg(short, long)]
        binding: bool,
    },
    /// Loads a survey file, applies answers in order and prints what changed.
    Survey {
        /// JSON file with `options` and `questions`.
        file: PathBuf,

        /// Answer to apply, as `name=value`. Applied in the order given.
        #[arg(short, long = "answer", value_name = "NAME=VALUE")]
        answer: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(EnvFilter::from_default_env())
                                  .init();

    let args = Args::parse();

    let result = match args.command {
        Command::Eval { expression,
                        set,
                        binding, } => run_eval(&expression, &set, binding),
        Command::Survey { file, answer } => run_survey(&file, &answer),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run_eval(expression: &str, assignments: &[String], binding: bool) -> Result<(), Box<dyn Error>> {
    let mut env = Environment::new();
    for assignment in assignments {
        let (name, value) = split_assignment(assignment)?;
        env.set(name, value);
    }

    let compiled = if binding { compile_binding(expression)? } else { compile(expression)? };
    let value = evaluate(&compiled, &mut env)?;
    println!("{value}");

    if binding && !env.is_empty() {
        println!();
        for (name, value) in env.iter() {
            println!("{name} = {value}");
        }
    }
    Ok(())
}

fn run_survey(file: &Path, answers: &[String]) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(file).map_err(|e| {
                                           format!("Failed to read the survey file '{}': {e}",
                                                   file.display())
                                       })?;
    let definition: SurveyDefinition = serde_json::from_str(&text)?;
    let mut model = ReactiveModel::from_definition(definition)?;
    model.subscribe(|event: &ModelEvent| {
             tracing::trace!(question = event.question(), "model event");
             println!("  {event}");
         });

    for answer in answers {
        let (name, value) = split_assignment(answer)?;
        println!("{name} = {value}");
        for failure in model.update_response(name, value).failures {
            println!("  failed {failure}");
        }
    }

    println!();
    for question in model.questions() {
        let marker = if question.is_visible() { "x" } else { " " };
        println!("[{marker}] {}: {}", question.name(), question.rendered_title());
    }
    Ok(())
}

/// Splits `name=value` and reads the value as an expression literal.
///
/// Text that does not evaluate on its own, like a bare word, is taken as a
/// plain string, so `--set color=blue` and `--set "color='blue'"` agree.
fn split_assignment(text: &str) -> Result<(&str, Value), String> {
    let (name, raw) = text.split_once('=')
                          .ok_or_else(|| format!("Expected NAME=VALUE, found '{text}'."))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Missing name in '{text}'."));
    }

    let value = compile(raw).ok()
                            .and_then(|literal| evaluate(&literal, &mut Environment::new()).ok())
                            .unwrap_or_else(|| Value::from(raw));
    Ok((name, value))
}
