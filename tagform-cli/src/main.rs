mod config;
mod constants;

use crate::config::get_engine;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tagform_core::ParsedTemplate;

#[derive(Parser, Debug)]
#[command(version,
display_name = "tagform",
bin_name = "tagform",
about="Typed placeholders for plain text templates",
long_about="Parse, describe, validate and render templates with typed {{placeholders}}", )]
struct Args {
    /// TOML file with engine settings, instead of the stored configuration
    #[arg(short = 'f', long)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the parsed tags as JSON
    Tags {
        /// Template file, or `-` for stdin
        file: String,
    },
    /// Print the JSON schema of the template form
    Schema {
        file: String,
        #[arg(short = 't', long)]
        title: Option<String>,
    },
    /// Check `name=value` arguments against the template
    Validate {
        file: String,
        #[arg(short = 'a', long)]
        args: Vec<String>,
    },
    /// Fill the template with `name=value` arguments
    Render {
        file: String,
        #[arg(short = 'a', long)]
        args: Vec<String>,
        #[arg(short = 'p', long)]
        preview: bool,
        #[arg(short = 'c', long)]
        copy: bool,
    },
    /// Print the complexity estimate as JSON
    Complexity {
        file: String,
    },
    /// Print example values for every tag as JSON
    Example {
        file: String,
    },
}

fn read_template(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read template from stdin")?;
        return Ok(content);
    }
    fs::read_to_string(file).with_context(|| format!("Failed to read template {}", file))
}

fn parse_arguments(args: &[String]) -> anyhow::Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("Invalid argument `{}`, expected name=value", arg);
        };
        values.insert(name.trim().to_string(), value.to_string());
    }
    Ok(values)
}

fn ordered_values(template: &ParsedTemplate, values: &HashMap<String, String>) -> Value {
    let map: Map<String, Value> = template
        .tags
        .iter()
        .filter_map(|tag| {
            values
                .get(&tag.name)
                .map(|value| (tag.name.clone(), Value::String(value.clone())))
        })
        .collect();
    Value::Object(map)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let engine = get_engine(args.config.as_deref());

    match &args.cmd {
        Commands::Tags { file } => {
            let template = engine.parse(&read_template(file)?);
            println!("{}", serde_json::to_string_pretty(&template.tags)?);
        }
        Commands::Schema { file, title } => {
            let form = engine.parse_and_generate_schema(&read_template(file)?, title.as_deref());
            match form.schema {
                Some(schema) => {
                    println!("{}", serde_json::to_string_pretty(&schema.to_json_schema())?)
                }
                None => eprintln!("Template has no parameters"),
            }
        }
        Commands::Validate { file, args } => {
            let template = engine.parse(&read_template(file)?);
            let result = engine.validate(&template, &parse_arguments(args)?);
            if !result.is_valid {
                for error in &result.errors {
                    eprintln!("{}", error);
                }
                std::process::exit(exitcode::DATAERR);
            }
            println!("OK");
        }
        Commands::Render { file, args, preview, copy } => {
            let template = engine.parse(&read_template(file)?);
            let values = parse_arguments(args)?;
            let result = if *preview {
                engine.render_preview(&template, &values)
            } else {
                engine.render_safe(&template, &values)
            };

            if !result.is_complete {
                eprintln!("Unfilled: {}", result.unfilled.join(", "));
            }
            if *copy {
                let mut clipboard = arboard::Clipboard::new()?;
                clipboard.set_text(result.content.clone())?;
            }
            println!("{}", result.content);
        }
        Commands::Complexity { file } => {
            let template = engine.parse(&read_template(file)?);
            println!("{}", serde_json::to_string_pretty(&engine.estimate_complexity(&template))?);
        }
        Commands::Example { file } => {
            let template = engine.parse(&read_template(file)?);
            let values = engine.synthesize_example(&template);
            println!("{}", serde_json::to_string_pretty(&ordered_values(&template, &values))?);
        }
    }

    Ok(())
}
