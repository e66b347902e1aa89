//! reargparse CLI - try converter definitions against input

use clap::{Parser, Subcommand};
use colored::Colorize;

use reargparse::{
    Arguments, BuiltinConverters, ConverterConfig, FixSuggestion, Parameter, ReargError,
    RegexArgConverter,
};

#[derive(Parser)]
#[command(name = "reargparse")]
#[command(about = "Bind regex capture groups to named, typed parameters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an input string (defaults when omitted)
    Parse {
        /// Path to a converter definition (.yaml)
        config: String,

        /// Text to match against the pattern
        input: Option<String>,

        /// Print a JSON object instead of the rendered arguments
        #[arg(long)]
        json: bool,
    },

    /// Show the arguments an empty invocation would get
    Defaults {
        /// Path to a converter definition (.yaml)
        config: String,

        /// Print a JSON object instead of the rendered arguments
        #[arg(long)]
        json: bool,
    },

    /// Check that the pattern and parameters agree
    Validate {
        /// Path to a converter definition (.yaml)
        config: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            config,
            input,
            json,
        } => parse(&config, input.as_deref(), json).await,
        Commands::Defaults { config, json } => defaults(&config, json),
        Commands::Validate { config } => validate(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load(config: &str) -> Result<RegexArgConverter, ReargError> {
    ConverterConfig::load(config)?.build()
}

fn print_arguments(args: &Arguments, json: bool) {
    if json {
        println!("{:#}", args.to_value());
    } else {
        println!("{}", args);
    }
}

async fn parse(config: &str, input: Option<&str>, json: bool) -> Result<(), ReargError> {
    let converter = load(config)?;
    let args = converter
        .convert_or_defaults(&BuiltinConverters, &mut (), input)
        .await?;
    print_arguments(&args, json);
    Ok(())
}

fn defaults(config: &str, json: bool) -> Result<(), ReargError> {
    let converter = load(config)?;
    print_arguments(&converter.defaults(), json);
    Ok(())
}

fn validate(config: &str) -> Result<(), ReargError> {
    let converter = load(config)?;

    println!("{} Converter '{}' is valid", "✓".green(), config);
    println!("  Pattern: {}", converter.source());
    println!("  Groups: {}", converter.pattern().group_count());
    println!("  Parameters:");
    for parameter in converter.parameters() {
        println!("    {}", describe(parameter));
    }

    Ok(())
}

fn describe(parameter: &Parameter) -> String {
    let mut line = parameter.name().cyan().to_string();
    if let Some(converter) = parameter.converter_spec() {
        line.push_str(&format!(": {}", converter.name()));
    }
    if let Some(value) = parameter.default_value().value() {
        line.push_str(&format!(" (default {value})"));
    }
    line
}
