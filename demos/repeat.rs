//! Bot-style commands driven by argument converters
//!
//! Shows a host with its own context and error type: `member` parameters are
//! resolved against the guild roster, everything else uses the builtins.
//!
//! Run with: cargo run --example repeat

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reargparse::{
    BuiltinConverters, ConvertValue, Converter, Parameter, RegexArgConverter,
};
use serde_json::{json, Value};

/// Per-invocation context a command framework would supply
struct Context {
    members: HashMap<String, Value>,
    sent: Vec<String>,
}

impl Context {
    fn send(&mut self, message: impl Into<String>) {
        let message = message.into();
        println!("  -> {message}");
        self.sent.push(message);
    }
}

struct GuildConverters;

#[async_trait]
impl ConvertValue<Context> for GuildConverters {
    type Error = anyhow::Error;

    async fn convert_value(
        &self,
        ctx: &mut Context,
        parameter: &Parameter,
        raw: &str,
    ) -> Result<Value> {
        match parameter.converter_spec() {
            Some(Converter::Named(name)) if name == "member" => ctx
                .members
                .get(raw)
                .cloned()
                .ok_or_else(|| anyhow!("member '{raw}' not found")),
            _ => Ok(BuiltinConverters.convert_value(ctx, parameter, raw).await?),
        }
    }
}

struct Commands {
    add: RegexArgConverter,
    repeat: RegexArgConverter,
    joined: RegexArgConverter,
}

impl Commands {
    fn new() -> Result<Self> {
        Ok(Self {
            add: RegexArgConverter::new(
                r"(\d+) (\d+)",
                vec![
                    Parameter::new("left").converter(Converter::Int),
                    Parameter::new("right").converter(Converter::Int),
                ],
            )?,
            repeat: RegexArgConverter::new(
                r"^(\S+[ \S]*?)(?: -c(\d+))?( -n)?$",
                vec![
                    Parameter::new("string").default("hello!"),
                    Parameter::new("count").converter(Converter::Int).default(2),
                    Parameter::new("new_line").converter(Converter::Flag),
                ],
            )?,
            joined: RegexArgConverter::new(
                r"(\S+)",
                vec![Parameter::new("member").converter(Converter::Named("member".into()))],
            )?,
        })
    }

    async fn invoke(&self, ctx: &mut Context, command: &str, argstr: Option<&str>) -> Result<()> {
        match command {
            "add" => {
                let args = self.add.convert_or_defaults(&GuildConverters, ctx, argstr).await?;
                let sum = args["left"].as_i64().unwrap_or(0) + args["right"].as_i64().unwrap_or(0);
                ctx.send(sum.to_string());
            }
            "repeat" => {
                let args = self
                    .repeat
                    .convert_or_defaults(&GuildConverters, ctx, argstr)
                    .await?;
                let text = args["string"].as_str().unwrap_or_default().to_string();
                let count = args["count"].as_u64().unwrap_or(1) as usize;
                let sep = if args.contains("new_line") { "\n" } else { " " };
                ctx.send(vec![text; count].join(sep));
            }
            "joined" => {
                let args = self
                    .joined
                    .convert_or_defaults(&GuildConverters, ctx, argstr)
                    .await?;
                let member = &args["member"];
                ctx.send(format!("{} joined in {}", member["name"], member["joined_at"]));
            }
            other => return Err(anyhow!("unknown command '{other}'")),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let commands = Commands::new()?;
    let mut ctx = Context {
        members: HashMap::from([(
            "nkpro".to_string(),
            json!({"name": "nkpro", "joined_at": "2020-06-01"}),
        )]),
        sent: Vec::new(),
    };

    let invocations = [
        ("add", Some("2 3")),
        ("repeat", None),
        ("repeat", Some("Welcome :) -n")),
        ("repeat", Some("#Enjoy -c1")),
        ("joined", Some("nkpro")),
        ("joined", Some("ghost")),
        ("add", Some("two three")),
    ];

    for (command, argstr) in invocations {
        println!("?{command} {}", argstr.unwrap_or(""));
        if let Err(e) = commands.invoke(&mut ctx, command, argstr).await {
            println!("  !! {e}");
        }
    }

    println!("{} messages sent", ctx.sent.len());
    Ok(())
}
