//! Command-line client for the SuperKart prediction service.
//!
//! Examples:
//! - `superkart-client predict --weight 12.5 --product-type "Snack Foods" --store-size High`
//! - `superkart-client model-info --url http://127.0.0.1:5000`
//! - `superkart-client health`

use anyhow::{bail, Context, Result};
use chrono::Local;
use superkart::client::{render, PredictionClient, PredictionForm, DEFAULT_API_URL};
use superkart::features::{
    PRODUCT_MRP, PRODUCT_SUGAR_CONTENT, PRODUCT_TYPE, PRODUCT_TYPES, PRODUCT_VISIBILITY,
    PRODUCT_WEIGHT, STORE_LOCATION_TYPE, STORE_LOCATION_TYPES, STORE_SIZE, STORE_SIZES,
    STORE_TYPE, STORE_TYPES, SUGAR_CONTENTS,
};
use superkart::observability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Predict,
    ModelInfo,
    Health,
}

#[derive(Debug)]
struct Args {
    command: Command,
    url: String,
    form: PredictionForm,
}

const FIELD_FLAGS: [(&str, &str); 8] = [
    ("--weight", PRODUCT_WEIGHT),
    ("--sugar", PRODUCT_SUGAR_CONTENT),
    ("--visibility", PRODUCT_VISIBILITY),
    ("--product-type", PRODUCT_TYPE),
    ("--mrp", PRODUCT_MRP),
    ("--store-size", STORE_SIZE),
    ("--location", STORE_LOCATION_TYPE),
    ("--store-type", STORE_TYPE),
];

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Args>> {
    let mut command = Command::Predict;
    let mut url = std::env::var("SUPERKART_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let mut form = PredictionForm::default();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "predict" => command = Command::Predict,
            "model-info" => command = Command::ModelInfo,
            "health" => command = Command::Health,
            "--url" => url = it.next().context("--url requires a value")?,
            "--help" | "-h" => return Ok(None),
            flag => {
                let Some((_, field)) = FIELD_FLAGS.iter().find(|(name, _)| *name == flag) else {
                    bail!("unknown arg: {flag} (try --help)");
                };
                let value = it
                    .next()
                    .with_context(|| format!("{flag} requires a value"))?;
                form.set(field, &value)?;
            }
        }
    }

    Ok(Some(Args { command, url, form }))
}

fn print_help() {
    println!("Usage: superkart-client [predict|model-info|health] [--url URL] [FIELDS]");
    println!();
    println!("Fields (predict):");
    println!("  --weight N         Product weight in kg, 0.1-100 (default 19.2)");
    println!("  --sugar S          {}", SUGAR_CONTENTS.join(" | "));
    println!("  --visibility N     Product visibility, 0-1 (default 0.073)");
    println!("  --product-type S   {}", PRODUCT_TYPES.join(" | "));
    println!("  --mrp N            Maximum retail price, 1-500 (default 226.8)");
    println!("  --store-size S     {}", STORE_SIZES.join(" | "));
    println!("  --location S       {}", STORE_LOCATION_TYPES.join(" | "));
    println!("  --store-type S     {}", STORE_TYPES.join(" | "));
    println!();
    println!("The service URL defaults to $SUPERKART_API_URL or {DEFAULT_API_URL}.");
}

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        print_help();
        return Ok(());
    };

    let client = PredictionClient::new(&args.url)?;
    match args.command {
        Command::Predict => {
            // Domain errors stop here, before any request is sent.
            let record = args.form.to_record()?;
            match client.predict(&record).await {
                Ok(response) => print!("{}", render::prediction(&response, Local::now())),
                Err(e) => {
                    eprint!("{}", render::failure(&e));
                    std::process::exit(1);
                }
            }
        }
        Command::ModelInfo => match client.model_info().await {
            Ok(info) => print!("{}", render::model_info(&info)),
            Err(e) => {
                eprintln!("Unable to fetch model information: {e}");
                std::process::exit(1);
            }
        },
        Command::Health => match client.health().await {
            Ok(health) => print!("{}", render::health(&health)),
            Err(e) => {
                eprintln!("Service unreachable: {e}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
