use anyhow::{Context, Result};
use std::env;

use sunat_lookup::{handle, Config, QueryParams};

const USAGE: &str = "usage: sunat-lookup [ruc|name] <value>";

#[tokio::main]
async fn main() -> Result<()> {
    sunat_lookup::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let params = match parse_args(&args) {
        Some(params) => params,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    let service = config.build_service()?;

    let response = handle(&service, &params).await;
    let body = serde_json::to_string_pretty(&response).context("Failed to encode response")?;

    println!("{}", response.status());
    println!("{}", body);

    if !response.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

/// `<value>` alone means a RUC lookup; `<kind> <value...>` picks the kind
fn parse_args(args: &[String]) -> Option<QueryParams> {
    match args {
        [] => None,
        [flag] if flag == "-h" || flag == "--help" => None,
        [value] => Some(QueryParams::new(None, Some(value.as_str()))),
        [kind, rest @ ..] => Some(QueryParams::new(Some(kind.as_str()), Some(rest.join(" ").as_str()))),
    }
}
