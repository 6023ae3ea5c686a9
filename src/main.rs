use anyhow::{bail, Context as _};
use clap::Parser;
use namecheap_api::utils::{logger, validation::Validate};
use namecheap_api::{CallOptions, ClientConfig, NamecheapClient, RequestParams, TomlConfig};

#[derive(Parser, Debug)]
#[command(name = "namecheap")]
#[command(about = "Issue one Namecheap API command and print the normalized response")]
struct Args {
    /// Path to TOML configuration file; NAMECHEAP_* environment variables otherwise
    #[arg(short, long)]
    config: Option<String>,

    /// Use the sandbox endpoint
    #[arg(long)]
    sandbox: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Send parameters as a form body instead of a query string
    #[arg(long)]
    post: bool,

    /// Command, e.g. `domains.getList` or `namecheap.domains.getList`
    command: String,

    /// Command parameters as KEY=VALUE
    params: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, logging) = match &args.config {
        Some(path) => {
            let toml = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            (toml.client, toml.logging)
        }
        None => {
            let config = ClientConfig::from_env().context("Failed to read NAMECHEAP_* variables")?;
            (config, None)
        }
    };
    if args.sandbox {
        config.sandbox = true;
    }

    // 初始化日誌
    let json_logs = args.json_logs || logging.as_ref().and_then(|l| l.json).unwrap_or(false);
    if json_logs {
        let level = if args.verbose {
            Some("debug")
        } else {
            logging.as_ref().and_then(|l| l.level.as_deref())
        };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if args.verbose {
        tracing::debug!("Client config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let command = qualified_command(&args.command);
    let params = parse_params(&args.params)?;
    let options = if args.post {
        CallOptions::post()
    } else {
        CallOptions::default()
    };

    tracing::info!("🚀 {} against {}", command, config.endpoint_url());
    let client = NamecheapClient::new(config)?;
    let response = client.call_with(&command, params, options).await;

    println!("{}", response.to_json_pretty()?);
    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn qualified_command(command: &str) -> String {
    if command.starts_with("namecheap.") {
        command.to_string()
    } else {
        format!("namecheap.{}", command)
    }
}

fn parse_params(raw: &[String]) -> anyhow::Result<RequestParams> {
    let mut params = RequestParams::new();
    for pair in raw {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Parameter '{}' is not in KEY=VALUE form", pair);
        };
        if key.is_empty() {
            bail!("Parameter '{}' has an empty key", pair);
        }
        params.set(key, value);
    }
    Ok(params)
}
