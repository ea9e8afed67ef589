//! vapor-adapter: decode Vapor transactions, derive addresses, query a node.

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use vapor_adapter::{AdapterConfig, ClientAdapter, ServerAdapter};
use vapor_utils::LogFormat;

#[derive(Parser)]
#[command(name = "vapor-adapter", about = "Vapor chain adapter", version)]
struct Cli {
    /// Network: "mainnet", "testnet" or "solonet".
    #[arg(long, env = "VAPOR_CHAIN_ID")]
    chain_id: Option<String>,

    /// Base URL of the node API.
    #[arg(long, env = "VAPOR_NODE_URL")]
    node_url: Option<String>,

    /// "user:password" for the node API.
    #[arg(long, env = "VAPOR_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, env = "VAPOR_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VAPOR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VAPOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(flatten)]
    Local(LocalCommand),

    #[command(flatten)]
    Node(NodeCommand),
}

/// Commands answered without a node.
#[derive(clap::Subcommand)]
enum LocalCommand {
    /// Decode a raw transaction into normalized inputs and outputs.
    Decode { raw_hex: String },

    /// Print the id of a raw transaction.
    UnsignedHash { raw_hex: String },

    /// Derive the receive address of an extended public key.
    DeriveAddress { xpub: String },

    /// Render a control program as an address.
    ScriptAddress { program_hex: String },

    /// Show the registry entry for an asset id.
    Token { asset_id: String },
}

/// Commands that query the node API.
#[derive(clap::Subcommand)]
enum NodeCommand {
    /// Ask the node for its block height.
    BlockCount,

    /// List the node's unconfirmed transactions.
    Mempool,

    /// List the transactions of a block.
    Block { height: u64 },

    /// Look up one confirmed transaction.
    Tx { tx_id: String },

    /// List the balances of a node account.
    Balances { account_id: String },

    /// List the transactions of a node account.
    Txs {
        account_id: String,
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
}

#[derive(Serialize)]
struct TokenInfo<'a> {
    asset_id: &'a str,
    code: &'a str,
    decimal: u8,
    bridged: bool,
}

/// File settings (or defaults) with flags and env vars applied on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<AdapterConfig> {
    let mut config = match &cli.config {
        Some(path) => AdapterConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AdapterConfig::default(),
    };
    if let Some(chain_id) = &cli.chain_id {
        config.chain_id = chain_id.clone();
    }
    if let Some(node_url) = &cli.node_url {
        config.node_url = node_url.clone();
    }
    if let Some(access_token) = &cli.access_token {
        config.access_token = access_token.clone();
    }
    if let Some(log_format) = cli.log_format {
        config.log_format = log_format;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }
    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_local(config: &AdapterConfig, command: LocalCommand) -> anyhow::Result<()> {
    let adapter = ClientAdapter::from_config(config)?;
    match command {
        LocalCommand::Decode { raw_hex } => print_json(&adapter.decode(raw_hex.trim())?),
        LocalCommand::UnsignedHash { raw_hex } => {
            print_json(&adapter.unsigned_hash(raw_hex.trim())?)
        }
        LocalCommand::DeriveAddress { xpub } => {
            print_json(&adapter.pubkey_to_address(xpub.trim())?)
        }
        LocalCommand::ScriptAddress { program_hex } => {
            let program = hex::decode(program_hex.trim()).context("control program is not hex")?;
            print_json(&adapter.script_to_address(&program)?)
        }
        LocalCommand::Token { asset_id } => match adapter.lookup(&asset_id) {
            Some(param) => print_json(&TokenInfo {
                asset_id: &asset_id,
                code: &param.code,
                decimal: param.decimal,
                bridged: param.bridged,
            }),
            None => bail!("asset {asset_id} is not registered"),
        },
    }
}

async fn run_remote(config: &AdapterConfig, command: NodeCommand) -> anyhow::Result<()> {
    let adapter = ServerAdapter::from_config(config)?;
    tracing::debug!(node_url = %config.node_url, "querying node");
    match command {
        NodeCommand::BlockCount => print_json(&adapter.get_block_count().await?),
        NodeCommand::Mempool => print_json(&adapter.get_raw_mempool().await?),
        NodeCommand::Block { height } => print_json(&adapter.get_block_txs(height).await?),
        NodeCommand::Tx { tx_id } => print_json(&adapter.get_transaction(&tx_id).await?),
        NodeCommand::Balances { account_id } => {
            print_json(&adapter.balances_for_account(&account_id).await?)
        }
        NodeCommand::Txs {
            account_id,
            start,
            limit,
        } => print_json(&adapter.txs_for_account(&account_id, start, limit).await?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    vapor_utils::init_logging(config.log_format, &config.log_level)?;

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Local(command) => run_local(&config, command),
        Command::Node(command) => run_remote(&config, command).await,
    }
}
