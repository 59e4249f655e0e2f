//! `zion` — ZionLayer command-line interface.
//!
//! Thin front end over the `zionlayer` SDK:
//!
//! - **`wallet`** — generate a wallet or show the one a private key restores.
//! - **`chain-id`**, **`balance`**, **`mempool`** — chain queries.
//! - **`agent`** — register, look up, message, and submit inference receipts.
//! - **`transfer`** — move $ZIO between accounts.
//!
//! Results are printed as JSON on stdout. Usage errors exit with code 2,
//! node or transport failures with code 1.

use std::collections::BTreeMap;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use zionlayer::config::{DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS};
use zionlayer::{
    AgentCapability, AgentDidRef, AgentMessage, AgentWallet, AgenticClient, ClientConfig,
    InferenceReceipt, MessageType, SdkError,
};

/// zion — ZionLayer CLI
///
/// Register agents, send messages and receipts, and query a ZionLayer node.
#[derive(Parser)]
#[command(name = "zion", version, about, long_about = None)]
struct Cli {
    /// Node JSON-RPC endpoint.
    #[arg(long, env = "ZION_RPC_URL", default_value = DEFAULT_RPC_URL, global = true)]
    rpc_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "ZION_RPC_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate or inspect a wallet. No node is contacted.
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },

    /// Print the node's chain id.
    ChainId,

    /// Print the balance and nonce of an address.
    Balance {
        /// `0x`-prefixed address.
        address: String,
    },

    /// Print the number of pending transactions in the node's mempool.
    Mempool,

    /// Agent registration, lookup and messaging.
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Move $ZIO from the wallet to another address.
    Transfer {
        #[command(flatten)]
        key: KeyArg,

        /// Recipient address.
        #[arg(long, value_name = "ADDRESS")]
        to: String,

        /// Amount in the smallest $ZIO unit.
        #[arg(long, value_name = "AMOUNT")]
        value: u128,
    },
}

#[derive(Subcommand)]
enum WalletAction {
    /// Generate a new random wallet and print it, private key included.
    New,

    /// Print the address and public key a private key restores.
    Show {
        #[command(flatten)]
        key: KeyArg,
    },
}

#[derive(Subcommand)]
enum AgentAction {
    /// Register the wallet's agent DID on-chain.
    ///
    /// Examples:
    ///   zion agent register --private-key $KEY -c inference:1.0 -c tool-use:1.0 \
    ///     --meta model=claude-3-5-sonnet
    Register {
        #[command(flatten)]
        key: KeyArg,

        /// A capability as <name>:<version>. Repeat for multiple.
        #[arg(short = 'c', long = "capability", value_name = "NAME:VERSION")]
        capabilities: Vec<AgentCapability>,

        /// A metadata entry as <key>=<value>. Repeat for multiple.
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        metadata: Vec<String>,
    },

    /// Print the on-chain record for a DID.
    Get {
        /// `did:agc:<address>`.
        did: String,
    },

    /// Send an on-chain message from the wallet's agent to another agent.
    Message {
        #[command(flatten)]
        key: KeyArg,

        /// Recipient DID.
        #[arg(long, value_name = "DID")]
        to: String,

        /// Message type: TASK | RESULT | DELEGATE | REVOKE
        #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "TASK")]
        message_type: MessageType,

        /// JSON payload. Text that is not valid JSON is sent as a JSON string.
        #[arg(short = 'p', long, value_name = "JSON", default_value = "null")]
        payload: String,
    },

    /// Submit an inference receipt for on-chain verification.
    Receipt {
        #[command(flatten)]
        key: KeyArg,

        /// IPFS CID of the model.
        #[arg(long, value_name = "CID")]
        model_hash: String,

        #[arg(long, value_name = "HASH")]
        input_hash: String,

        #[arg(long, value_name = "HASH")]
        output_hash: String,

        /// Prover signature, if one was produced off-chain.
        #[arg(long, value_name = "SIG", default_value = "")]
        prover_sig: String,
    },
}

#[derive(clap::Args)]
struct KeyArg {
    /// Wallet private key hex.
    #[arg(long = "private-key", env = "ZION_PRIVATE_KEY", value_name = "HEX", hide_env_values = true)]
    private_key: String,
}

impl KeyArg {
    fn wallet(&self) -> AgentWallet {
        AgentWallet::from_private_key(&self.private_key)
            .unwrap_or_else(|e| fatal(&format!("invalid --private-key: {e}")))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zion=warn,zionlayer=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        rpc_url: cli.rpc_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    let client = AgenticClient::from_config(&config)
        .unwrap_or_else(|e| fatal(&format!("failed to build client: {e}")));

    match run(&client, cli.command).await {
        Ok(output) => print_json(&output),
        Err(e) => {
            eprintln!("zion: {e}");
            process::exit(1);
        }
    }
}

fn wallet_json(action: &WalletAction) -> Value {
    match action {
        WalletAction::New => {
            let wallet = AgentWallet::generate();
            json!({
                "address": wallet.address,
                "public_key": wallet.public_key,
                "private_key": wallet.private_key(),
                "did": AgentDidRef::for_address(&wallet.address).to_string(),
            })
        }
        WalletAction::Show { key } => {
            let wallet = key.wallet();
            json!({
                "address": wallet.address,
                "public_key": wallet.public_key,
                "did": AgentDidRef::for_address(&wallet.address).to_string(),
            })
        }
    }
}

async fn run(client: &AgenticClient, command: Command) -> Result<Value, SdkError> {
    match command {
        Command::Wallet { action } => Ok(wallet_json(&action)),

        Command::ChainId => Ok(json!({ "chain_id": client.chain().get_chain_id().await? })),

        Command::Balance { address } => {
            let account = client.chain().get_account(&address).await?;
            Ok(json!({
                "address": address,
                "balance": account.balance.to_string(),
                "nonce": account.nonce,
            }))
        }

        Command::Mempool => Ok(json!({ "size": client.chain().get_mempool_size().await? })),

        Command::Transfer { key, to, value } => {
            let tx_hash = client.chain().transfer(&key.wallet(), &to, value).await?;
            Ok(json!({ "tx_hash": tx_hash }))
        }

        Command::Agent { action } => match action {
            AgentAction::Register {
                key,
                capabilities,
                metadata,
            } => {
                let metadata = parse_metadata(&metadata);
                let (did, tx_hash) = client
                    .agents()
                    .register(&key.wallet(), capabilities, metadata)
                    .await?;
                Ok(json!({ "did": did, "tx_hash": tx_hash }))
            }

            AgentAction::Get { did } => {
                let did = AgentDidRef::parse(&did).unwrap_or_else(|e| fatal(&e.to_string()));
                let record = client.agents().get(&did.to_string()).await?;
                Ok(serde_json::to_value(record)?)
            }

            AgentAction::Message {
                key,
                to,
                message_type,
                payload,
            } => {
                let wallet = key.wallet();
                let to = AgentDidRef::parse(&to).unwrap_or_else(|e| fatal(&e.to_string()));
                let payload = parse_payload(payload);
                let mut msg = AgentMessage::new(
                    AgentDidRef::for_address(&wallet.address).to_string(),
                    to.to_string(),
                    message_type,
                    payload,
                );
                let tx_hash = client.agents().send_message(&wallet, &mut msg).await?;
                Ok(json!({ "tx_hash": tx_hash, "nonce": msg.nonce }))
            }

            AgentAction::Receipt {
                key,
                model_hash,
                input_hash,
                output_hash,
                prover_sig,
            } => {
                let wallet = key.wallet();
                let mut receipt = InferenceReceipt::new(
                    AgentDidRef::for_address(&wallet.address).to_string(),
                    model_hash,
                    input_hash,
                    output_hash,
                );
                receipt.prover_sig = prover_sig;
                let tx_hash = client
                    .agents()
                    .submit_inference_receipt(&wallet, &receipt)
                    .await?;
                Ok(json!({ "tx_hash": tx_hash, "timestamp": receipt.timestamp }))
            }
        },
    }
}

/// Parse `--meta key=value` entries. Later keys overwrite earlier ones.
fn parse_metadata(entries: &[String]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|raw| match raw.split_once('=') {
            Some((k, v)) if !k.is_empty() => (k.to_string(), v.to_string()),
            _ => fatal(&format!("invalid --meta {raw:?}: expected format <key>=<value>")),
        })
        .collect()
}

/// `--payload` text as JSON, or as a JSON string when it does not parse.
fn parse_payload(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fatal(&format!("failed to encode output: {e}")),
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("zion: {}", msg);
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn metadata_entries_split_on_first_equals() {
        let entries = vec![
            "model=claude-3-5-sonnet".to_string(),
            "note=a=b".to_string(),
            "empty=".to_string(),
        ];
        let meta = parse_metadata(&entries);
        assert_eq!(meta["model"], "claude-3-5-sonnet");
        assert_eq!(meta["note"], "a=b");
        assert_eq!(meta["empty"], "");
    }

    #[test]
    fn later_metadata_overwrites_earlier() {
        let entries = vec!["k=1".to_string(), "k=2".to_string()];
        assert_eq!(parse_metadata(&entries)["k"], "2");
    }

    #[test]
    fn payload_json_is_kept() {
        assert_eq!(
            parse_payload(r#"{"prompt": "hi"}"#.to_string()),
            json!({"prompt": "hi"})
        );
        assert_eq!(parse_payload("null".to_string()), Value::Null);
    }

    #[test]
    fn payload_plain_text_becomes_string() {
        assert_eq!(
            parse_payload("summarise block 12".to_string()),
            json!("summarise block 12")
        );
    }

    #[test]
    fn message_flags_parse() {
        let cli = Cli::try_parse_from([
            "zion",
            "agent",
            "message",
            "--private-key",
            "abcd",
            "--to",
            "did:agc:0x2",
            "-t",
            "result",
        ])
        .unwrap();
        match cli.command {
            Command::Agent {
                action: AgentAction::Message { message_type, payload, .. },
            } => {
                assert_eq!(message_type, MessageType::Result);
                assert_eq!(payload, "null");
            }
            _ => panic!("expected agent message"),
        }
    }
}
