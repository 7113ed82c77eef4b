use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use arbiter::config::ArbiterConfig;
use arbiter::msg::DesireSet;
use arbiter::Node;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "arbiter.json".to_string());

    // Fail-fast: a node without an intact strategy catalog never
    // subscribes and never publishes.
    let config = match ArbiterConfig::from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("cannot load strategy configuration from {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let (node, mut intentions) = Node::with_default_engine(config);
    let (tx, rx) = mpsc::channel(16);

    // Inbound transport: one DesireSet per JSON line on stdin. The node
    // loop ends when stdin closes and the sender drops.
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<DesireSet>(&line) {
                Ok(set) => {
                    if tx.send(set).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!("ignoring malformed desire set: {}", e),
            }
        }
    });

    // Outbound transport: each newly latched intention as a JSON line.
    tokio::spawn(async move {
        while intentions.changed().await.is_ok() {
            let latched = intentions.borrow_and_update().clone();
            if let Some(intention) = latched {
                match serde_json::to_string(&intention) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::warn!("cannot serialize intention: {}", e),
                }
            }
        }
    });

    node.run(rx).await;
    Ok(())
}
