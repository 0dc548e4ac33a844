//! The HMI node. Reads the UI's socket requests and stage events as JSON lines from stdin, and
//! writes responses and gestures as JSON lines to stdout.
use std::{env, path::Path, sync::Arc};

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc::{self, UnboundedSender},
};

use tr_hmi_bus::{Bus, HmiNode};
use tr_hmi_socket::Router;
use tr_hmi_util::CoalescingReceiver;

mod config;
mod server;

use config::Config;
use server::{Inbound, Server};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };

    let bus = Arc::new(Bus::new());
    let node = HmiNode::new(bus, &config.topics, config.settings.speed_limits())?;
    let router = Router::new(Arc::new(node), config.settings.map.clone());
    let mut server = Server::new(router, config.gesture.transformable_config());

    let (sender, receiver) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_lines(sender));
    let mut inbound = CoalescingReceiver::new(receiver);
    let mut stdout = io::stdout();

    info!("HMI node ready");

    // Ends when stdin is closed.
    while let Ok(message) = inbound.recv().await {
        for outbound in server.handle(message) {
            let mut line = serde_json::to_string(&outbound)?;
            line.push('\n');
            stdout.write_all(line.as_bytes()).await?;
        }
        stdout.flush().await?;
    }

    reader.await.context("Reader task")?
}

async fn read_lines(sender: UnboundedSender<Inbound>) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Inbound>(line) {
            Ok(message) => {
                if sender.send(message).is_err() {
                    break;
                }
            }
            Err(e) => warn!("Dropping malformed line: {e}"),
        }
    }
    Ok(())
}
