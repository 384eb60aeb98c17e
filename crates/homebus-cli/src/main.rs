//! HomeBus frame inspector.
//!
//! Feeds one frame through the full codec path: decode the raw bytes,
//! re-encode them, wrap the result in the base64url transport encoding used
//! between hub and server, then unwrap and decode again to prove the trip
//! was lossless. Without arguments it runs on a captured clock-tick frame.

use anyhow::{ensure, Context};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use clap::Parser;
use homebus_packet::Frame;
use tracing::info;

/// A clock tick captured on the bus (src 819, dst 16383, timestamp body).
const SAMPLE_FRAME: [u8; 15] = [
    0x0D, 0xB3, 0x06, 0xFF, 0x7F, 0x01, 0x06, 0x06, 0x88, 0xD0, 0xAB, 0xFA, 0x93, 0x31, 0x8A,
];

#[derive(Parser, Debug)]
#[command(name = "homebus", about = "Decode and round-trip a HomeBus frame")]
struct Args {
    /// Frame to inspect, as unpadded base64url. Defaults to a built-in
    /// clock-tick capture.
    frame: Option<String>,

    /// Print the decoded frame as JSON instead of the debug rendering.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    let raw = match &args.frame {
        Some(encoded) => URL_SAFE_NO_PAD
            .decode(encoded)
            .context("frame argument must be unpadded base64url")?,
        None => SAMPLE_FRAME.to_vec(),
    };

    info!(len = raw.len(), "decoding frame");
    let frame = Frame::decode(&raw).context("frame did not decode")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        println!("{frame:#?}");
    }

    let encoded = frame.encode().context("frame did not re-encode")?;
    println!("wire bytes:  {}", hex::encode(&encoded));
    ensure!(encoded == raw, "re-encoded frame differs from input");

    // Transport round trip: hub-to-server links carry frames as unpadded
    // base64url text.
    let transport = URL_SAFE_NO_PAD.encode(&encoded);
    println!("base64url:   {transport}");

    let unwrapped = URL_SAFE_NO_PAD
        .decode(&transport)
        .context("transport encoding did not round-trip")?;
    let reparsed = Frame::decode(&unwrapped).context("unwrapped frame did not decode")?;
    ensure!(reparsed == frame, "frame changed across the transport trip");

    info!("round trip ok");
    Ok(())
}
