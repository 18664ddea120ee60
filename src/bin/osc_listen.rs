//! Prints every OSC packet received on a UDP port. Handy for checking what
//! a listener on the other end will see.

use std::net::UdpSocket;

use anyhow::{Context, Result};
use clap::Parser;
use rosc::{decoder, OscPacket, OscType};

#[derive(Parser, Debug)]
#[command(name = "osc_listen", about = "Dump OSC bundles received over UDP")]
struct Args {
    /// Local address to bind
    #[arg(long, default_value = "0.0.0.0:9875")]
    bind: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let socket = UdpSocket::bind(&args.bind).with_context(|| format!("failed to bind {}", args.bind))?;
    log::info!("listening on {}", socket.local_addr()?);

    let mut buf = [0u8; decoder::MTU];
    loop {
        let (n, from) = socket.recv_from(&mut buf)?;
        match decoder::decode_udp(&buf[..n]) {
            Ok((_, packet)) => {
                let mut lines = Vec::new();
                describe(&packet, 0, &mut lines);
                println!("{} ({} bytes)", from, n);
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => log::warn!("{}: undecodable packet: {:?}", from, e),
        }
    }
}

fn describe(packet: &OscPacket, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth + 1);
    match packet {
        OscPacket::Message(msg) => {
            let args: Vec<String> = msg.args.iter().map(format_arg).collect();
            lines.push(format!("{}{} {}", indent, msg.addr, args.join(" ")));
        }
        OscPacket::Bundle(bundle) => {
            lines.push(format!(
                "{}#bundle {}.{}",
                indent, bundle.timetag.seconds, bundle.timetag.fractional
            ));
            for inner in &bundle.content {
                describe(inner, depth + 1, lines);
            }
        }
    }
}

fn format_arg(arg: &OscType) -> String {
    match arg {
        OscType::String(s) => format!("{:?}", s),
        OscType::Float(f) => f.to_string(),
        OscType::Int(i) => i.to_string(),
        other => format!("{:?}", other),
    }
}
