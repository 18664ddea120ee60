//! Skeleton sender: reads body frames as JSON lines (one frame per line,
//! `null` for a frame with no data) and streams every tracked body to the
//! configured OSC destination.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;

use skeleton_osc::config::Config;
use skeleton_osc::mailbox::{mailbox, FrameEvent, FrameSender, Offer, StopSignal};
use skeleton_osc::osc::UdpTransport;
use skeleton_osc::pipeline::{self, Pipeline, ProcessedFrame};
use skeleton_osc::skeleton::{bone_style, Body, BoneStyle, BONES};

const CONFIG_PATH: &str = "skeleton_osc.toml";

#[derive(Parser, Debug)]
#[command(name = "skeleton_sender", version, about = "Stream tracked skeletons as OSC over UDP")]
struct Args {
    /// Config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// JSON-lines frame source, `-` for stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Override destination host
    #[arg(long)]
    host: Option<String>,

    /// Override destination port
    #[arg(long)]
    port: Option<u32>,

    /// Replay rate in frames per second (0 = as fast as read)
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(host) = args.host {
        config.osc.host = host;
    }
    if let Some(port) = args.port {
        config.osc.port = port;
    }
    config.validate().context("invalid configuration")?;

    let addresses = config.address_map()?;
    let transport = UdpTransport::new(&config.osc.host, config.port()?)
        .context("failed to open OSC transport")?;

    log::info!("skeleton_sender {}", env!("CARGO_PKG_VERSION"));
    log::info!("OSC target: {}", transport.target());
    log::info!(
        "joints: {}",
        addresses.joints().map(|j| j.name()).collect::<Vec<_>>().join(", ")
    );
    log::info!("z floor: {}", config.sanitize.z_floor);

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        handler_stop.raise();
    })
    .expect("error setting Ctrl-C handler");

    let reader: Box<dyn BufRead + Send> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input).with_context(|| format!("failed to open {}", args.input))?;
        Box::new(BufReader::new(file))
    };

    let (tx, rx) = mailbox();
    let source_stop = stop.clone();
    let interval = frame_interval(args.fps)?;
    let source = thread::spawn(move || replay_frames(reader, tx, interval, &source_stop));

    let sender = Pipeline::new(transport, addresses, config.sanitize.z_floor, stop.clone())
        .with_joint_records(config.log.joint_records);
    let stats = pipeline::run(sender, rx, &stop, log_frame);

    log::info!(
        "done: {} frames, {} unavailable, {} datagrams, {} send failures",
        stats.frames,
        stats.unavailable,
        stats.datagrams,
        stats.failures
    );

    // On Ctrl-C the source may be blocked on stdin; leave it behind.
    if !stop.is_raised() {
        if let Ok(dropped) = source.join() {
            log::info!("{} frames dropped at mailbox", dropped);
        }
    }
    Ok(())
}

/// Replay pacing. `0` disables pacing; anything else must be a positive,
/// finite rate whose interval fits in a `Duration`.
fn frame_interval(fps: f64) -> Result<Option<Duration>> {
    if fps == 0.0 {
        return Ok(None);
    }
    if !(fps > 0.0) {
        bail!("--fps must be 0 or positive, got {}", fps);
    }
    let interval = Duration::try_from_secs_f64(1.0 / fps)
        .with_context(|| format!("--fps {} gives an unusable frame interval", fps))?;
    Ok(Some(interval))
}

/// Display-side view of each frame: bone visibility, hand states and
/// clipped edges per tracked body, at debug level.
fn log_frame(frame: &ProcessedFrame) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for body in &frame.bodies {
        log::debug!("{}", describe_body(body));
    }
}

fn describe_body(body: &Body) -> String {
    let (mut tracked, mut inferred) = (0, 0);
    for (start, end) in BONES {
        match bone_style(body, start, end) {
            BoneStyle::Tracked => tracked += 1,
            BoneStyle::Inferred => inferred += 1,
            BoneStyle::Hidden => {}
        }
    }
    let edges = &body.clipped_edges;
    format!(
        "body {}: bones {}/{} tracked, {} inferred; hands L={:?} R={:?}; clipped{}{}{}{}{}",
        body.slot_index,
        tracked,
        BONES.len(),
        inferred,
        body.hand_left_state,
        body.hand_right_state,
        if edges.any() { "" } else { " none" },
        if edges.top { " top" } else { "" },
        if edges.bottom { " bottom" } else { "" },
        if edges.left { " left" } else { "" },
        if edges.right { " right" } else { "" },
    )
}

/// Sensor stand-in. Pushes one frame per interval; returns the number of
/// frames dropped because the pipeline was still busy.
fn replay_frames(
    reader: Box<dyn BufRead + Send>,
    mut tx: FrameSender,
    interval: Option<Duration>,
    stop: &StopSignal,
) -> u64 {
    for (line_no, line) in reader.lines().enumerate() {
        if stop.is_raised() {
            break;
        }
        let started = Instant::now();
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("input read error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event: FrameEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("line {}: malformed frame: {}", line_no + 1, e);
                continue;
            }
        };
        if tx.offer(event) == Offer::Closed {
            break;
        }

        if let Some(interval) = interval {
            if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
    tx.dropped()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skeleton_osc::skeleton::{HandState, JointType, TrackingState};

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(0.0).unwrap(), None);
        assert_eq!(frame_interval(30.0).unwrap(), Some(Duration::from_secs_f64(1.0 / 30.0)));
        assert_eq!(frame_interval(f64::INFINITY).unwrap(), Some(Duration::ZERO));
    }

    #[test]
    fn test_frame_interval_rejects_unusable_rates() {
        assert!(frame_interval(1e-20).is_err());
        assert!(frame_interval(-5.0).is_err());
        assert!(frame_interval(f64::NAN).is_err());
    }

    #[test]
    fn test_describe_body() {
        let mut body = Body::empty(3);
        body.is_tracked = true;
        body.hand_right_state = HandState::Closed;
        body.clipped_edges.bottom = true;
        body.joints[JointType::Head as usize].tracking_state = TrackingState::Tracked;
        body.joints[JointType::Neck as usize].tracking_state = TrackingState::Tracked;
        body.joints[JointType::SpineShoulder as usize].tracking_state = TrackingState::Inferred;

        assert_eq!(
            describe_body(&body),
            "body 3: bones 1/24 tracked, 1 inferred; hands L=Unknown R=Closed; clipped bottom"
        );
    }

    #[test]
    fn test_describe_body_without_clipping() {
        let body = Body::empty(0);
        assert!(describe_body(&body).ends_with("clipped none"));
    }
}
