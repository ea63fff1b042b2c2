//! Pricetone CLI — real-time player that sonifies a price series.

mod source;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};
use pricetone_engine::{Layout, PlaybackConfig, PlaybackEngine, StreamStatus};

use crate::source::SourceKind;

/// Number of output channels the engine renders.
const ENGINE_CHANNELS: u16 = 2;

#[derive(Parser, Debug)]
#[command(name = "pricetone", about = "Listen to a price series as a moving tone")]
struct Args {
    /// List output devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Output device name (default device if omitted)
    #[arg(long, value_name = "NAME")]
    device: Option<String>,

    /// TOML file with playback settings; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Spatial layout: linear, full-circle or angular:<degrees>
    #[arg(short, long)]
    layout: Option<Layout>,

    /// Seconds each data point sounds for
    #[arg(short, long, value_name = "SECS")]
    step: Option<f32>,

    /// Frames per audio callback
    #[arg(long)]
    frames: Option<u32>,

    /// Requested sample rate; the device's nearest supported rate is used
    #[arg(long, value_name = "HZ")]
    sample_rate: Option<u32>,

    /// Demo series to play
    #[arg(long, value_enum, default_value_t = SourceKind::RandomWalk)]
    source: SourceKind,

    /// Number of data points to generate
    #[arg(short = 'n', long, default_value_t = 32)]
    points: usize,

    /// Seed for the random-walk series
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Output gain applied after the engine (0..1)
    #[arg(short, long, default_value_t = 1.0)]
    gain: f32,

    /// Stop after this many seconds even if the series has not finished
    #[arg(long, value_name = "SECS")]
    duration: Option<u64>,
}

fn load_config(args: &Args) -> Result<PlaybackConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_config_file(path)?,
        None => PlaybackConfig::default(),
    };
    if let Some(layout) = args.layout { cfg.layout = layout; }
    if let Some(step) = args.step { cfg.step_duration_secs = step; }
    if let Some(frames) = args.frames { cfg.frames_per_invocation = frames; }
    if let Some(sr) = args.sample_rate { cfg.sample_rate = sr; }
    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<PlaybackConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

fn list_output_devices() -> Result<()> {
    let host = cpal::default_host();
    println!("Available output devices:");
    for dev in host.output_devices()? {
        println!("- {}", dev.name()?);
    }
    Ok(())
}

fn pick_device(name: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    if let Some(name) = name {
        for d in host.output_devices()? {
            if d.name()? == name { return Ok(d); }
        }
        bail!("requested device not found: {name}");
    }
    host.default_output_device()
        .ok_or_else(|| anyhow!("no default output device"))
}

fn choose_config(
    device: &cpal::Device,
    req_sr: u32,
    req_ch: u16,
) -> Result<cpal::SupportedStreamConfig> {
    // Pick the SupportedStreamConfigRange closest to the request.
    let mut best: Option<(u64, cpal::SupportedStreamConfigRange)> = None;
    for range in device.supported_output_configs()? {
        let ch     = range.channels();
        let sr_min = range.min_sample_rate().0;
        let sr_max = range.max_sample_rate().0;

        let ch_pen = u64::from(ch.abs_diff(req_ch));
        let sr_pen = if (sr_min..=sr_max).contains(&req_sr) {
            0
        } else {
            u64::from(sr_min.abs_diff(req_sr).min(sr_max.abs_diff(req_sr)))
        };

        let score = sr_pen.saturating_mul(1000) + ch_pen;
        if best.as_ref().map_or(true, |(s, _)| score < *s) {
            best = Some((score, range));
        }
    }

    let (_, range) = match best {
        Some(b) => b,
        None => return Ok(device.default_output_config()?),
    };

    let lo = range.min_sample_rate().0;
    let hi = range.max_sample_rate().0;
    Ok(range.with_sample_rate(cpal::SampleRate(req_sr.clamp(lo, hi))))
}

/// Write one engine frame into a device frame with any channel count.
#[inline]
fn write_frame<T>(frame: &mut [T], left: f32, right: f32)
where
    T: cpal::Sample + cpal::FromSample<f32>,
{
    match frame {
        [] => {}
        [mono] => *mono = T::from_sample((0.5 * (left + right)).clamp(-1.0, 1.0)),
        [l, r, rest @ ..] => {
            *l = T::from_sample(left.clamp(-1.0, 1.0));
            *r = T::from_sample(right.clamp(-1.0, 1.0));
            for ch in rest {
                *ch = T::EQUILIBRIUM;
            }
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    cfg: &cpal::StreamConfig,
    mut engine: PlaybackEngine,
    gain: f32,
    done: Arc<AtomicBool>,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::FromSample<f32> + cpal::SizedSample + Send + 'static,
{
    let channels = usize::from(cfg.channels).max(1);
    let frames = engine.frames_per_invocation() as usize;

    // Sized once here; the callback only slices it.
    let mut scratch = vec![0.0f32; 2 * frames];

    let stream = device.build_output_stream(
        cfg,
        move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
            for block in output.chunks_mut(channels * frames) {
                let n = block.len() / channels;
                let stereo = &mut scratch[..2 * n];
                if engine.render(stereo) == StreamStatus::Complete {
                    done.store(true, Ordering::Release);
                }
                for (frame, lr) in block.chunks_mut(channels).zip(stereo.chunks_exact(2)) {
                    write_frame(frame, lr[0] * gain, lr[1] * gain);
                }
            }
        },
        |e| error!("stream error: {e}"),
        None,
    )?;

    Ok(stream)
}

fn open_stream(
    device: &cpal::Device,
    sup_cfg: &cpal::SupportedStreamConfig,
    engine: PlaybackEngine,
    gain: f32,
    done: Arc<AtomicBool>,
) -> Result<cpal::Stream> {
    let mut cfg = sup_cfg.config();
    cfg.buffer_size = cpal::BufferSize::Fixed(engine.frames_per_invocation());

    let build = |cfg: &cpal::StreamConfig, engine: PlaybackEngine, done: Arc<AtomicBool>| {
        match sup_cfg.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(device, cfg, engine, gain, done),
            cpal::SampleFormat::I16 => build_stream::<i16>(device, cfg, engine, gain, done),
            cpal::SampleFormat::U16 => build_stream::<u16>(device, cfg, engine, gain, done),
            other => bail!("unsupported device sample format: {other:?}"),
        }
    };

    match build(&cfg, engine.clone(), Arc::clone(&done)) {
        Ok(stream) => Ok(stream),
        Err(e) => {
            warn!("fixed buffer of {} frames rejected ({e}); using device default", engine.frames_per_invocation());
            cfg.buffer_size = cpal::BufferSize::Default;
            build(&cfg, engine, done)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list_devices {
        return list_output_devices();
    }

    let mut config = load_config(&args)?;

    let device  = pick_device(args.device.as_deref())?;
    let sup_cfg = choose_config(&device, config.sample_rate, ENGINE_CHANNELS)
        .context("choosing output stream config")?;
    if sup_cfg.sample_rate().0 != config.sample_rate {
        warn!("device does not support {} Hz; using {} Hz", config.sample_rate, sup_cfg.sample_rate().0);
        config.sample_rate = sup_cfg.sample_rate().0;
    }

    let values = source::generate(args.source, args.points, config.price_domain, args.seed);
    let engine = PlaybackEngine::from_values(&values, &config).context("invalid playback config")?;
    let playback_secs = engine.duration_secs();
    let latency = Duration::from_secs_f64(2.0 * f64::from(config.frames_per_invocation) / f64::from(config.sample_rate));

    info!("device: {}", device.name()?);
    info!("stream: {} ch, {} Hz, {:?}", sup_cfg.channels(), config.sample_rate, sup_cfg.sample_format());
    info!("series: {:?} x{} (seed {}), layout {}, gain {:.2}", args.source, values.len(), args.seed, config.layout, args.gain);

    let done = Arc::new(AtomicBool::new(false));
    let stream = open_stream(&device, &sup_cfg, engine, args.gain, Arc::clone(&done))?;
    stream.play()?;
    info!("playing ~{playback_secs:.1}s…");

    let deadline = args.duration.map(|d| Instant::now() + Duration::from_secs(d));
    while !done.load(Ordering::Acquire) {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            info!("duration limit reached; stopping");
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    // Let the last buffers reach the speakers before the stream drops.
    std::thread::sleep(latency);
    info!("playback complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_maps_onto_device_channels() {
        let mut quad = [9.0f32; 4];
        write_frame(&mut quad, 0.25, -0.5);
        assert_eq!(quad, [0.25, -0.5, 0.0, 0.0]);

        let mut mono = [9.0f32; 1];
        write_frame(&mut mono, 0.25, -0.75);
        assert_eq!(mono, [-0.25]);

        let mut hot = [0.0f32; 2];
        write_frame(&mut hot, 3.0, -3.0);
        assert_eq!(hot, [1.0, -1.0]);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "pricetone", "--layout", "angular:90", "--step", "0.5", "--frames", "512",
        ]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.layout, Layout::Angular { fov_degrees: 90.0 });
        assert_eq!(cfg.step_duration_secs, 0.5);
        assert_eq!(cfg.frames_per_invocation, 512);
        assert_eq!(cfg.sample_rate, PlaybackConfig::default().sample_rate);
    }

    #[test]
    fn unknown_layout_is_a_usage_error() {
        assert!(Args::try_parse_from(["pricetone", "--layout", "spiral"]).is_err());
    }
}
