use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stream_codecs::{CodecConfig, CodecRegistry, HostProbe};

/// Log level for the application
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Verbose,
    Debug,
    Trace,
}

/// codec-probe command line arguments
#[derive(Parser, Debug)]
#[command(name = "codec-probe")]
#[command(version, about = "Inspect audio codecs and negotiate against this host", long_about = None)]
struct CliArgs {
    /// MIME types advertised by a renderer (repeatable); lists the catalog when omitted
    #[arg(short = 'm', long = "mime", value_name = "MIME")]
    mime_types: Vec<String>,

    /// Codec configuration file (JSON)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bit rate in kbit/s (overrides config)
    #[arg(short = 'b', long, value_name = "KBPS")]
    bit_rate: Option<u32>,

    /// Print descriptors as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, verbose, debug, trace)
    #[arg(short = 'l', long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,

    /// Increase verbosity (-v for verbose, -vv for debug, -vvv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    init_logging(args.log_level, args.verbose);

    tracing::info!("Starting codec-probe v{}", env!("CARGO_PKG_VERSION"));

    let registry = CodecRegistry::global();
    let config = match &args.config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };
    config.apply(registry)?;

    let bit_rate = args.bit_rate.or(config.bit_rate);
    let probe = HostProbe::new();

    if args.mime_types.is_empty() {
        for entry in registry.entries() {
            let mut codec = entry.create(None);
            if let Some(bit_rate) = bit_rate {
                codec = codec.with_bit_rate(bit_rate);
            }
            if args.json {
                println!("{}", serde_json::to_string(&codec)?);
            } else {
                println!("{}", codec.detailed_with(&probe));
            }
        }
        return Ok(());
    }

    let codecs = registry.negotiate(&args.mime_types, &probe, bit_rate);
    if codecs.is_empty() {
        tracing::warn!("No codec can be produced for the advertised MIME types");
        return Ok(());
    }

    for codec in &codecs {
        if args.json {
            println!("{}", serde_json::to_string(codec)?);
            continue;
        }
        println!("{}", codec.detailed_with(&probe));
        if let Some(encoder) = codec.encoder_with(&probe) {
            println!("    $ {}", encoder.command_line());
        }
    }

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(level: LogLevel, verbose_count: u8) {
    // Verbose count overrides log level
    let effective_level = match verbose_count {
        0 => level,
        1 => LogLevel::Verbose,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    let filter = match effective_level {
        LogLevel::Error => "stream_codecs=error,codec_probe=error",
        LogLevel::Warn => "stream_codecs=warn,codec_probe=warn",
        LogLevel::Info => "stream_codecs=info,codec_probe=info",
        LogLevel::Verbose => "stream_codecs=debug,codec_probe=info",
        LogLevel::Debug => "stream_codecs=debug,codec_probe=debug",
        LogLevel::Trace => "stream_codecs=trace,codec_probe=trace",
    };

    // Environment variable takes highest priority
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
    {
        eprintln!("failed to initialize tracing: {}", err);
    }
}
