mod lookup;
mod maps;
mod mux;
mod video;

use clap::{Args, Parser, Subcommand};
use cwtrainer_core::spell::append_spelled_word;
use cwtrainer_core::{
    CallsignRecord, MorseConfig, MorseEncoder, Session, SpellCorpus, VideoTrack, WavAudioSink,
    CALLSIGN_GAP_DITS, DEFAULT_FPS, DEFAULT_SAMPLE_RATE, DEFAULT_TONE_HZ, DEFAULT_WPM,
    FRAME_HEIGHT, FRAME_WIDTH, SPELL_GAP_DITS,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cwtrainer")]
#[command(about = "Morse call-sign recognition trainer: CW audio with spelled-out answers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render random call signs as CW + spelled-out audio, optionally with
    /// a country-map video track
    Generate(GenerateArgs),

    /// Render random single symbols as CW + spoken clip, for copy practice
    Compose(ComposeArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Keying speed in words per minute (PARIS)
    #[arg(long, default_value_t = DEFAULT_WPM)]
    wpm: u32,

    /// Number of call signs to render
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// Call-sign corpus (MASTER.SCP format)
    #[arg(long, default_value = "MASTER.SCP")]
    callsigns: PathBuf,

    /// Prefix,country CSV for country resolution
    #[arg(long)]
    prefixes: Option<PathBuf>,

    /// Directory of spelled-word clips (corpus/<rate>/<symbol>.wav)
    #[arg(long, default_value = "corpus")]
    corpus: PathBuf,

    /// Output WAV file
    #[arg(long, default_value = "audio.wav")]
    audio: PathBuf,

    /// Output Y4M video file (enables the video track)
    #[arg(long)]
    video: Option<PathBuf>,

    /// Directory of pre-rendered map-<slug>.png bitmaps
    #[arg(long, default_value = "maps")]
    maps: PathBuf,

    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    #[arg(long, default_value_t = DEFAULT_TONE_HZ)]
    tone_hz: f64,

    /// Fixed RNG seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Mux audio+video into this container via ffmpeg (needs --video)
    #[arg(long)]
    mux: Option<PathBuf>,
}

#[derive(Args)]
struct ComposeArgs {
    #[arg(long, default_value_t = 100)]
    count: usize,

    #[arg(long, default_value = "corpus")]
    corpus: PathBuf,

    #[arg(long, default_value = "output.wav")]
    audio: PathBuf,

    #[arg(long, default_value_t = DEFAULT_WPM)]
    wpm: u32,

    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    #[arg(long, default_value_t = DEFAULT_TONE_HZ)]
    tone_hz: f64,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate_command(args),
        Commands::Compose(args) => compose_command(args),
    }
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn generate_command(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let callsigns = lookup::load_callsigns(&args.callsigns)?;
    if callsigns.is_empty() {
        return Err(format!("no callsigns in {}", args.callsigns.display()).into());
    }
    let prefixes = match &args.prefixes {
        Some(path) => Some(lookup::PrefixTable::load(path)?),
        None => None,
    };

    let mut rng = rng_from_seed(args.seed);
    let records: Vec<CallsignRecord> = (0..args.count)
        .map(|_| {
            let callsign = callsigns[rng.gen_range(0..callsigns.len())].clone();
            let country = prefixes.as_ref().and_then(|table| table.resolve(&callsign));
            CallsignRecord::new(callsign, country)
        })
        .collect();

    let config = MorseConfig {
        wpm: args.wpm,
        tone_hz: args.tone_hz,
        sample_rate: args.sample_rate,
    };
    let encoder = MorseEncoder::new(WavAudioSink::create(&args.audio, args.sample_rate)?, config)?;
    let corpus = SpellCorpus::new(&args.corpus, args.sample_rate);

    match &args.video {
        Some(video_path) => {
            let sink =
                video::Y4mVideoSink::create(video_path, FRAME_WIDTH, FRAME_HEIGHT, args.fps)?;
            let track = VideoTrack::new(sink, maps::PngMapSource::new(&args.maps), args.fps);
            let mut session = Session::new(encoder, corpus, Some(track));
            session.run(records)?;
            let (encoder, track) = session.into_parts();
            info!(
                "wrote {} audio samples to {}",
                encoder.audio_clock(),
                args.audio.display()
            );
            encoder.into_sink().finalize()?;
            if let Some(track) = track {
                info!(
                    "wrote {} video frames to {}",
                    track.frames_written(),
                    video_path.display()
                );
                track.into_sink().finalize()?;
            }
        }
        None => {
            let mut session = Session::audio_only(encoder, corpus);
            session.run(records)?;
            let (encoder, _) = session.into_parts();
            info!(
                "wrote {} audio samples to {}",
                encoder.audio_clock(),
                args.audio.display()
            );
            encoder.into_sink().finalize()?;
        }
    }

    if let Some(output) = &args.mux {
        let video_path = args.video.as_ref().ok_or("--mux requires --video")?;
        mux::mux_streams(video_path, &args.audio, output)?;
    }
    Ok(())
}

const COMPOSE_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz0123456789/";

fn compose_command(args: ComposeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = MorseConfig {
        wpm: args.wpm,
        tone_hz: args.tone_hz,
        sample_rate: args.sample_rate,
    };
    let mut encoder =
        MorseEncoder::new(WavAudioSink::create(&args.audio, args.sample_rate)?, config)?;
    let corpus = SpellCorpus::new(&args.corpus, args.sample_rate);
    let symbols: Vec<char> = COMPOSE_SYMBOLS.chars().collect();

    let mut rng = rng_from_seed(args.seed);
    let dit = encoder.samples_per_dit();
    for _ in 0..args.count {
        let symbol = symbols[rng.gen_range(0..symbols.len())];
        let word = symbol.to_string();
        encoder.write_text(&word)?;
        encoder.write_silence(SPELL_GAP_DITS as usize * dit)?;
        append_spelled_word(&mut encoder, &corpus, &word)?;
        encoder.write_silence(CALLSIGN_GAP_DITS as usize * dit)?;
    }
    info!(
        "wrote {} audio samples to {}",
        encoder.audio_clock(),
        args.audio.display()
    );
    encoder.into_sink().finalize()?;
    Ok(())
}
