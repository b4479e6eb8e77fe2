// Mood booth host.
// `still`: warp a single image from disk and write the capture as PNG.
// `live` (feature "live"): webcam in, warped video out, with these keys:
// • 1..6 pick a mood (happy, sad, angry, surprised, cool, love); 0 clears it.
// • G selects the ghost split (no mood uses it).
// • A toggles animation, B toggles the beautify pre-pass.
// • SPACE saves a capture of the current frame once a mood is picked. ESC quits.

#[cfg(feature = "live")]
mod camera;
#[cfg(feature = "live")]
mod draw;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mood_booth::{
    Beautify, EffectKind, EffectRegistry, Mood, PixelBuffer, SamplingStep, apply_tint, resample,
};

#[derive(Parser, Debug)]
#[command(name = "mood-booth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Warp a still image and save the result as PNG.
    Still(StillArgs),
    /// Run the booth on a live camera (requires the `live` feature).
    #[cfg(feature = "live")]
    Live(LiveArgs),
    /// List effect and mood identifiers.
    List,
}

#[derive(Parser, Debug)]
struct StillArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Mood preset; sets the effect and tints the capture.
    #[arg(long)]
    mood: Option<Mood>,

    /// Effect id; overrides the mood's effect.
    #[arg(long)]
    effect: Option<String>,

    /// Override the effect strength.
    #[arg(long)]
    strength: Option<f64>,

    /// Override the wave frequency.
    #[arg(long)]
    frequency: Option<f64>,

    /// Sampling step (1..=3).
    #[arg(long, default_value_t = 1)]
    step: u8,

    /// Animation clock reading in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Run the brightness / skin-tone pre-pass.
    #[arg(long)]
    beautify: bool,
}

#[cfg(feature = "live")]
#[derive(Parser, Debug)]
struct LiveArgs {
    /// TOML config file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera index (0 = default webcam).
    #[arg(long, default_value_t = 0)]
    camera: u32,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frame-rate cap.
    #[arg(long)]
    fps: Option<u32>,

    /// Sampling step (1..=3).
    #[arg(long)]
    step: Option<u8>,

    /// Directory for captures.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => run_still(args),
        #[cfg(feature = "live")]
        Command::Live(args) => run_live(args),
        Command::List => {
            println!("effects: {}", EffectRegistry.ids().collect::<Vec<_>>().join(", "));
            let moods: Vec<String> = Mood::ALL
                .iter()
                .map(|m| format!("{} {} ({})", m.id(), m.emoji(), m.effect().kind))
                .collect();
            println!("moods:   {}", moods.join(", "));
            Ok(())
        }
    }
}

/* ------------------------------ still mode ------------------------------ */

fn run_still(args: StillArgs) -> anyhow::Result<()> {
    let img = image::open(&args.in_path)
        .with_context(|| format!("open {}", args.in_path.display()))?
        .to_rgba8();
    let mut frame = PixelBuffer::from(img);
    tracing::info!(width = frame.width(), height = frame.height(), "loaded still");

    let mut effect = match (&args.effect, args.mood) {
        (Some(id), _) => EffectRegistry.resolve(id)?,
        (None, Some(mood)) => mood.effect(),
        (None, None) => EffectKind::None.descriptor(),
    };
    if let Some(s) = args.strength {
        effect = effect.with_strength(s);
    }
    if let Some(f) = args.frequency {
        effect = effect.with_frequency(f);
    }
    let step = SamplingStep::new(args.step)?;

    // Same order as a driver tick: pre-pass, then warp (or straight copy), then tint.
    if args.beautify {
        Beautify::new().apply_in_place(&mut frame);
    }
    let mut still = if effect.is_identity() {
        frame
    } else {
        resample(&frame, &effect, step, args.time)
    };
    if let Some(mood) = args.mood {
        apply_tint(&mut still, mood.tint());
    }

    still
        .to_rgba_image()
        .save(&args.out)
        .with_context(|| format!("write {}", args.out.display()))?;
    tracing::info!(out = %args.out.display(), effect = %effect.kind, "saved capture");
    Ok(())
}

/* ------------------------------ live mode ------------------------------ */

#[cfg(feature = "live")]
fn run_live(args: LiveArgs) -> anyhow::Result<()> {
    use camera::CameraCapture;
    use draw::Drawer;
    use minifb::Key;
    use mood_booth::{BoothConfig, FrameDriver, TickOutcome};
    use std::time::{Duration, Instant};

    let mut config = match &args.config {
        Some(path) => BoothConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => BoothConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(step) = args.step {
        config.sampling_step = Some(step);
    }
    config.validate()?;

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let cam = CameraCapture::new(args.camera, args.width, args.height, config.fps)?;
    let (w, h) = cam.resolution();
    let drawer = Drawer::new("Mood Booth", w as usize, h as usize)?;
    let mut driver = FrameDriver::new(&config, cam, drawer)?;

    let mut mood: Option<Mood> = None;
    let mut captures = 0u32;

    /* --- HUD / FPS --- */
    let start = Instant::now();
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while driver.sink().is_open() && !driver.sink().esc_pressed() {
        // 1) Inputs: changes land on the next active tick.
        for key in driver.sink().pressed_keys() {
            let picked = match key {
                Key::Key0 => Some(None),
                Key::Key1 => Some(Some(Mood::Happy)),
                Key::Key2 => Some(Some(Mood::Sad)),
                Key::Key3 => Some(Some(Mood::Angry)),
                Key::Key4 => Some(Some(Mood::Surprised)),
                Key::Key5 => Some(Some(Mood::Cool)),
                Key::Key6 => Some(Some(Mood::Love)),
                _ => None,
            };
            if let Some(m) = picked {
                mood = m;
                driver.set_mood(mood);
                continue;
            }
            match key {
                Key::G => {
                    mood = None;
                    driver.set_effect("ghost");
                }
                Key::A => {
                    let on = !driver.controls().animation;
                    driver.set_animation(on);
                }
                Key::B => {
                    let on = !driver.controls().prepass;
                    driver.set_prepass(on);
                }
                Key::Space => {
                    // captures are tied to a mood; without one there is nothing to tint or name
                    let Some(m) = mood else {
                        tracing::info!("pick a mood (1..6) before capturing");
                        continue;
                    };
                    if let Some(still) = driver.capture(m) {
                        captures += 1;
                        let path = args.out_dir.join(m.file_name(captures));
                        still
                            .to_rgba_image()
                            .save(&path)
                            .with_context(|| format!("write {}", path.display()))?;
                        tracing::info!(path = %path.display(), "saved capture");
                    }
                }
                _ => {}
            }
        }

        // 2) HUD line for the next present.
        let c = driver.controls();
        let mut hud = format!("{}", c.effect.kind);
        if c.animation && c.effect.kind.is_animated() {
            hud.push_str(" | ANIM");
        }
        if c.prepass {
            hud.push_str(" | BEAUTY");
        }
        hud.push_str(" | ");
        hud.push_str(&fps_text);
        driver.sink_mut().set_hud(hud);

        // 3) One tick at the host refresh.
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        match driver.tick(now_ms)? {
            TickOutcome::Presented { .. } => frames_this_second += 1,
            TickOutcome::Throttled => driver.sink_mut().poll(),
        }

        // 4) FPS counter (terminal + HUD once per second)
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            tracing::debug!(fps, "frame rate");
            fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    let stats = driver.stats();
    tracing::info!(
        frames = stats.active_ticks,
        throttled = stats.throttled_ticks,
        reallocations = stats.reallocations,
        "booth closed"
    );
    Ok(())
}
