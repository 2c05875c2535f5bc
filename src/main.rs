use clap::{Parser, ValueEnum};
use falling_catch::catalog::Catalog;
use falling_catch::clock::SystemClock;
use falling_catch::config::{GameConfig, Variant};
use falling_catch::platform::{SdlInput, SdlRenderer, load_sprite_catalog};
use falling_catch::session::{GameContext, Session};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Sprites,
    Shapes,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Sprites => Variant::Sprites,
            VariantArg::Shapes => Variant::Shapes,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "falling-catch", about = "Catch falling sprites before they hit the floor")]
struct Cli {
    #[arg(short, long, value_name = "FILE", help = "Config file (JSON)")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory of sprite images")]
    assets: Option<PathBuf>,

    #[arg(long, value_enum, help = "Which game to play")]
    variant: Option<VariantArg>,

    #[arg(long, help = "RNG seed, for reproducible spawns")]
    seed: Option<u64>,
}

/// Config file plus command-line overrides
fn resolve_config(cli: &Cli) -> Result<GameConfig, String> {
    let mut config = GameConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    if let Some(assets) = &cli.assets {
        config.assets_dir = assets.clone();
    }
    if let Some(variant) = cli.variant {
        config.variant = variant.into();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context =
        sdl2::image::init(sdl2::image::InitFlag::PNG | sdl2::image::InitFlag::JPG)?;

    log::info!(
        "Window {}x{}, variant {}",
        config.window.width,
        config.window.height,
        config.variant.as_str()
    );

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump()?;

    let (textures, catalog) = match config.variant {
        Variant::Sprites => load_sprite_catalog(&texture_creator, &config.assets_dir),
        Variant::Shapes => (Vec::new(), Catalog::shapes()),
    };
    if catalog.is_empty() {
        log::warn!("Catalog is empty; nothing will spawn");
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Seed {} ({} catalog items)", seed, catalog.len());

    let ctx = GameContext {
        clock: SystemClock::new(),
        input: SdlInput::new(event_pump),
        sink: SdlRenderer::new(canvas, textures),
        config,
    };

    let summary = Session::new(ctx, catalog, seed).run()?;
    log::info!(
        "Session over: {} rounds, last score {}, best score {}",
        summary.rounds_played,
        summary.last_score,
        summary.best_score
    );

    Ok(())
}
