use mo5_sprite::color::{self, Attribute};
use mo5_sprite::{
    Actor, Position, SimulatedMemory, Sprite, Video, SCREEN_HEIGHT, SCREEN_WIDTH_BYTES,
    SCREEN_WIDTH_PIXELS,
};

use anyhow::{bail, Context, Result};
use clap::{crate_authors, crate_version, App, Arg, ArgMatches};
use minifb::{Key, Scale, Window, WindowOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::time::{Duration, Instant};

const MICROS_PER_FRAME: u128 = 1000_000 / 50;

const BALL_FORM: [u8; 32] = [
    0x07, 0xE0, // .....######.....
    0x1F, 0xF8, // ...##########...
    0x3F, 0xFC, // ..############..
    0x7F, 0xFE, // .##############.
    0x7F, 0xFE, // .##############.
    0xFF, 0xFF, // ################
    0xFF, 0xFF, // ################
    0xFF, 0xFF, // ################
    0xFF, 0xFF, // ################
    0xFF, 0xFF, // ################
    0xFF, 0xFF, // ################
    0x7F, 0xFE, // .##############.
    0x7F, 0xFE, // .##############.
    0x3F, 0xFC, // ..############..
    0x1F, 0xF8, // ...##########...
    0x07, 0xE0, // .....######.....
];
const BALL_COLOR: [u8; 32] = [Attribute::new(color::BLACK, color::ORANGE).bits(); 32];
static BALL: Sprite<'static> = Sprite::new(&BALL_FORM, &BALL_COLOR, 2, 16);

struct Config {
    sprites: usize,
    scale: Scale,
    background: u8,
    frames: u64,
    seed: Option<u64>,
}

fn parse_args(matches: &ArgMatches) -> Result<Config> {
    let sprites: usize = matches
        .value_of("sprites")
        .unwrap_or("4")
        .parse()
        .context("--sprites must be a number")?;
    let scale = match matches.value_of("scale").unwrap_or("2") {
        "1" => Scale::X1,
        "2" => Scale::X2,
        "4" => Scale::X4,
        other => bail!("Unsupported scale {}. Use 1, 2 or 4", other),
    };
    let background: u8 = matches
        .value_of("background")
        .unwrap_or("0")
        .parse()
        .context("--background must be a palette index")?;
    if background > 15 {
        bail!("Background {} is not a palette index (0-15)", background);
    }
    let frames: u64 = matches
        .value_of("frames")
        .unwrap_or("0")
        .parse()
        .context("--frames must be a number")?;
    let seed = matches
        .value_of("seed")
        .map(|s| s.parse::<u64>().context("--seed must be a number"))
        .transpose()?;

    Ok(Config {
        sprites,
        scale,
        background,
        frames,
        seed,
    })
}

fn create_window(scale: Scale) -> Result<Window> {
    let mut opts = WindowOptions::default();

    opts.scale = scale;
    let window = Window::new("MO5 sprites", SCREEN_WIDTH_PIXELS, SCREEN_HEIGHT, opts)
        .context("Failed to open window")?;

    Ok(window)
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("MO5 sprites")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Bouncing sprites on a simulated MO5 bitmap screen")
        .arg(
            Arg::with_name("sprites")
                .long("sprites")
                .short("n")
                .takes_value(true)
                .help("Number of bouncing sprites"),
        )
        .arg(
            Arg::with_name("scale")
                .long("scale")
                .takes_value(true)
                .help("Window scale: 1, 2 or 4"),
        )
        .arg(
            Arg::with_name("background")
                .long("background")
                .takes_value(true)
                .help("Background palette index (0-15)"),
        )
        .arg(
            Arg::with_name("frames")
                .long("frames")
                .takes_value(true)
                .help("Stop after this many frames, 0 runs until the window closes"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for starting positions and velocities"),
        )
        .get_matches();
    let config = parse_args(&matches)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let max_x = SCREEN_WIDTH_BYTES as i16 - BALL.width_bytes();
    let max_y = SCREEN_HEIGHT as i16 - BALL.height();
    let mut actors: Vec<(Actor, (i16, i16))> = (0..config.sprites)
        .map(|_| {
            let pos = Position::new(rng.gen_range(0, max_x + 1), rng.gen_range(0, max_y + 1));
            let velocity = (
                if rng.gen() { 1 } else { -1 },
                rng.gen_range(1, 5) * if rng.gen() { 1 } else { -1 },
            );
            (Actor::new(&BALL, pos), velocity)
        })
        .collect();

    let mut video = Video::init(
        SimulatedMemory::default(),
        Attribute::new(config.background, color::WHITE),
    );
    for (actor, _) in &actors {
        actor.draw(&mut video);
    }
    video.device_mut().reset_counters();
    log::info!("{} sprites on screen", actors.len());

    let mut window = create_window(config.scale)?;
    let mut frame: u64 = 0;
    let mut moves: usize = 0;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if config.frames != 0 && frame >= config.frames {
            break;
        }
        let frame_start = Instant::now();

        video.wait_vbl();

        for (actor, velocity) in actors.iter_mut() {
            let wanted = Position::new(actor.pos.x + velocity.0, actor.pos.y + velocity.1);
            let target = actor.clamped(wanted.x, wanted.y);
            if target.x != wanted.x {
                velocity.0 = -velocity.0;
            }
            if target.y != wanted.y {
                velocity.1 = -velocity.1;
            }

            if actor.move_to(&mut video, target.x, target.y) {
                moves += 1;
            }
        }

        window
            .update_with_buffer(&video.device().rgba_framebuffer())
            .context("Failed to present frame")?;
        frame += 1;

        let elapsed = frame_start.elapsed().as_micros();
        if elapsed < MICROS_PER_FRAME {
            std::thread::sleep(Duration::from_micros((MICROS_PER_FRAME - elapsed) as u64));
        }
    }

    let memory = video.into_inner();
    let naive = moves * 2 * 2 * (BALL.width_bytes() * BALL.height()) as usize;
    log::info!(
        "{} frames, {} moves: {} bytes written ({} for clear + draw), {} bank switches",
        frame,
        moves,
        memory.total_writes(),
        naive,
        memory.bank_switches()
    );

    Ok(())
}
