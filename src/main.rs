use anyhow::{Context, Result};
use clap::Parser;
use pwm_rgb_strip::pca9685::{DEFAULT_ADDRESS, DEFAULT_FREQUENCY};
use pwm_rgb_strip::{
    ChannelMapping, ColorSink, ColorState, FadeRoutine, FadeSpec, Interruptible, PwmController,
    RgbDriver, RgbStrip, StdClock, WalkSpec, rpi, scale_8_to_12,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// Raised by the Ctrl-C handler, checked before every write
static STOP: AtomicBool = AtomicBool::new(false);

/// Drive an analog RGB LED strip through a PCA9685 PWM controller.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Start and end red values in fade mode, bounds in random mode
    #[arg(short, long, num_args = 2, value_names = ["FROM", "TO"], default_values_t = [0, 0])]
    red: Vec<u16>,

    /// Start and end green values in fade mode, bounds in random mode
    #[arg(short, long, num_args = 2, value_names = ["FROM", "TO"], default_values_t = [0, 0])]
    green: Vec<u16>,

    /// Start and end blue values in fade mode, bounds in random mode
    #[arg(short, long, num_args = 2, value_names = ["FROM", "TO"], default_values_t = [0, 0])]
    blue: Vec<u16>,

    /// Treat color values as 8-bit (0-255) instead of 12-bit (0-4095)
    #[arg(long)]
    eight_bit: bool,

    /// Number of steps in the fade; unused with --random
    #[arg(short, long, default_value_t = 100)]
    steps: u32,

    /// Seconds between steps or random changes, may be fractional
    #[arg(short, long, default_value_t = 0.005)]
    delay: f64,

    /// Turn the strip off when the fade or walk is over
    #[arg(short = 'o', long)]
    turn_off: bool,

    /// PWM output carrying red
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..16))]
    red_pin: u8,

    /// PWM output carrying green
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..16))]
    green_pin: u8,

    /// PWM output carrying blue
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..16))]
    blue_pin: u8,

    /// Repeat the fade this many times; unused with --random
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Fade back to the start after every pass; unused with --random
    #[arg(long)]
    reverse: bool,

    /// Wander randomly between the --red, --green and --blue bounds
    #[arg(long)]
    random: bool,

    /// Seconds to wander in random mode
    #[arg(long, default_value_t = 10)]
    time: u64,

    /// Largest change of any channel between random steps
    #[arg(long, default_value_t = 10)]
    max_random_walk: u16,

    /// Seed for the random walk, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// PWM switching frequency in Hz
    #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
    frequency: u16,

    /// I2C bus the controller sits on
    #[arg(long, default_value_t = 1)]
    i2c_bus: u8,

    /// I2C address of the controller
    #[arg(long, default_value_t = DEFAULT_ADDRESS, value_parser = parse_address)]
    address: u8,
}

impl Args {
    // (first, second) colors from the per-channel pairs
    fn endpoints(&self) -> (ColorState, ColorState) {
        let value = |v: u16| -> u16 {
            if self.eight_bit {
                scale_8_to_12(u8::try_from(v).unwrap_or(u8::MAX))
            } else {
                v
            }
        };
        (
            ColorState::new(value(self.red[0]), value(self.green[0]), value(self.blue[0])),
            ColorState::new(value(self.red[1]), value(self.green[1]), value(self.blue[1])),
        )
    }
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|err| format!("invalid i2c address {s:?}: {err}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let delay = Duration::try_from_secs_f64(args.delay)
        .with_context(|| format!("invalid delay {}", args.delay))?;

    let mapping = ChannelMapping::new(args.red_pin, args.green_pin, args.blue_pin)
        .context("invalid pin assignment")?;
    let mut pwm = rpi::open(args.i2c_bus, args.address).context("failed to open PWM controller")?;
    pwm.set_frequency(args.frequency)
        .context("failed to set PWM frequency")?;

    ctrlc::set_handler(|| STOP.store(true, Ordering::Relaxed))
        .context("failed to install Ctrl-C handler")?;

    let clock = StdClock;
    let strip = Interruptible::new(RgbStrip::new(pwm, mapping), &STOP);
    let mut driver = RgbDriver::new(strip, &clock);

    let result = run(&args, delay, &mut driver);

    // Cleared so the turn-off below gets through
    let interrupted = STOP.swap(false, Ordering::Relaxed);
    if interrupted {
        log::info!("Interrupted");
    }

    if args.turn_off {
        if let Err(err) = driver.turn_off() {
            log::error!("Failed to turn strip off: {}", err);
        }
    }

    if interrupted { Ok(()) } else { result }
}

fn run<S>(args: &Args, delay: Duration, driver: &mut RgbDriver<'_, S, StdClock>) -> Result<()>
where
    S: ColorSink,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let (first, second) = args.endpoints();
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    if args.random {
        // Bounds may be given in either order
        let spec = WalkSpec::normalized(first, second)
            .max_walk(args.max_random_walk)
            .duration(Duration::from_secs(args.time))
            .delay(delay)
            .build()?;

        log::info!("Random walk for {} s", args.time);
        let samples = driver
            .random_walk(&spec, &mut rng)
            .context("random walk aborted")?;
        log::info!("Random walk done, {} samples", samples);
        return Ok(());
    }

    let spec = FadeSpec::builder(first, second)
        .steps(args.steps)
        .delay(delay)
        .build()?;
    let routine = FadeRoutine::builder(spec)
        .repeat(args.repeat)
        .reverse(args.reverse)
        .build();

    for repetition in 0..routine.repeat() {
        log::info!("Repetition {}", repetition);
        for action in routine.pass() {
            driver
                .handle_action(action, &mut rng)
                .context("fade aborted")?;
        }
    }

    Ok(())
}
