use clap::Parser;
use datemark::batch::process_directory;
use datemark::config::WatermarkConfig;
use datemark::constants::{DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_OPACITY};
use datemark::logging::{init_subscriber, LogFormat};
use datemark::watermark::color::{parse_color, Color};
use datemark::watermark::font::FontCatalog;
use datemark::watermark::position::Anchor;
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = "\
Examples:
  datemark ./photos
  datemark ./photos --size 48 --color yellow --position top-left
  datemark ./photos -c \"#FF8800\" -o 128
  datemark ./photos -c 255,255,255 -p center

Positions:
  top-left, top-center, top-right, center,
  bottom-left, bottom-center, bottom-right

Colors:
  white, black, red, green, blue, yellow, orange, purple,
  #RRGGBB hex, or r,g,b with each channel 0-255

Output is written to <directory>/<directory name>_watermark/";

/// Datemark - stamp each photo's capture date onto the image
#[derive(Parser, Debug)]
#[command(name = "datemark")]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// Directory containing the photos to watermark
    directory: PathBuf,

    /// Font size in pixels (1-200)
    #[arg(short, long, default_value_t = DEFAULT_FONT_SIZE, allow_negative_numbers = true)]
    size: i64,

    /// Text color: a name, #RRGGBB, or r,g,b
    #[arg(short, long, default_value = DEFAULT_COLOR)]
    color: String,

    /// Where to place the date
    #[arg(short, long, value_enum, default_value_t = Anchor::BottomRight)]
    position: Anchor,

    /// Text opacity (0-255)
    #[arg(short, long, default_value_t = DEFAULT_OPACITY, allow_negative_numbers = true)]
    opacity: i64,

    /// Font file to try before the system defaults (repeatable)
    #[arg(long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    // Parse command-line arguments; usage errors exit 1, help/version exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging subsystem
    if let Err(e) = init_subscriber(args.log_format) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    // Validate ranges before parsing the color
    let config = match WatermarkConfig::new(args.size, Color::white(), args.position, args.opacity) {
        Ok(config) => WatermarkConfig {
            color: parse_color(&args.color),
            ..config
        },
        Err(e) => {
            tracing::error!(error = %e, "Invalid arguments");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        directory = %args.directory.display(),
        font_size = config.font_size,
        color = %config.color,
        position = %config.position,
        opacity = config.opacity,
        "Starting date watermark run"
    );

    let face = FontCatalog::platform_default()
        .with_preferred(args.fonts)
        .resolve();
    tracing::info!(font = %face.describe(), "Font selected");

    process_directory(&args.directory, &config, &face);

    ExitCode::SUCCESS
}
