use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use classic_snake::game::{Direction, GameConfig};
use classic_snake::logging;
use classic_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "classic_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in pixels (multiple of the cell size)
    #[arg(long)]
    field_width: Option<u32>,

    /// Field height in pixels (multiple of the cell size)
    #[arg(long)]
    field_height: Option<u32>,

    /// Side of one grid cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Snake head start x in pixels
    #[arg(long)]
    start_x: Option<u32>,

    /// Snake head start y in pixels
    #[arg(long)]
    start_y: Option<u32>,

    /// Starting direction: up, right, down or left
    #[arg(long, value_parser = parse_direction)]
    direction: Option<Direction>,

    /// Starting snake length
    #[arg(long)]
    length: Option<usize>,

    /// Game ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.field_width {
            config.field_width = width;
        }
        if let Some(height) = self.field_height {
            config.field_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(x) = self.start_x {
            config.start_head_x = x;
        }
        if let Some(y) = self.start_y {
            config.start_head_y = y;
        }
        if let Some(direction) = self.direction {
            config.start_direction = direction;
        }
        if let Some(length) = self.length {
            config.start_length = length;
        }
        if let Some(fps) = self.fps {
            config.frames_per_second = fps;
        }
        if self.mute {
            config.sound = false;
        }

        Ok(config)
    }
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    match value.to_ascii_lowercase().as_str() {
        "up" => Ok(Direction::Up),
        "right" => Ok(Direction::Right),
        "down" => Ok(Direction::Down),
        "left" => Ok(Direction::Left),
        other => Err(format!("unknown direction '{other}'")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    tracing::info!(?config, "loaded configuration");

    // Validation happens here, before the terminal is touched
    let human_mode = HumanMode::new(&config).inspect_err(|err| {
        tracing::error!(%err, "invalid configuration");
    })?;
    human_mode.run().await?;

    Ok(())
}
