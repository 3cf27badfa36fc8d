use thiserror::Error;

/// A configuration the game refuses to start with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("field must be at least one cell wide and high, got {width}x{height}")]
    EmptyField { width: u32, height: u32 },

    #[error("field of {width}x{height} cells is larger than {max} cells per side")]
    FieldTooLarge { width: u32, height: u32, max: u32 },

    #[error("field {width}x{height} is not a multiple of the cell size {cell_size}")]
    FieldNotAligned {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("snake start ({x}, {y}) is not a multiple of the cell size {cell_size}")]
    StartNotAligned { x: u32, y: u32, cell_size: u32 },

    #[error("snake must start with at least one segment")]
    ZeroStartLength,

    #[error("a snake of length {length} starting at cell ({x}, {y}) does not fit in the field")]
    StartOutsideField { x: i32, y: i32, length: usize },

    #[error("a snake of length {length} leaves no room for an apple")]
    NoRoomForApple { length: usize },

    #[error("frames per second must be positive")]
    ZeroTickRate,
}
