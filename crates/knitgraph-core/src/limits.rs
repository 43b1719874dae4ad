//! Input validation limits for generated swatches

/// Maximum stitches per row in a generated swatch (1000)
pub const MAX_SWATCH_WIDTH: usize = 1000;

/// Maximum rows in a generated swatch (1000)
pub const MAX_SWATCH_HEIGHT: usize = 1000;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    WidthTooLarge { width: usize, max: usize },
    HeightTooLarge { height: usize, max: usize },
    RibWidthTooLarge { rib_width: usize, width: usize },
    EmptyWidth,
    EmptyHeight,
    EmptyRibWidth,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WidthTooLarge { width, max } => {
                write!(f, "Swatch width too large: {} stitches (max {})", width, max)
            }
            Self::HeightTooLarge { height, max } => {
                write!(f, "Swatch height too large: {} rows (max {})", height, max)
            }
            Self::RibWidthTooLarge { rib_width, width } => {
                write!(
                    f,
                    "Rib width {} is wider than the swatch ({} stitches)",
                    rib_width, width
                )
            }
            Self::EmptyWidth => write!(f, "Swatch width must be at least 1"),
            Self::EmptyHeight => write!(f, "Swatch height must be at least 1"),
            Self::EmptyRibWidth => write!(f, "Rib width must be at least 1"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate swatch width and height
pub fn validate_swatch_dimensions(width: usize, height: usize) -> Result<(), ValidationError> {
    if width == 0 {
        return Err(ValidationError::EmptyWidth);
    }
    if height == 0 {
        return Err(ValidationError::EmptyHeight);
    }
    if width > MAX_SWATCH_WIDTH {
        return Err(ValidationError::WidthTooLarge {
            width,
            max: MAX_SWATCH_WIDTH,
        });
    }
    if height > MAX_SWATCH_HEIGHT {
        return Err(ValidationError::HeightTooLarge {
            height,
            max: MAX_SWATCH_HEIGHT,
        });
    }
    Ok(())
}

/// Validate rib band width against the swatch width
pub fn validate_rib_width(rib_width: usize, width: usize) -> Result<(), ValidationError> {
    if rib_width == 0 {
        return Err(ValidationError::EmptyRibWidth);
    }
    if rib_width > width {
        return Err(ValidationError::RibWidthTooLarge { rib_width, width });
    }
    Ok(())
}
