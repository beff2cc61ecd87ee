use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialError {
    #[error("invalid geometry parameter `{parameter}` = {value}: {reason}")]
    InvalidGeometry {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl DialError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        DialError::InvalidGeometry {
            parameter,
            value,
            reason,
        }
    }

    /// True for the geometry error kind, regardless of which parameter tripped it.
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, DialError::InvalidGeometry { .. })
    }
}

pub type Result<T> = std::result::Result<T, DialError>;

// Parameter checks shared by the generators. Each runs before any output is built.

pub(crate) fn check_point_count(parameter: &'static str, count: usize) -> Result<()> {
    if count < 2 {
        return Err(DialError::invalid(parameter, count as f64, "at least 2 points are required"));
    }
    Ok(())
}

pub(crate) fn check_radius(parameter: &'static str, radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(DialError::invalid(parameter, radius, "must be positive and finite"));
    }
    Ok(())
}

pub(crate) fn check_length(parameter: &'static str, length: f64) -> Result<()> {
    if !length.is_finite() {
        return Err(DialError::invalid(parameter, length, "must be finite"));
    }
    Ok(())
}

pub(crate) fn check_segments(total_segments: f64) -> Result<()> {
    if !total_segments.is_finite() || total_segments <= 0.0 {
        return Err(DialError::invalid(
            "total_segments",
            total_segments,
            "must be positive and finite",
        ));
    }
    Ok(())
}

pub(crate) fn check_nonzero(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(DialError::invalid(parameter, 0.0, "must be non-zero"));
    }
    Ok(())
}
