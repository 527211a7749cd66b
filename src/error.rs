// error.rs — 环境几何错误类型

/// Errors raised while deriving environment geometry or loading its parameters.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error(
        "degenerate geometry: half a panel ({half_panel}) exceeds the radius ({radius}), \
         the three panels cannot be inscribed"
    )]
    DegenerateGeometry { radius: f64, half_panel: f64 },

    #[error(
        "360 panorama cannot be mapped: panels end {shortfall} short of the axes, \
         at least a third of the length ({length}), the right panel would be mirrored"
    )]
    PanelsTooShort { shortfall: f64, length: f64 },

    #[error("unsupported panorama mode: {0:?} (expected \"Thirds\" or \"360\")")]
    UnsupportedPanoramaMode(String),

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvironmentError>;
