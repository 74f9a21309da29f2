#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraticuleError {
    InvalidConfig(String),
    Parse(String),
}

impl std::fmt::Display for GraticuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraticuleError::InvalidConfig(msg) => write!(f, "invalid graticule config: {msg}"),
            GraticuleError::Parse(msg) => write!(f, "graticule config parse error: {msg}"),
        }
    }
}

impl std::error::Error for GraticuleError {}
