/// How the JSON output is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Multi-line output indented by `indent` spaces per level.
    Pretty { indent: usize },
    /// Single-line output without insignificant whitespace.
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub style: OutputStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: OutputStyle::Pretty { indent: 2 },
        }
    }
}

impl Config {
    pub fn compact() -> Self {
        Self {
            style: OutputStyle::Compact,
        }
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            style: OutputStyle::Pretty { indent },
        }
    }
}
