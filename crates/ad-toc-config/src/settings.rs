use std::fmt;

/// Highest heading level an ATX heading can carry.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Resolved settings consumed by every TOC stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocSettings {
    pub head_marker: String,
    pub tail_marker: String,
    pub style: BlockStyle,
    pub fence_label: String,
    pub title: MetadataLine<String>,
    pub color: MetadataLine<String>,
    pub collapse: MetadataLine<CollapseState>,
    pub max_level: u8,
}

impl Default for TocSettings {
    fn default() -> Self {
        TocSettings {
            head_marker: "-------".to_owned(),
            tail_marker: "-----".to_owned(),
            style: BlockStyle::Fenced,
            fence_label: "ad-toc".to_owned(),
            title: MetadataLine::enabled("目录".to_owned()),
            color: MetadataLine::enabled("#6496FF".to_owned()),
            collapse: MetadataLine::enabled(CollapseState::Open),
            max_level: 3,
        }
    }
}

/// Wrapper format of the generated block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockStyle {
    /// A fenced code block opened with the fence label; supports metadata lines.
    Fenced,
    /// Head and tail marker lines around the bare outline.
    Plain,
}

impl BlockStyle {
    pub fn from_code_block_flag(enabled: bool) -> Self {
        if enabled {
            BlockStyle::Fenced
        } else {
            BlockStyle::Plain
        }
    }

    pub fn is_fenced(self) -> bool {
        matches!(self, BlockStyle::Fenced)
    }
}

impl fmt::Display for BlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockStyle::Fenced => "fenced",
            BlockStyle::Plain => "plain",
        })
    }
}

/// An optional `key: value` line emitted at the top of a fenced block.
///
/// The toggle and the value are tracked separately: switching the toggle off
/// keeps the stored value around for when it is switched back on, while an
/// absent value disables the line regardless of the toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataLine<T> {
    pub enabled: bool,
    pub value: Option<T>,
}

impl<T> MetadataLine<T> {
    pub fn enabled(value: T) -> Self {
        MetadataLine {
            enabled: true,
            value: Some(value),
        }
    }

    pub fn disabled() -> Self {
        MetadataLine {
            enabled: false,
            value: None,
        }
    }

    /// The value to emit, if the line is switched on and has one.
    pub fn active(&self) -> Option<&T> {
        if self.enabled {
            self.value.as_ref()
        } else {
            None
        }
    }
}

/// Initial collapse state written into the fenced block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollapseState {
    Open,
    Close,
}

impl CollapseState {
    pub fn as_str(self) -> &'static str {
        match self {
            CollapseState::Open => "open",
            CollapseState::Close => "close",
        }
    }
}

impl fmt::Display for CollapseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollapseState {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(CollapseState::Open),
            "close" => Ok(CollapseState::Close),
            _ => Err(()),
        }
    }
}
