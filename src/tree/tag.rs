use std::fmt;

/// Rendering intent recorded on every node when it is created.
///
/// The writer stores the tag and never reads it back; it exists for
/// whatever renders the finished tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationTag {
    /// Plain value cell.
    #[default]
    Cell,
    Header,
    Label,
    Emphasis,
    Code,
    Muted,
}

impl PresentationTag {
    pub const ALL: [PresentationTag; 6] = [
        PresentationTag::Cell,
        PresentationTag::Header,
        PresentationTag::Label,
        PresentationTag::Emphasis,
        PresentationTag::Code,
        PresentationTag::Muted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresentationTag::Cell => "cell",
            PresentationTag::Header => "header",
            PresentationTag::Label => "label",
            PresentationTag::Emphasis => "emphasis",
            PresentationTag::Code => "code",
            PresentationTag::Muted => "muted",
        }
    }
}

impl fmt::Display for PresentationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
