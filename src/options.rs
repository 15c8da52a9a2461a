use crate::constants::MAX_DEPTH;
use crate::tree::PresentationTag;

/// Settings for a [`TreeWriter`](crate::TreeWriter).
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Tag stamped on nodes created through the convenience methods until
    /// the writer's tag is changed.
    pub default_tag: PresentationTag,
    /// Maximum container nesting. Property slots do not count.
    pub max_depth: usize,
    /// Close open containers on `finish` instead of failing. Off by default:
    /// completion writes nodes the producer never asked for.
    pub auto_complete: bool,
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_tag(mut self, tag: PresentationTag) -> Self {
        self.default_tag = tag;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_auto_complete(mut self, auto_complete: bool) -> Self {
        self.auto_complete = auto_complete;
        self
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            default_tag: PresentationTag::default(),
            max_depth: MAX_DEPTH,
            auto_complete: false,
        }
    }
}
