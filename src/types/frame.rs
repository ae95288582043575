#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One call-stack frame: the function that was executing and its source file.
///
/// Stacks are ordered innermost first, so the frame at `index + 1` is the
/// caller of the frame at `index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallFrame {
    pub function: String,
    pub file: String,
    pub line: Option<u32>,
}

impl CallFrame {
    #[inline]
    pub fn new(function: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line: None,
        }
    }

    #[inline]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// Frames of one call stack, innermost first.
pub type CallStack = Vec<CallFrame>;

impl core::fmt::Display for CallFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} ({}:{})", self.function, self.file, line),
            None => write!(f, "{} ({})", self.function, self.file),
        }
    }
}
