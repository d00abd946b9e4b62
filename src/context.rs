use crate::config::RunSettings;
use crate::logging::LogSink;
use crate::scratch::ScratchArea;

/// Everything one run needs, passed explicitly to traversal, invocation and merge.
///
/// Built once at startup. The only state that changes afterwards is the scratch
/// area's profile-name counter.
#[derive(Debug)]
pub struct RunContext {
    settings: RunSettings,
    scratch: ScratchArea,
    sink: LogSink,
}

impl RunContext {
    #[must_use]
    pub const fn new(settings: RunSettings, scratch: ScratchArea, sink: LogSink) -> Self {
        Self {
            settings,
            scratch,
            sink,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &RunSettings {
        &self.settings
    }

    #[must_use]
    pub const fn scratch(&self) -> &ScratchArea {
        &self.scratch
    }

    #[must_use]
    pub const fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Give up the context, keeping the scratch area for cleanup.
    #[must_use]
    pub fn into_scratch(self) -> ScratchArea {
        self.scratch
    }
}
