/// Events emitted while a sweep writes its decks.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    SweepStart {
        component: &'static str,
        total_decks: u64,
    },
    DeckWritten,
    SweepFinish {
        decks_written: u64,
    },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards sweep progress to an optional callback; silent without one.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn sweep_started(&self, component: &'static str, total_decks: usize) {
        self.report(Progress::SweepStart {
            component,
            total_decks: total_decks as u64,
        });
    }

    pub fn deck_written(&self) {
        self.report(Progress::DeckWritten);
    }

    pub fn sweep_finished(&self, decks_written: usize) {
        self.report(Progress::SweepFinish {
            decks_written: decks_written as u64,
        });
    }

    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}
