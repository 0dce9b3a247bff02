use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;
use trackgen::engine::progress::{Progress, ProgressCallback};

const BAR_TEMPLATE: &str = "{msg:<16} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})";

/// Renders sweep progress as one bar per component on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state without drawing.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(target);
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::SweepStart {
                    component,
                    total_decks,
                } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_decks);
                    pb_guard.set_position(0);
                    pb_guard.set_message(component);
                }
                Progress::DeckWritten => {
                    // Declared counts may undershoot the sweep; grow rather than overflow.
                    if pb_guard.position() >= pb_guard.length().unwrap_or(0) {
                        pb_guard.inc_length(1);
                    }
                    pb_guard.inc(1);
                }
                Progress::SweepFinish { decks_written } => {
                    pb_guard.set_length(decks_written);
                    pb_guard.set_position(decks_written);
                    pb_guard.finish();
                }
                Progress::Message(msg) => {
                    pb_guard.println(format!("  {}", msg));
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::hidden();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_a_sweep() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::SweepStart {
            component: "quadrupole",
            total_decks: 4,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "quadrupole");
            assert_eq!(pb.length(), Some(4));
            assert_eq!(pb.position(), 0);
        }

        callback(Progress::DeckWritten);
        callback(Progress::DeckWritten);
        assert_eq!(handler.pb.lock().unwrap().position(), 2);

        callback(Progress::SweepFinish { decks_written: 4 });
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 4);
    }

    #[test]
    fn bar_grows_when_declared_count_is_too_small() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::SweepStart {
            component: "drift",
            total_decks: 1,
        });
        callback(Progress::DeckWritten);
        callback(Progress::DeckWritten);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.length(), Some(2));
    }

    #[test]
    fn messages_leave_the_bar_position_alone() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::SweepStart {
            component: "drift",
            total_decks: 2,
        });
        callback(Progress::DeckWritten);
        callback(Progress::Message("drift: declared 2 deck(s) but wrote 1".to_string()));
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 1);
        assert_eq!(pb.length(), Some(2));
        assert!(!pb.is_finished());
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::SweepStart {
                component: "drift",
                total_decks: 1,
            });
            callback(Progress::DeckWritten);
            callback(Progress::SweepFinish { decks_written: 1 });
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
    }
}
