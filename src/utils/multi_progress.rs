use crate::github::PageProgress;
use crate::utils::ProgressStyleTemplate;
use indicatif::{MultiProgress, ProgressBar};
use std::time::Duration;

pub trait MultiProgressNew {
    /// Adds a ticking message-only spinner showing `message`.
    fn add_spinner(&self, message: impl Into<String>) -> ProgressBar;
}

impl MultiProgressNew for MultiProgress {
    fn add_spinner(&self, message: impl Into<String>) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyleTemplate::only_message());
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Page callback printing `<what> (#<page> page) ...` on the spinner.
pub fn page_progress<'a>(pb: &ProgressBar, what: &'a str) -> PageProgress<'a> {
    let pb = pb.clone();
    Box::new(move |page| pb.set_message(format!("Fetch {} (#{} page) ...", what, page)))
}
