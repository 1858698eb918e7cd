//! Presentation sink: particle text and closed captions.
//!
//! Fire-and-forget; the core never reads anything back.

pub trait Presenter {
    /// Re-form the particle cloud into `text`.
    fn set_particle_text(&mut self, text: &str);
    fn show_caption(&mut self, text: &str);
    fn hide_caption(&mut self);
}

/// One presentation call, as recorded by [`RecordingPresenter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presented {
    Text(String),
    Caption(String),
    HideCaption,
}

/// Keeps every call in order, plus the current on-screen state.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub log:     Vec<Presented>,
    pub text:    String,
    pub caption: Option<String>,
}

impl Presenter for RecordingPresenter {
    fn set_particle_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.log.push(Presented::Text(text.to_string()));
    }

    fn show_caption(&mut self, text: &str) {
        self.caption = Some(text.to_string());
        self.log.push(Presented::Caption(text.to_string()));
    }

    fn hide_caption(&mut self) {
        self.caption = None;
        self.log.push(Presented::HideCaption);
    }
}
