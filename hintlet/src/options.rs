use std::path::{Path, PathBuf};

/// Per-run configuration handed to the hinting engine.
///
/// The defaults are the neutral base; [`HintOptions::for_run`] fills in the
/// fields that vary per test case.
#[derive(Clone, Debug, Default)]
pub struct HintOptions {
    /// Fonts to hint.
    pub input_paths: Vec<PathBuf>,
    /// Where each hinted font is written, parallel to `input_paths`.
    pub output_paths: Vec<PathBuf>,
    /// Hint every glyph, not just the ones the engine considers dirty.
    pub hint_all: bool,
    pub verbose: bool,
}

impl HintOptions {
    /// Options for hinting a single font into a scratch location.
    pub fn for_run(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        HintOptions {
            input_paths: vec![input.as_ref().to_owned()],
            output_paths: vec![output.as_ref().to_owned()],
            hint_all: true,
            ..Default::default()
        }
    }
}
