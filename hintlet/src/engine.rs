use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{HarnessError, HintOptions};

/// The autohinting entry point.
///
/// Implementations hint each input font into the corresponding output path,
/// failing the whole run on the first error. The engine is the unit under
/// test; everything else in this crate only orchestrates it.
pub trait HintEngine {
    fn hint_files(&self, options: &HintOptions) -> Result<(), HarnessError>;
}

/// Drives an external autohinter executable, one invocation per font.
#[derive(Clone, Debug)]
pub struct CommandEngine {
    program: PathBuf,
}

impl Default for CommandEngine {
    fn default() -> Self {
        CommandEngine::new("otfautohint")
    }
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandEngine {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Whether the executable can be found on this host.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl HintEngine for CommandEngine {
    fn hint_files(&self, options: &HintOptions) -> Result<(), HarnessError> {
        if options.input_paths.len() != options.output_paths.len() {
            return Err(HarnessError::PathCount {
                inputs: options.input_paths.len(),
                outputs: options.output_paths.len(),
            });
        }
        for (input, output) in options.input_paths.iter().zip(&options.output_paths) {
            let mut cmd = Command::new(&self.program);
            cmd.arg("-o").arg(output);
            if options.hint_all {
                cmd.arg("--all");
            }
            if options.verbose {
                cmd.arg("-v");
            } else {
                cmd.stdout(Stdio::null());
            }
            cmd.arg(input);
            log::debug!("running {cmd:?}");
            let status = cmd.status().map_err(|source| HarnessError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;
            if !status.success() {
                return Err(HarnessError::ToolFailed {
                    program: self.program.display().to_string(),
                    status,
                    path: input.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_path_counts() {
        let engine = CommandEngine::default();
        let options = HintOptions {
            input_paths: vec!["a.otf".into(), "b.otf".into()],
            output_paths: vec!["out.otf".into()],
            ..Default::default()
        };
        assert!(matches!(
            engine.hint_files(&options),
            Err(HarnessError::PathCount {
                inputs: 2,
                outputs: 1
            })
        ));
    }

    #[test]
    fn missing_executable_fails_to_launch() {
        let engine = CommandEngine::new("hintlet-no-such-autohinter");
        assert!(!engine.is_available());
        let options = HintOptions::for_run("a.otf", "out.otf");
        assert!(matches!(
            engine.hint_files(&options),
            Err(HarnessError::Launch { .. })
        ));
    }
}
