use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use read_fonts::{tables::cff::Cff, FontRead, FontRef, ReadError, TopLevelTable};

use crate::HarnessError;

/// Serializes the 'CFF ' table of a binary font to an XML sidecar file.
pub trait CffDump {
    fn dump(&self, font_path: &Path, xml_path: &Path) -> Result<(), HarnessError>;
}

/// Production dump: check the table with read-fonts, serialize it with `ttx`.
#[derive(Clone, Debug)]
pub struct TtxDump {
    program: PathBuf,
}

impl Default for TtxDump {
    fn default() -> Self {
        TtxDump::new("ttx")
    }
}

impl TtxDump {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        TtxDump {
            program: program.into(),
        }
    }

    /// Whether the `ttx` executable can be found on this host.
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

impl CffDump for TtxDump {
    fn dump(&self, font_path: &Path, xml_path: &Path) -> Result<(), HarnessError> {
        // An unreadable font or a missing 'CFF ' table fails here, before
        // anything shells out.
        let bytes = std::fs::read(font_path)?;
        let font = FontRef::new(&bytes)?;
        let data = font
            .table_data(Cff::TAG)
            .ok_or(ReadError::TableIsMissing(Cff::TAG))?;
        Cff::read(data)?;

        log::debug!("dumping 'CFF ' of {font_path:?} to {xml_path:?}");
        let status = Command::new(&self.program)
            .arg("-t")
            .arg("CFF ")
            .arg("-o")
            .arg(xml_path)
            .arg(font_path)
            .stdout(Stdio::null())
            .status()
            .map_err(|source| HarnessError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;
        if !status.success() {
            return Err(HarnessError::ToolFailed {
                program: self.program.display().to_string(),
                status,
                path: font_path.to_owned(),
            });
        }
        Ok(())
    }
}
