use std::path::Path;

use crate::{CffDump, Differ, Fixture, FontKind, HarnessError, HintEngine, HintOptions};

/// Hint one fixture into `scratch` and compare the result.
///
/// This is the whole life of a test case: configure, hint, re-encode the
/// 'CFF ' table when the fixture is binary, then diff. Any engine, codec, or
/// differ error is terminal for the case and propagates to the caller, who
/// owns `scratch` and its cleanup. The runner holds no shared state, so
/// callers are free to run cases in parallel as long as each gets its own
/// scratch directory.
pub fn run_case(
    fixture: &Fixture,
    engine: &dyn HintEngine,
    dump: &dyn CffDump,
    differ: &dyn Differ,
    scratch: &Path,
) -> Result<(), HarnessError> {
    let hinted = scratch.join(fixture.file_name());
    let options = HintOptions::for_run(&fixture.path, &hinted);
    engine.hint_files(&options)?;

    match fixture.kind {
        FontKind::Ufo => differ.compare(&fixture.path, &hinted),
        FontKind::Otf => {
            // Sidecar XML dumps land in scratch, never next to the fixture.
            let expected_xml = scratch.join("expected.cff.xml");
            let actual_xml = scratch.join("hinted.cff.xml");
            dump.dump(&fixture.path, &expected_xml)?;
            dump.dump(&hinted, &actual_xml)?;
            differ.compare(&expected_xml, &actual_xml)
        }
    }
}
