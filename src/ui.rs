//! Styled stderr output for diagnostics

use console::Style;

use crate::resolver::{Diagnostic, Severity};

/// Print diagnostics to stderr, mirroring log-level prefixes.
/// Debug lines only appear in verbose mode.
pub fn emit_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    for diagnostic in diagnostics {
        let prefix = match diagnostic.severity {
            Severity::Debug => {
                if !verbose {
                    continue;
                }
                Style::new().dim().apply_to("DEBUG  ")
            }
            Severity::Info => Style::new().cyan().apply_to("INFO   "),
            Severity::Warning => Style::new().yellow().bold().apply_to("WARNING"),
            Severity::Error => Style::new().red().bold().apply_to("ERROR  "),
        };
        eprintln!("{prefix} -  {}", diagnostic.message);
    }
}
