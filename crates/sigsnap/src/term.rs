//! Terminal width probing.

use sigsnap_core::DEFAULT_COLUMNS;

/// Margin kept free at the right edge of the terminal.
const WIDTH_MARGIN: u16 = 20;

/// Working display width for snapshot output.
///
/// Probes the controlling terminal and returns
/// `max(80, columns - 20)`; any probe failure (no terminal attached,
/// or an error from the host) falls back to the default of 80. The
/// failure is absorbed here, callers never see it.
#[must_use]
pub fn working_columns() -> usize
{
    match crossterm::terminal::size() {
        Ok((columns, _rows)) => DEFAULT_COLUMNS.max(columns.saturating_sub(WIDTH_MARGIN) as usize),
        Err(error) => {
            tracing::debug!(%error, "terminal width probe failed, using default width");
            DEFAULT_COLUMNS
        }
    }
}
