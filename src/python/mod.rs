//! Python bindings for the rally-engine match engine.
//!
//! # Quick Start
//!
//! ```python
//! import rally_engine as re
//!
//! match = re.Match(("Blue", "An", "Binh"), ("Red", "Chi", "Dung"))
//! match.select_initial_server(team=0, left=False)
//!
//! match.point(0)      # serving team scores
//! match.side_out()    # server fault
//! match.undo()
//!
//! print(match.scores, match.server_number)
//! ```

use pyo3::prelude::*;

mod py_match;

pub use py_match::*;

/// rally-engine: live scoring for doubles side-out matches.
#[pymodule]
fn rally_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMatch>()?;
    m.add_class::<PySimulator>()?;

    Ok(())
}
