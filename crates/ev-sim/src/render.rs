//! Plain-text view of a running simulation.

use ev_core::Cell;
use ev_spatial::CellKind;

use crate::Sim;

/// Render the grid one character per cell:
///
/// | Char | Cell                          |
/// |------|-------------------------------|
/// | `W`  | wall                          |
/// | `E`  | exit                          |
/// | `H`  | helper-capable occupant       |
/// | `D`  | dependent occupant            |
/// | ` `  | anything else                 |
///
/// Each row ends with `\n`.
pub fn render_ascii(sim: &Sim) -> String {
    let plan = sim.plan();
    let mut out = String::with_capacity((plan.width as usize + 1) * plan.height as usize);
    for y in 0..plan.height {
        for x in 0..plan.width {
            let cell = Cell::new(x, y);
            let occupant = sim.grid().occupant_at(cell).and_then(|id| sim.registry().get(id));
            let c = match (plan.kind(cell), occupant) {
                (Some(CellKind::Wall), _)     => 'W',
                (Some(CellKind::Exit), _)     => 'E',
                (_, Some(o)) if o.is_helper() => 'H',
                (_, Some(_))                  => 'D',
                _                             => ' ',
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
