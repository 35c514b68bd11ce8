use crate::error::EngineError;
use crate::step::StepContext;

/// Scans each suffix for its minimum and swaps it into place.
///
/// Only one settle is emitted per outer iteration, not per compare.
pub fn selection_sort<T: Ord + Copy>(ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
    let len = ctx.len();
    for i in 0..len.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..len {
            ctx.pause()?;
            ctx.compare(min, j)?;
            if ctx.value(j)? < ctx.value(min)? {
                min = j;
            }
        }
        if min != i {
            ctx.swap(min, i)?;
        }
        ctx.settle(min, i)?;
    }
    Ok(())
}
