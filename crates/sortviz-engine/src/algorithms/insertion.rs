use crate::error::EngineError;
use crate::step::StepContext;

/// Shifts each key left past its strictly greater predecessors.
pub fn insertion_sort<T: Ord + Copy>(ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
    for i in 1..ctx.len() {
        let key = ctx.value(i)?;
        // `slot` is the open position the key will land in.
        let mut slot = i;
        while slot > 0 && ctx.value(slot - 1)? > key {
            if let Err(err) = ctx.pause() {
                // Close the hole so a cancelled run is still a permutation.
                ctx.write(slot, key)?;
                return Err(err);
            }
            ctx.compare(slot, slot - 1)?;
            let shifted = ctx.value(slot - 1)?;
            ctx.write(slot, shifted)?;
            slot -= 1;
        }
        if slot != i {
            ctx.write(slot, key)?;
        }
        ctx.settle(slot, slot.saturating_sub(1))?;
    }
    Ok(())
}
