use crate::error::EngineError;
use crate::step::StepContext;

/// Adjacent-pair passes, each one shorter than the last.
pub fn bubble_sort<T: Ord + Copy>(ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
    let len = ctx.len();
    for pass in 0..len {
        for j in 0..len - pass - 1 {
            ctx.pause()?;
            ctx.compare(j, j + 1)?;
            if ctx.value(j)? > ctx.value(j + 1)? {
                ctx.swap(j, j + 1)?;
            }
            ctx.settle(j, j + 1)?;
        }
    }
    Ok(())
}
