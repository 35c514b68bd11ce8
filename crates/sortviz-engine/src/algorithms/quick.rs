use crate::error::EngineError;
use crate::step::StepContext;

/// Lomuto quick sort with the last element as pivot.
///
/// Pending partitions live on an explicit stack rather than the call stack.
pub fn quick_sort<T: Ord + Copy>(ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
    if ctx.len() < 2 {
        return Ok(());
    }
    let mut pending = vec![(0, ctx.len() - 1)];
    while let Some((low, high)) = pending.pop() {
        if low >= high {
            continue;
        }
        let pivot = partition(ctx, low, high)?;
        // Right half first so the left half is processed next.
        if pivot + 1 < high {
            pending.push((pivot + 1, high));
        }
        if pivot > low + 1 {
            pending.push((low, pivot - 1));
        }
    }
    Ok(())
}

fn partition<T: Ord + Copy>(
    ctx: &mut StepContext<'_, T>,
    low: usize,
    high: usize,
) -> Result<usize, EngineError> {
    let pivot = ctx.value(high)?;
    // Last index holding an element smaller than the pivot.
    let mut boundary: Option<usize> = None;

    for j in low..high {
        ctx.pause()?;
        if ctx.value(j)? < pivot {
            let next = boundary.map_or(low, |index| index + 1);
            boundary = Some(next);
            ctx.swap(next, j)?;
        }
        // Emitted whether or not a swap happened. Before the boundary first
        // advances it sits just left of the partition, or at 0 for the
        // leftmost one.
        let shown = boundary.unwrap_or(low.saturating_sub(1));
        ctx.compare(shown, j)?;
        ctx.settle(shown, j)?;
    }

    let resting = boundary.map_or(low, |index| index + 1);
    ctx.swap(resting, high)?;
    Ok(resting)
}
