use crate::error::EngineError;
use crate::step::StepContext;

/// Top-down merge sort. Ties take from the left run, so equal elements keep
/// their relative order.
pub fn merge_sort<T: Ord + Copy>(ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
    if ctx.len() < 2 {
        return Ok(());
    }
    sort_range(ctx, 0, ctx.len() - 1)
}

// Depth is bounded by log2(len) since the split is always at the midpoint.
fn sort_range<T: Ord + Copy>(
    ctx: &mut StepContext<'_, T>,
    low: usize,
    high: usize,
) -> Result<(), EngineError> {
    if low >= high {
        return Ok(());
    }
    let mid = low + (high - low) / 2;
    sort_range(ctx, low, mid)?;
    sort_range(ctx, mid + 1, high)?;
    merge(ctx, low, mid, high)
}

fn merge<T: Ord + Copy>(
    ctx: &mut StepContext<'_, T>,
    low: usize,
    mid: usize,
    high: usize,
) -> Result<(), EngineError> {
    let left = ctx.copy_range(low, mid + 1)?;
    let right = ctx.copy_range(mid + 1, high + 1)?;

    let (mut i, mut j, mut k) = (0, 0, low);
    while i < left.len() && j < right.len() {
        if let Err(err) = ctx.pause() {
            flush(ctx, k, &left[i..], &right[j..])?;
            return Err(err);
        }
        let cursor = mid + 1 + j;
        ctx.compare(k, cursor)?;
        if left[i] <= right[j] {
            ctx.write(k, left[i])?;
            i += 1;
        } else {
            ctx.write(k, right[j])?;
            j += 1;
        }
        ctx.settle(k, cursor)?;
        k += 1;
    }
    flush(ctx, k, &left[i..], &right[j..])
}

/// Writes the remaining tails back without pausing.
fn flush<T: Ord + Copy>(
    ctx: &mut StepContext<'_, T>,
    start: usize,
    left: &[T],
    right: &[T],
) -> Result<(), EngineError> {
    for (offset, value) in left.iter().chain(right).enumerate() {
        ctx.write(start + offset, *value)?;
    }
    Ok(())
}
