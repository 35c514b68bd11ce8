use crate::error::EngineError;
use crate::step::StepContext;

/// Heap sort over a max-heap built bottom-up.
pub fn heap_sort<T: Ord + Copy>(ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
    let len = ctx.len();
    for node in (0..len / 2).rev() {
        sift_down(ctx, len, node)?;
    }
    for end in (1..len).rev() {
        ctx.pause()?;
        ctx.swap(0, end)?;
        sift_down(ctx, end, 0)?;
    }
    Ok(())
}

/// Restores the heap property below `node` within the first `heap_len`
/// elements.
///
/// Swaps happen top-down; the compare/settle pair for every visited node,
/// including the one where the descent stops, is emitted afterwards from the
/// bottom up.
fn sift_down<T: Ord + Copy>(
    ctx: &mut StepContext<'_, T>,
    heap_len: usize,
    mut node: usize,
) -> Result<(), EngineError> {
    let mut visited = Vec::new();
    loop {
        let largest = larger_child(ctx, heap_len, node)?;
        visited.push((node, largest));
        if largest == node {
            break;
        }
        ctx.swap(node, largest)?;
        node = largest;
    }

    for (node, largest) in visited.into_iter().rev() {
        ctx.pause()?;
        ctx.compare(node, largest)?;
        ctx.settle(node, largest)?;
    }
    Ok(())
}

fn larger_child<T: Ord + Copy>(
    ctx: &StepContext<'_, T>,
    heap_len: usize,
    node: usize,
) -> Result<usize, EngineError> {
    let mut largest = node;
    let left = 2 * node + 1;
    let right = 2 * node + 2;
    if left < heap_len && ctx.value(left)? > ctx.value(largest)? {
        largest = left;
    }
    if right < heap_len && ctx.value(right)? > ctx.value(largest)? {
        largest = right;
    }
    Ok(largest)
}
