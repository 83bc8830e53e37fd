use scene_core::{RegionId, ScrollBinder};

/// Release the trigger of every region whose element has left the page and
/// drop it from `regions`. Returns how many were released.
pub fn prune_detached<T>(
    regions: &mut Vec<(T, RegionId)>,
    binder: &mut ScrollBinder,
    is_connected: impl Fn(&T) -> bool,
) -> usize {
    let before = regions.len();
    regions.retain(|(el, id)| {
        if is_connected(el) {
            true
        } else {
            binder.release(*id);
            false
        }
    });
    before - regions.len()
}
