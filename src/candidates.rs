//! Which views can receive a crop region
//!
//! A 3D source only pairs with other 3D views. Any other source pairs with
//! croppable views looking along the same line, in either direction.

use crate::error::{CropTreeError, CropTreeResult};
use crate::models::{Inventory, ViewId, ViewRecord};
use crate::selection::BuildItem;

/// Reject sources that have no crop region to copy
pub fn validate_source(view: &ViewRecord) -> CropTreeResult<()> {
    if view.kind.has_crop_region() {
        Ok(())
    } else {
        Err(CropTreeError::SourceNotCroppable {
            name: view.name.clone(),
            kind: view.kind,
        })
    }
}

/// Views that can take the crop region of `source`, in inventory order
pub fn allowable_targets<'a>(inventory: &'a Inventory, source: &ViewRecord) -> Vec<&'a ViewRecord> {
    inventory
        .views
        .iter()
        .filter(|v| v.id != source.id && !v.is_template)
        .filter(|v| {
            if source.kind.is_3d() {
                v.kind.is_3d()
            } else {
                v.kind.has_crop_region() && v.direction.is_parallel_to(source.direction)
            }
        })
        .collect()
}

/// Look up the source, validate it and collect its targets
///
/// Returns `NoCandidates` when nothing can receive the region, which callers
/// treat as a cancellation.
pub fn resolve<'a>(
    inventory: &'a Inventory,
    source: ViewId,
) -> CropTreeResult<(&'a ViewRecord, Vec<&'a ViewRecord>)> {
    let view = inventory
        .view(source)
        .ok_or(CropTreeError::ViewNotFound { id: source })?;
    validate_source(view)?;

    let targets = allowable_targets(inventory, view);
    if targets.is_empty() {
        return Err(CropTreeError::NoCandidates {
            name: view.name.clone(),
        });
    }
    Ok((view, targets))
}

/// Builder input for the selection tree
pub fn to_build_items<'a>(
    views: impl IntoIterator<Item = &'a ViewRecord>,
) -> Vec<BuildItem<ViewId>> {
    views
        .into_iter()
        .map(|v| BuildItem::new(v.id, v.name.clone(), v.folders.clone()))
        .collect()
}
