//! Copy a crop region onto the selected views
//!
//! Targets are processed in order. A target that cannot take the region is
//! recorded in the report and the batch moves on.

use std::fmt;

use serde::Serialize;

use crate::config::Preferences;
use crate::models::{Inventory, ViewId, ViewRecord};

/// Why a single target was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyFailure {
    /// The id is not in the inventory
    TargetMissing,
    /// The target kind has no crop region
    NotCroppable,
    /// A 3D region cannot go onto a non-3D view
    KindMismatch,
}

impl fmt::Display for ApplyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ApplyFailure::TargetMissing => "view not found",
            ApplyFailure::NotCroppable => "view has no crop region",
            ApplyFailure::KindMismatch => "3D crop cannot be applied to a non-3D view",
        };
        f.write_str(msg)
    }
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub applied: Vec<ViewId>,
    pub failed: Vec<(ViewId, ApplyFailure)>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy the crop region of `source` onto every id in `targets`
///
/// The source is snapshotted first, so a target list that names the source
/// itself sees the original settings.
pub fn copy_crop(
    inventory: &mut Inventory,
    source: &ViewRecord,
    targets: impl IntoIterator<Item = ViewId>,
    prefs: &Preferences,
) -> ApplyReport {
    let source = source.clone();
    let mut report = ApplyReport::default();

    for id in targets {
        let Some(target) = inventory.view_mut(id) else {
            report.failed.push((id, ApplyFailure::TargetMissing));
            continue;
        };
        match copy_one(&source, target, prefs) {
            Ok(()) => report.applied.push(id),
            Err(failure) => report.failed.push((id, failure)),
        }
    }

    report
}

fn copy_one(
    source: &ViewRecord,
    target: &mut ViewRecord,
    prefs: &Preferences,
) -> Result<(), ApplyFailure> {
    if !target.kind.has_crop_region() {
        return Err(ApplyFailure::NotCroppable);
    }
    if source.kind.is_3d() && !target.kind.is_3d() {
        return Err(ApplyFailure::KindMismatch);
    }

    if prefs.copy_section_box && source.kind.is_3d() && target.kind.is_3d() {
        if let Some(section_box) = source.section_box {
            target.section_box = Some(section_box);
        }
    }

    let crop = &mut target.crop;
    if source.kind.is_3d() && target.kind.is_3d() {
        crop.region = source.crop.region;
    } else {
        if let (Some(offsets), Some(_)) =
            (source.crop.annotation_offsets, crop.annotation_offsets)
        {
            crop.annotation_offsets = Some(offsets);
        }
        if source.crop.region.is_some() {
            crop.region = source.crop.region;
        }
    }

    if prefs.copy_crop_visibility {
        crop.active = source.crop.active;
        crop.visible = source.crop.visible;
        crop.annotation_crop_active = source.crop.annotation_crop_active;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotationOffsets, BoundingBox, CropSettings, Vec3, ViewKind};

    fn bbox(size: f64) -> BoundingBox {
        BoundingBox {
            min: Vec3::new(0.0, 0.0, 0.0),
            max: Vec3::new(size, size, size),
        }
    }

    fn offsets(v: f64) -> AnnotationOffsets {
        AnnotationOffsets {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }

    fn view(id: u64, kind: ViewKind) -> ViewRecord {
        ViewRecord {
            id: ViewId(id),
            name: format!("View {}", id),
            kind,
            folders: Vec::new(),
            is_template: false,
            direction: Vec3::new(0.0, 0.0, 1.0),
            crop: CropSettings::default(),
            section_box: None,
        }
    }

    fn source_plan() -> ViewRecord {
        let mut source = view(1, ViewKind::FloorPlan);
        source.crop = CropSettings {
            region: Some(bbox(10.0)),
            active: true,
            visible: true,
            annotation_crop_active: true,
            annotation_offsets: Some(offsets(2.0)),
        };
        source
    }

    #[test]
    fn plan_region_and_offsets_are_copied() {
        let source = source_plan();
        let mut target = view(2, ViewKind::FloorPlan);
        target.crop.annotation_offsets = Some(offsets(0.5));
        let mut inventory = Inventory {
            views: vec![source.clone(), target],
            ..Default::default()
        };

        let report = copy_crop(&mut inventory, &source, [ViewId(2)], &Preferences::default());
        assert_eq!(report.applied, vec![ViewId(2)]);
        assert!(report.is_clean());

        let crop = &inventory.view(ViewId(2)).unwrap().crop;
        assert_eq!(crop.region, Some(bbox(10.0)));
        assert_eq!(crop.annotation_offsets, Some(offsets(2.0)));
        // visibility flags stay with the target by default
        assert!(!crop.active);
        assert!(!crop.visible);
        assert!(!crop.annotation_crop_active);
    }

    #[test]
    fn offsets_need_support_on_both_sides() {
        let source = source_plan();
        let target = view(2, ViewKind::Section);
        let mut inventory = Inventory {
            views: vec![source.clone(), target],
            ..Default::default()
        };

        copy_crop(&mut inventory, &source, [ViewId(2)], &Preferences::default());
        let crop = &inventory.view(ViewId(2)).unwrap().crop;
        assert_eq!(crop.annotation_offsets, None);
        assert_eq!(crop.region, Some(bbox(10.0)));
    }

    #[test]
    fn visibility_copied_when_preferred() {
        let source = source_plan();
        let mut inventory = Inventory {
            views: vec![source.clone(), view(2, ViewKind::FloorPlan)],
            ..Default::default()
        };
        let prefs = Preferences {
            copy_crop_visibility: true,
            ..Default::default()
        };

        copy_crop(&mut inventory, &source, [ViewId(2)], &prefs);
        let crop = &inventory.view(ViewId(2)).unwrap().crop;
        assert!(crop.active && crop.visible && crop.annotation_crop_active);
    }

    #[test]
    fn section_box_follows_preference() {
        let mut source = view(1, ViewKind::ThreeD);
        source.crop.region = Some(bbox(4.0));
        source.section_box = Some(bbox(8.0));
        let mut inventory = Inventory {
            views: vec![source.clone(), view(2, ViewKind::ThreeD), view(3, ViewKind::ThreeD)],
            ..Default::default()
        };

        copy_crop(&mut inventory, &source, [ViewId(2)], &Preferences::default());
        assert_eq!(inventory.view(ViewId(2)).unwrap().section_box, None);
        assert_eq!(inventory.view(ViewId(2)).unwrap().crop.region, Some(bbox(4.0)));

        let prefs = Preferences {
            copy_section_box: true,
            ..Default::default()
        };
        copy_crop(&mut inventory, &source, [ViewId(3)], &prefs);
        assert_eq!(inventory.view(ViewId(3)).unwrap().section_box, Some(bbox(8.0)));
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let mut source = view(1, ViewKind::ThreeD);
        source.crop.region = Some(bbox(1.0));
        let mut inventory = Inventory {
            views: vec![
                source.clone(),
                view(2, ViewKind::FloorPlan),
                view(3, ViewKind::Legend),
                view(4, ViewKind::ThreeD),
            ],
            ..Default::default()
        };

        let report = copy_crop(
            &mut inventory,
            &source,
            [ViewId(2), ViewId(99), ViewId(3), ViewId(4)],
            &Preferences::default(),
        );
        assert_eq!(report.applied, vec![ViewId(4)]);
        assert_eq!(
            report.failed,
            vec![
                (ViewId(2), ApplyFailure::KindMismatch),
                (ViewId(99), ApplyFailure::TargetMissing),
                (ViewId(3), ApplyFailure::NotCroppable),
            ]
        );
        assert_eq!(inventory.view(ViewId(2)).unwrap().crop.region, None);
    }

    #[test]
    fn failure_serializes_as_snake_case() {
        let json = serde_json::to_string(&ApplyFailure::KindMismatch).unwrap();
        assert_eq!(json, "\"kind_mismatch\"");
    }
}
