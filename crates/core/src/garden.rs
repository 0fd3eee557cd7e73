//! Garden layout rules.
//!
//! A garden holds placements of completed trees at client-chosen transforms.
//! There is no overlap checking; the only rules are ownership, completion,
//! and sane numeric values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tree_growth::TreeStatus;
use crate::types::DbId;

/// Largest scale factor accepted for a placement.
pub const MAX_SCALE: f64 = 10.0;

/// Position, rotation (radians) and uniform scale of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
    pub scale: f64,
}

/// Decorative placements seeded when a user's garden is first created.
/// They carry no tree.
pub const STARTER_LAYOUT: [Transform; 3] = [
    Transform {
        pos_x: -2.0,
        pos_y: 0.0,
        pos_z: 1.0,
        rot_x: 0.0,
        rot_y: 0.4,
        rot_z: 0.0,
        scale: 1.0,
    },
    Transform {
        pos_x: 0.0,
        pos_y: 0.0,
        pos_z: -1.5,
        rot_x: 0.0,
        rot_y: 0.0,
        rot_z: 0.0,
        scale: 0.9,
    },
    Transform {
        pos_x: 2.2,
        pos_y: 0.0,
        pos_z: 0.8,
        rot_x: 0.0,
        rot_y: -0.6,
        rot_z: 0.0,
        scale: 1.1,
    },
];

/// Reject NaN/infinite components and non-positive or oversized scales.
pub fn validate_transform(t: &Transform) -> Result<(), CoreError> {
    let components = [t.pos_x, t.pos_y, t.pos_z, t.rot_x, t.rot_y, t.rot_z, t.scale];
    if components.iter().any(|c| !c.is_finite()) {
        return Err(CoreError::Validation(
            "Position, rotation and scale must be finite numbers".to_string(),
        ));
    }
    if t.scale <= 0.0 || t.scale > MAX_SCALE {
        return Err(CoreError::Validation(format!(
            "scale must be in (0, {MAX_SCALE}], got {}",
            t.scale
        )));
    }
    Ok(())
}

/// Check that `caller` may place tree `tree_id` owned by `owner` with the
/// stored `status`.
///
/// Someone else's tree is reported as not found so ownership is not leaked.
pub fn check_placeable(
    tree_id: DbId,
    owner: DbId,
    status: &str,
    caller: DbId,
) -> Result<(), CoreError> {
    if owner != caller {
        return Err(CoreError::NotFound {
            entity: "Tree",
            id: tree_id,
        });
    }
    if status != TreeStatus::Completed.as_str() {
        return Err(CoreError::NotCompleted(tree_id));
    }
    Ok(())
}
