//! Movement domain: ground detection against avian's spatial query.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GroundProbe;

/// Circle overlap probe backed by [`SpatialQuery`]. The probing character
/// is excluded so its own collider never counts as ground.
pub(crate) struct AvianGroundProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    exclude: Entity,
}

impl<'a, 'w, 's> AvianGroundProbe<'a, 'w, 's> {
    pub(crate) fn new(spatial_query: &'a SpatialQuery<'w, 's>, exclude: Entity) -> Self {
        Self {
            spatial_query,
            exclude,
        }
    }
}

impl GroundProbe for AvianGroundProbe<'_, '_, '_> {
    fn overlaps(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool {
        let filter = SpatialQueryFilter::from_mask(mask).with_excluded_entities([self.exclude]);
        let hits =
            self.spatial_query
                .shape_intersections(&Collider::circle(radius), point, 0.0, &filter);
        !hits.is_empty()
    }
}
