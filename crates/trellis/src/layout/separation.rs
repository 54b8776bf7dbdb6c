//! Minimum-distance correction applied after the force simulation.

use log::{debug, warn};

use trellis_core::geometry::Point;

/// Result of [`enforce_min_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SeparationOutcome {
    passes: usize,
    resolved: bool,
}

impl SeparationOutcome {
    /// Number of passes that moved at least one node.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Whether every pair ended at least the minimum distance apart.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// Push apart every pair of points closer than `min_distance`.
///
/// Each offending pair moves symmetrically along the line joining it by half
/// the deficit plus `buffer`; coincident points separate along the x axis.
/// Runs until a pass makes no adjustment or `max_passes` is spent.
pub(super) fn enforce_min_distance(
    positions: &mut [Point],
    min_distance: f32,
    buffer: f32,
    max_passes: usize,
) -> SeparationOutcome {
    for pass in 0..max_passes {
        if !separation_pass(positions, min_distance, buffer) {
            return SeparationOutcome {
                passes: pass,
                resolved: true,
            };
        }
    }

    SeparationOutcome {
        passes: max_passes,
        resolved: !has_overlap(positions, min_distance),
    }
}

/// One sweep over all pairs. Returns true when any point moved.
fn separation_pass(positions: &mut [Point], min_distance: f32, buffer: f32) -> bool {
    let mut moved = false;

    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let delta = positions[j].sub_point(positions[i]);
            let distance = delta.hypot();
            if distance >= min_distance {
                continue;
            }

            let direction = if distance == 0.0 {
                Point::new(1.0, 0.0)
            } else {
                delta.scale(1.0 / distance)
            };
            let push = direction.scale((min_distance - distance) / 2.0 + buffer);

            positions[i] = positions[i].sub_point(push);
            positions[j] = positions[j].add_point(push);
            moved = true;
        }
    }

    moved
}

/// Whether any two points are closer than `min_distance`.
pub(super) fn has_overlap(positions: &[Point], min_distance: f32) -> bool {
    positions.iter().enumerate().any(|(i, a)| {
        positions[i + 1..]
            .iter()
            .any(|b| a.distance(*b) < min_distance)
    })
}

/// Re-place all points on a square grid with the given pitch.
///
/// Points keep their relative reading order: sorted by y, then x, then
/// original index, they fill rows of `ceil(sqrt(n))` columns.
pub(super) fn place_on_grid(positions: &mut [Point], pitch: f32) {
    let count = positions.len();
    if count == 0 {
        return;
    }
    warn!(
        node_count = count;
        "Overlaps remain after separation passes, falling back to grid placement"
    );

    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by(|&a, &b| {
        positions[a]
            .y()
            .total_cmp(&positions[b].y())
            .then(positions[a].x().total_cmp(&positions[b].x()))
            .then(a.cmp(&b))
    });

    let columns = (count as f64).sqrt().ceil() as usize;
    debug!(columns, pitch; "Grid placement");

    for (rank, index) in order.into_iter().enumerate() {
        let column = (rank % columns) as f32;
        let row = (rank / columns) as f32;
        positions[index] = Point::new(column * pitch, row * pitch);
    }
}
