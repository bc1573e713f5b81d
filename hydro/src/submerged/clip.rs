use bevy_math::Vec3;

use crate::math::triangle_area;

/// A triangle corner tagged with its signed height above the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    pub position: Vec3,
    pub height: f32,
}

impl ClipVertex {
    pub const fn new(position: Vec3, height: f32) -> Self { Self { position, height } }
}

pub type ClipTriangle = [ClipVertex; 3];

/// Zero, one or two triangles produced by cutting a triangle at the waterline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clipped {
    Empty,
    One(ClipTriangle),
    Two([ClipTriangle; 2]),
}

impl Clipped {
    pub fn triangles(&self) -> &[ClipTriangle] {
        match self {
            Clipped::Empty => &[],
            Clipped::One(t) => std::slice::from_ref(t),
            Clipped::Two(ts) => ts,
        }
    }

    pub fn area(&self) -> f32 {
        self.triangles()
            .iter()
            .map(|[a, b, c]| triangle_area(a.position, b.position, c.position))
            .sum()
    }
}

/// Both sides of a waterline cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub below: Clipped,
    pub above: Clipped,
}

/// Orders the corners by ascending height, carrying positions along.
pub fn sort_by_height(tri: ClipTriangle) -> ClipTriangle {
    let mut sorted = tri;
    sorted.sort_by(|a, b| a.height.total_cmp(&b.height));
    sorted
}

/// Corners strictly below the surface.
#[inline]
pub fn submerged_count(tri: &ClipTriangle) -> usize {
    tri.iter().filter(|v| v.height < 0.0).count()
}

// Waterline point on the edge from `low` (below) to `other` (at or above).
#[inline]
fn waterline(low: ClipVertex, other: ClipVertex) -> ClipVertex {
    let t = -low.height / (other.height - low.height);
    ClipVertex::new(low.position + (other.position - low.position) * t, 0.0)
}

/// Cuts `tri` along the zero-height line.
///
/// A fully submerged triangle comes back untouched (same corners, same
/// winding). Partial cases emit the submerged part as
/// `(L, J_LH, J_LM)` for one corner under, or the quad `(L, M, I_MH, I_LH)`
/// split through `I_MH` for two; `above` receives the complement.
pub fn clip_triangle(tri: ClipTriangle) -> Split {
    match submerged_count(&tri) {
        0 => Split { below: Clipped::Empty, above: Clipped::One(tri) },
        3 => Split { below: Clipped::One(tri), above: Clipped::Empty },
        1 => {
            let [l, m, h] = sort_by_height(tri);
            let j_lm = waterline(l, m);
            let j_lh = waterline(l, h);
            Split {
                below: Clipped::One([l, j_lh, j_lm]),
                above: Clipped::Two([[j_lm, m, h], [j_lm, h, j_lh]]),
            }
        }
        _ => {
            let [l, m, h] = sort_by_height(tri);
            let i_mh = waterline(m, h);
            let i_lh = waterline(l, h);
            Split {
                below: Clipped::Two([[l, m, i_mh], [l, i_mh, i_lh]]),
                above: Clipped::One([i_lh, i_mh, h]),
            }
        }
    }
}
