//! Ray casting against the scene
//!
//! Both interaction (what did the click hit?) and collision sampling (how
//! close is the nearest wall?) are distance queries along a ray. Everything
//! solid in the scene is an axis-aligned box, so the slab test is the only
//! intersection routine the game needs.

use macroquad::prelude::Vec3;

/// A 3D ray with origin and normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance t along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An axis-aligned box: wall slab, furniture, prop, door leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    /// Half extents along each axis
    pub half: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half: Vec3) -> Self {
        Self { center, half }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half
    }

    /// Full size along each axis (what `draw_cube` wants).
    pub fn size(&self) -> Vec3 {
        self.half * 2.0
    }

    pub fn contains(&self, p: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x
            && p.y >= min.y && p.y <= max.y
            && p.z >= min.z && p.z <= max.z
    }
}

/// Result of a ray hit: distance along the ray and the surface normal.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub t: f32,
    pub normal: Vec3,
}

/// Intersect a ray with a horizontal plane at the given height.
///
/// Returns the distance along the ray, or None if the ray is parallel to
/// the plane or the intersection lies behind the origin.
pub fn ray_floor_distance(ray: &Ray, floor_y: f32) -> Option<f32> {
    if ray.direction.y.abs() < 1e-4 {
        return None;
    }
    let t = (floor_y - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Intersect a ray with an axis-aligned box (slab method).
///
/// Returns the nearest hit with its surface normal, or None on a miss.
/// A ray starting inside the box reports t = 0.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<RayHit> {
    let min = aabb.min();
    let max = aabb.max();

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0usize;
    let mut enter_sign = 1.0f32;

    let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
    let dir = [ray.direction.x, ray.direction.y, ray.direction.z];
    let mins = [min.x, min.y, min.z];
    let maxs = [max.x, max.y, max.z];

    for axis in 0..3 {
        if dir[axis].abs() < 1e-6 {
            // Parallel to this slab: miss unless origin is inside it
            if origin[axis] < mins[axis] || origin[axis] > maxs[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir[axis];
        let mut t0 = (mins[axis] - origin[axis]) * inv;
        let mut t1 = (maxs[axis] - origin[axis]) * inv;
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }

        if t0 > t_enter {
            t_enter = t0;
            enter_axis = axis;
            enter_sign = sign;
        }
        t_exit = t_exit.min(t1);

        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None; // Entirely behind the ray
    }

    let t = t_enter.max(0.0);
    let mut n = [0.0f32; 3];
    n[enter_axis] = enter_sign;

    Some(RayHit {
        t,
        normal: Vec3::new(n[0], n[1], n[2]),
    })
}

/// Nearest hit among a set of boxes, with the index of the box that was hit.
pub fn ray_nearest<'a, I>(ray: &Ray, boxes: I) -> Option<(usize, RayHit)>
where
    I: IntoIterator<Item = &'a Aabb>,
{
    let mut best: Option<(usize, RayHit)> = None;
    for (i, aabb) in boxes.into_iter().enumerate() {
        if let Some(hit) = ray_aabb(ray, aabb) {
            if best.map_or(true, |(_, b)| hit.t < b.t) {
                best = Some((i, hit));
            }
        }
    }
    best
}
