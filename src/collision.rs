use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use glam::Vec2;

use crate::entities::{Actor, ActorId};

/// Bounding shape carried by every actor and tested by the broad-phase
/// index. Circles are used for round actors (the mystery ship), rects for
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { center: Vec2, half: Vec2 },
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Shape::Circle { center, radius }
    }

    pub fn rect(center: Vec2, half: Vec2) -> Self {
        Shape::Rect { center, half }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            Shape::Circle { center, .. } | Shape::Rect { center, .. } => center,
        }
    }

    /// Same shape moved to a new center.
    pub fn recentered(self, center: Vec2) -> Self {
        match self {
            Shape::Circle { radius, .. } => Shape::Circle { center, radius },
            Shape::Rect { half, .. } => Shape::Rect { center, half },
        }
    }

    /// Axis-aligned bounds as (min, max) corners.
    pub fn aabb(&self) -> (Vec2, Vec2) {
        match *self {
            Shape::Circle { center, radius } => {
                (center - Vec2::splat(radius), center + Vec2::splat(radius))
            }
            Shape::Rect { center, half } => (center - half, center + half),
        }
    }

    pub fn overlaps(&self, other: &Shape) -> bool {
        match (*self, *other) {
            (Shape::Circle { center: a, radius: ra }, Shape::Circle { center: b, radius: rb }) => {
                a.distance_squared(b) < (ra + rb) * (ra + rb)
            }
            (Shape::Rect { center: a, half: ha }, Shape::Rect { center: b, half: hb }) => {
                let d = (a - b).abs();
                d.x < ha.x + hb.x && d.y < ha.y + hb.y
            }
            (Shape::Circle { center, radius }, Shape::Rect { center: rc, half })
            | (Shape::Rect { center: rc, half }, Shape::Circle { center, radius }) => {
                let nearest = center.clamp(rc - half, rc + half);
                center.distance_squared(nearest) < radius * radius
            }
        }
    }
}

/// Broad-phase collision index over a fixed field, rebuilt from the scene
/// every frame.
///
/// Actors whose shape lies entirely outside the field are refused by
/// [`add`](CollisionGrid::add); `knows` then reports false and the frame
/// loop drops them from the scene. This is also how off-screen projectiles
/// die.
pub struct CollisionGrid {
    width: f32,
    height: f32,
    cell: f32,
    buckets: HashMap<(i32, i32), Vec<ActorId>>,
    shapes: HashMap<ActorId, Shape>,
}

impl CollisionGrid {
    /// The recommended cell size is the widest actor's width times 1.25.
    pub fn new(width: f32, height: f32, cell: f32) -> Self {
        Self {
            width,
            height,
            cell,
            buckets: HashMap::new(),
            shapes: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.shapes.clear();
    }

    pub fn add(&mut self, actor: &impl Actor) {
        let shape = actor.cshape();
        let (min, max) = shape.aabb();
        if max.x < 0.0 || min.x > self.width || max.y < 0.0 || min.y > self.height {
            return;
        }
        self.shapes.insert(actor.id(), shape);
        for cx in self.span(min.x, max.x) {
            for cy in self.span(min.y, max.y) {
                self.buckets.entry((cx, cy)).or_default().push(actor.id());
            }
        }
    }

    pub fn knows(&self, id: ActorId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// All actors whose shape overlaps `id`'s, in no particular order.
    /// Unknown ids yield nothing.
    pub fn iter_colliding(&self, id: ActorId) -> Vec<ActorId> {
        let Some(shape) = self.shapes.get(&id) else {
            return Vec::new();
        };
        let (min, max) = shape.aabb();
        let mut seen = HashSet::new();
        let mut hits = Vec::new();
        for cx in self.span(min.x, max.x) {
            for cy in self.span(min.y, max.y) {
                let Some(bucket) = self.buckets.get(&(cx, cy)) else {
                    continue;
                };
                for &other in bucket {
                    if other == id || !seen.insert(other) {
                        continue;
                    }
                    if self.shapes[&other].overlaps(shape) {
                        hits.push(other);
                    }
                }
            }
        }
        hits
    }

    fn span(&self, lo: f32, hi: f32) -> RangeInclusive<i32> {
        let a = (lo / self.cell).floor() as i32;
        let b = (hi / self.cell).floor() as i32;
        a..=b
    }
}
