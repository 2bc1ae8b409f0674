//! Rigid-body world behind a small collaborator trait.
//!
//! The pointer controller only needs point queries, velocity writes and a
//! step, so it talks to [`PhysicsWorld`]. [`RapierWorld`] is the real
//! implementation; tests substitute their own.

use std::fmt::Debug;

use glam::DVec2;
use rapier2d::pipeline::QueryFilterFlags;
use rapier2d::prelude::*;

use crate::config::PlaygroundConfig;

/// Restricts which shapes a point query may return. The default is
/// unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeFilter {
    pub exclude_fixed: bool,
    pub exclude_sensors: bool,
}

impl ShapeFilter {
    /// Matches every shape.
    pub fn all() -> Self {
        Self::default()
    }

    fn to_query_filter(self) -> QueryFilter<'static> {
        let mut flags = QueryFilterFlags::empty();
        if self.exclude_fixed {
            flags |= QueryFilterFlags::EXCLUDE_FIXED;
        }
        if self.exclude_sensors {
            flags |= QueryFilterFlags::EXCLUDE_SENSORS;
        }
        QueryFilter {
            flags,
            ..QueryFilter::default()
        }
    }
}

pub trait PhysicsWorld {
    /// Non-owning shape reference. Only valid until the shape is removed.
    type Shape: Copy + Eq + Debug;

    /// Shapes within `radius` of `point`, in backend order.
    fn point_query(&self, point: DVec2, radius: f64, filter: ShapeFilter) -> Vec<Self::Shape>;

    /// Set the linear velocity of the body owning `shape`. Returns `false`
    /// if the shape or its body no longer exists.
    fn set_velocity(&mut self, shape: Self::Shape, velocity: DVec2) -> bool;

    fn velocity(&self, shape: Self::Shape) -> Option<DVec2>;

    /// Advance the simulation by one step of `dt` seconds.
    fn step(&mut self, dt: f64);
}

/// Pose of one box collider, for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPose {
    pub shape: ColliderHandle,
    pub center: DVec2,
    pub rotation: f64,
    pub half_extents: DVec2,
}

/// Material applied to every spawned box.
#[derive(Debug, Clone, Copy)]
struct BoxMaterial {
    mass: Real,
    friction: Real,
    damping: Real,
}

pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    material: BoxMaterial,
    steps: u64,
}

impl RapierWorld {
    pub fn new(config: &PlaygroundConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.physics.timestep as Real;

        Self {
            gravity: vector![
                config.physics.gravity[0] as Real,
                config.physics.gravity[1] as Real
            ],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            material: BoxMaterial {
                mass: config.boxes.mass as Real,
                friction: config.boxes.friction as Real,
                damping: config.boxes.damping as Real,
            },
            steps: 0,
        }
    }

    /// Add a dynamic square body centred at `center`.
    pub fn spawn_box(&mut self, center: DVec2, half_extent: f64) -> ColliderHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x as Real, center.y as Real])
            .linear_damping(self.material.damping)
            .angular_damping(self.material.damping)
            .build();
        let body_handle = self.bodies.insert(body);

        let half = half_extent as Real;
        let collider = ColliderBuilder::cuboid(half, half)
            .mass(self.material.mass)
            .friction(self.material.friction)
            .build();
        let handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);

        // Queries must see the new shape before the next step.
        self.query_pipeline.update(&self.colliders);
        handle
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of completed simulation steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn position(&self, shape: ColliderHandle) -> Option<DVec2> {
        let t = self.colliders.get(shape)?.translation();
        Some(DVec2::new(t.x as f64, t.y as f64))
    }

    /// Current pose of every cuboid collider.
    pub fn boxes(&self) -> impl Iterator<Item = BoxPose> + '_ {
        self.colliders.iter().filter_map(|(handle, collider)| {
            let cuboid = collider.shape().as_cuboid()?;
            let t = collider.translation();
            Some(BoxPose {
                shape: handle,
                center: DVec2::new(t.x as f64, t.y as f64),
                rotation: collider.rotation().angle() as f64,
                half_extents: DVec2::new(cuboid.half_extents.x as f64, cuboid.half_extents.y as f64),
            })
        })
    }

    fn body_mut(&mut self, shape: ColliderHandle) -> Option<&mut RigidBody> {
        let parent = self.colliders.get(shape)?.parent()?;
        self.bodies.get_mut(parent)
    }
}

impl PhysicsWorld for RapierWorld {
    type Shape = ColliderHandle;

    fn point_query(&self, point: DVec2, radius: f64, filter: ShapeFilter) -> Vec<ColliderHandle> {
        let mut hits = Vec::new();
        let filter = filter.to_query_filter();

        if radius > 0.0 {
            let ball = Ball::new(radius as Real);
            let pos = Isometry::translation(point.x as Real, point.y as Real);
            self.query_pipeline.intersections_with_shape(
                &self.bodies,
                &self.colliders,
                &pos,
                &ball,
                filter,
                |handle| {
                    hits.push(handle);
                    true
                },
            );
        } else {
            self.query_pipeline.intersections_with_point(
                &self.bodies,
                &self.colliders,
                &point![point.x as Real, point.y as Real],
                filter,
                |handle| {
                    hits.push(handle);
                    true
                },
            );
        }

        hits
    }

    fn set_velocity(&mut self, shape: ColliderHandle, velocity: DVec2) -> bool {
        match self.body_mut(shape) {
            Some(body) => {
                body.set_linvel(vector![velocity.x as Real, velocity.y as Real], true);
                true
            }
            None => false,
        }
    }

    fn velocity(&self, shape: ColliderHandle) -> Option<DVec2> {
        let parent = self.colliders.get(shape)?.parent()?;
        let v = self.bodies.get(parent)?.linvel();
        Some(DVec2::new(v.x as f64, v.y as f64))
    }

    fn step(&mut self, dt: f64) {
        // Must match the dt drag velocities were computed with.
        self.integration_parameters.dt = dt as Real;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 1.0 / 60.0;

    fn world() -> RapierWorld {
        RapierWorld::new(&PlaygroundConfig::default())
    }

    #[test]
    fn test_point_query_hits_box_center() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(100.0, 100.0), 16.0);
        let hits = world.point_query(DVec2::new(100.0, 100.0), 1.0, ShapeFilter::all());
        assert_eq!(hits, vec![handle]);
    }

    #[test]
    fn test_point_query_radius_reaches_past_edge() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);
        // Half a unit outside the right edge, within the 1.0 radius
        assert_eq!(world.point_query(DVec2::new(16.5, 0.0), 1.0, ShapeFilter::all()), vec![handle]);
        assert!(world.point_query(DVec2::new(18.0, 0.0), 1.0, ShapeFilter::all()).is_empty());
    }

    #[test]
    fn test_point_query_empty_space() {
        let mut world = world();
        world.spawn_box(DVec2::new(100.0, 100.0), 16.0);
        assert!(world.point_query(DVec2::new(500.0, 500.0), 1.0, ShapeFilter::all()).is_empty());
    }

    #[test]
    fn test_point_query_zero_radius() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(10.0, 10.0), 4.0);
        assert_eq!(world.point_query(DVec2::new(12.0, 8.0), 0.0, ShapeFilter::all()), vec![handle]);
    }

    #[test]
    fn test_overlapping_boxes_all_returned() {
        let mut world = world();
        let a = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);
        let b = world.spawn_box(DVec2::new(8.0, 0.0), 16.0);
        let mut hits = world.point_query(DVec2::new(4.0, 0.0), 1.0, ShapeFilter::all());
        hits.sort_by_key(|h| h.into_raw_parts());
        let mut expected = vec![a, b];
        expected.sort_by_key(|h| h.into_raw_parts());
        assert_eq!(hits, expected);
    }

    #[test]
    fn test_set_velocity_moves_box() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);
        assert!(world.set_velocity(handle, DVec2::new(60.0, 0.0)));
        assert_eq!(world.velocity(handle), Some(DVec2::new(60.0, 0.0)));

        world.step(STEP);
        let pos = world.position(handle).unwrap();
        assert!(pos.x > 0.0, "box should move right, at {pos:?}");
        assert!(pos.y.abs() < 1e-3, "box should not drift vertically, at {pos:?}");
        assert_eq!(world.steps(), 1);
    }

    #[test]
    fn test_step_integrates_over_given_dt() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);
        world.set_velocity(handle, DVec2::new(1000.0, 0.0));
        world.step(0.001);
        let pos = world.position(handle).unwrap();
        // 1 unit, less a sliver of damping
        assert!((pos.x - 1.0).abs() < 0.01, "moved {pos:?}");
    }

    // ── filters ──

    #[test]
    fn test_filter_excludes_fixed_and_sensor_shapes() {
        let mut world = world();
        let free = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);

        let wall_body = world.bodies.insert(RigidBodyBuilder::fixed().build());
        let wall = world.colliders.insert_with_parent(
            ColliderBuilder::cuboid(4.0, 4.0).build(),
            wall_body,
            &mut world.bodies,
        );
        let trigger_body = world.bodies.insert(RigidBodyBuilder::dynamic().build());
        let trigger = world.colliders.insert_with_parent(
            ColliderBuilder::ball(4.0).sensor(true).build(),
            trigger_body,
            &mut world.bodies,
        );
        world.query_pipeline.update(&world.colliders);

        let query = |filter| world.point_query(DVec2::ZERO, 1.0, filter);

        let all = query(ShapeFilter::all());
        assert_eq!(all.len(), 3);

        let no_fixed = query(ShapeFilter {
            exclude_fixed: true,
            ..ShapeFilter::all()
        });
        assert!(no_fixed.contains(&free) && no_fixed.contains(&trigger));
        assert!(!no_fixed.contains(&wall));

        let no_sensors = query(ShapeFilter {
            exclude_sensors: true,
            ..ShapeFilter::all()
        });
        assert!(no_sensors.contains(&free) && no_sensors.contains(&wall));
        assert!(!no_sensors.contains(&trigger));
    }

    #[test]
    fn test_damping_slows_free_box() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);
        world.set_velocity(handle, DVec2::new(100.0, 0.0));
        for _ in 0..60 {
            world.step(STEP);
        }
        let v = world.velocity(handle).unwrap();
        assert!(v.x > 0.0 && v.x < 50.0, "velocity after one second: {v:?}");
    }

    #[test]
    fn test_set_velocity_on_removed_shape() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(0.0, 0.0), 16.0);
        let parent = world.colliders.get(handle).unwrap().parent().unwrap();
        world.bodies.remove(
            parent,
            &mut world.island_manager,
            &mut world.colliders,
            &mut world.impulse_joints,
            &mut world.multibody_joints,
            true,
        );
        assert!(!world.set_velocity(handle, DVec2::new(1.0, 1.0)));
        assert_eq!(world.velocity(handle), None);
    }

    #[test]
    fn test_boxes_reports_poses() {
        let mut world = world();
        let handle = world.spawn_box(DVec2::new(5.0, 7.0), 3.0);
        let poses: Vec<_> = world.boxes().collect();
        assert_eq!(poses.len(), 1);
        assert_eq!(poses[0].shape, handle);
        assert_eq!(poses[0].center, DVec2::new(5.0, 7.0));
        assert_eq!(poses[0].half_extents, DVec2::new(3.0, 3.0));
        assert_eq!(poses[0].rotation, 0.0);
        assert_eq!(world.body_count(), 1);
    }
}
