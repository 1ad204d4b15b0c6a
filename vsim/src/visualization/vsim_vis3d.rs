use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid};

use crate::simulation::integrator::RenderSync;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Component tagging each sphere with its particle index into the solver's store
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Latest positions reported by the solver's render-sync hook, in world space
#[derive(Resource, Default)]
struct SyncedPositions(Vec<Vec3>);

/// Shared unit-diameter sphere, scaled per particle by its radius
#[derive(Resource)]
struct ParticleAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Distance of the camera from the container centre along +Z
const CAMERA_DISTANCE: f32 = 180.0;

/// Render-sync sink writing into the viewer's position buffer
struct BufferSync<'a>(&'a mut Vec<Vec3>);

impl RenderSync for BufferSync<'_> {
    fn position_updated(&mut self, index: usize, position: &NVec3) {
        if index >= self.0.len() {
            self.0.resize(index + 1, Vec3::ZERO);
        }
        self.0[index] = to_world(position);
    }
}

fn to_world(p: &NVec3) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Open a window and drive the scenario's solver once per rendered frame
pub fn run_3d(scenario: Scenario) {
    log::info!(
        "run_3d: starting Bevy viewer, capacity {} particles",
        scenario.solver.parameters().max_particles
    );

    App::new()
        .insert_resource(scenario)
        .init_resource::<SyncedPositions>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (physics_step_3d, spawn_new_particles, sync_transforms_3d, draw_container).chain())
        .run();
}

/// Startup system: camera, light, axes and the shared particle mesh
fn setup_3d(mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    let center = to_world(&scenario.solver.constraint().center);

    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_translation(center + Vec3::new(0.0, 20.0, CAMERA_DISTANCE))
            .looking_at(center, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5.0e7,
            range: 1000.0,
            ..Default::default()
        },
        transform: Transform::from_translation(center + Vec3::new(60.0, 120.0, 120.0)),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    commands.insert_resource(ParticleAssets {
        mesh: meshes.add(Sphere::new(0.5).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.9, 0.9),
            ..Default::default()
        }),
    });
}

/// Per-frame physics: one solver tick with the frame delta
fn physics_step_3d(time: Res<Time>, mut scenario: ResMut<Scenario>, mut synced: ResMut<SyncedPositions>) {
    let dt = time.delta_seconds() as f64;
    if dt <= 0.0 {
        return;
    }
    let mut sink = BufferSync(&mut synced.0);
    if let Some(i) = scenario.solver.tick_with(dt, &mut sink) {
        log::debug!("viewer: particle {i} admitted");
    }
}

/// Give every newly admitted particle an entity
fn spawn_new_particles(
    mut commands: Commands,
    scenario: Res<Scenario>,
    assets: Res<ParticleAssets>,
    mut spawned: Local<usize>,
) {
    let active = scenario.solver.active_particle_count();
    for i in *spawned..active {
        let Some(p) = scenario.solver.particle_snapshot(i) else { break };
        commands.spawn((
            PbrBundle {
                mesh: assets.mesh.clone(),
                material: assets.material.clone(),
                transform: Transform::from_translation(to_world(&p.position))
                    .with_scale(Vec3::splat(p.radius as f32)),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
    *spawned = active;
}

fn sync_transforms_3d(synced: Res<SyncedPositions>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(p) = synced.0.get(*i) {
            transform.translation = *p;
        }
    }
}

fn draw_container(mut gizmos: Gizmos, scenario: Res<Scenario>) {
    let c = scenario.solver.constraint();
    gizmos.sphere(to_world(&c.center), Quat::IDENTITY, c.max_distance as f32, Color::srgb(0.3, 0.3, 0.3));
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 20.0;
    let axis_thickness = 0.1;

    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)),
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)),
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (size, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            // Cuboid is centered at its transform origin, so this puts it crossing the world origin
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
