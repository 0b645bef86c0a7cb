//! 3D presentation of the [`DrawList`]: camera, sky, planet, meteors, blade.
//!
//! Entities are spawned once and then re-posed every frame.  Meteors use a
//! pool: each visual owns its own material so solid-colour fallbacks can
//! differ per meteor, and surplus visuals are hidden rather than despawned.
//!
//! The world stays visible behind the title card and the intro crawl; scene
//! entities are hidden only when a frame draws no world at all.

use crate::config::GameConfig;
use crate::constants::{FIELD_OF_VIEW, HILT_LENGTH, HILT_RADIUS};
use crate::equipment::EquipmentPose;
use crate::game::GameSet;
use crate::render::{DrawList, Surface, PLANET_FALLBACK, SKY_FALLBACK};
use bevy::prelude::*;

/// Radius of the star sphere drawn around the camera.
const SKY_RADIUS: f32 = 400.0;

/// Where the blade is held, in camera-local space.
const BLADE_GRIP_OFFSET: Vec3 = Vec3::new(0.35, -0.35, -0.8);

/// Forward tilt of the blade from vertical (degrees).
const BLADE_TILT: f32 = 60.0;

const BLADE_CORE_COLOR: Color = Color::srgb(0.85, 1.0, 0.85);
const BLADE_GLOW_COLOR: Color = Color::srgb(0.2, 1.0, 0.2);
const HILT_COLOR: Color = Color::srgb(0.35, 0.35, 0.38);

// ── Component markers ─────────────────────────────────────────────────────────

#[derive(Component)]
pub struct WorldCamera;

#[derive(Component)]
pub struct SkySphere;

#[derive(Component)]
pub struct PlanetBody;

/// A pooled meteor visual.
#[derive(Component)]
pub struct MeteorVisual;

/// Parent of the hilt, core and glow; child of the camera.
#[derive(Component)]
pub struct BladeRoot;

#[derive(Component)]
pub struct BladeCore;

#[derive(Component)]
pub struct BladeGlow;

/// Shared unit meshes for pooled meteors.
#[derive(Resource)]
pub struct SceneMeshes {
    pub sphere: Handle<Mesh>,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene).add_systems(
            Update,
            (
                sync_camera,
                sync_backdrop,
                sync_meteors,
                sync_blade,
                sync_blade_glow,
            )
                .in_set(GameSet::Present),
        );
    }
}

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Whether `material` already shows `surface`.
pub fn surface_matches(material: &StandardMaterial, surface: &Surface) -> bool {
    match surface {
        Surface::Textured(handle) => material.base_color_texture.as_ref() == Some(handle),
        Surface::Solid(color) => {
            material.base_color_texture.is_none() && material.base_color == *color
        }
    }
}

pub fn apply_surface(material: &mut StandardMaterial, surface: &Surface) {
    match surface {
        Surface::Textured(handle) => {
            material.base_color = Color::WHITE;
            material.base_color_texture = Some(handle.clone());
        }
        Surface::Solid(color) => {
            material.base_color = *color;
            material.base_color_texture = None;
        }
    }
}

fn unlit(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

/// Core blade transform under [`BladeRoot`]: a unit cylinder scaled to the
/// extended length and lifted so it grows out of the hilt.
pub fn blade_core_transform(pose: &EquipmentPose) -> Transform {
    Transform::from_xyz(0.0, pose.blade_length * 0.5, 0.0).with_scale(Vec3::new(
        pose.blade_radius,
        pose.blade_length.max(f32::EPSILON),
        pose.blade_radius,
    ))
}

pub fn blade_glow_transform(pose: &EquipmentPose) -> Transform {
    Transform::from_xyz(0.0, pose.blade_length * 0.5, 0.0).with_scale(Vec3::new(
        pose.glow_radius,
        pose.blade_length.max(f32::EPSILON),
        pose.glow_radius,
    ))
}

/// Planet placement matching the surface meteors land on.
pub fn planet_transform(config: &GameConfig) -> Transform {
    Transform::from_xyz(0.0, config.planet_center_y, 0.0)
        .with_scale(Vec3::splat(config.planet_radius))
}

fn update_material(
    materials: &mut Assets<StandardMaterial>,
    handle: &MeshMaterial3d<StandardMaterial>,
    surface: &Surface,
) {
    let stale = materials
        .get(&handle.0)
        .is_some_and(|material| !surface_matches(material, surface));
    if stale {
        if let Some(material) = materials.get_mut(&handle.0) {
            apply_surface(material, surface);
        }
    }
}

fn show(visibility: &mut Visibility, visible: bool) {
    let wanted = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != wanted {
        *visibility = wanted;
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_scene(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));
    let cylinder = meshes.add(Cylinder::new(1.0, 1.0));
    commands.insert_resource(SceneMeshes {
        sphere: sphere.clone(),
    });

    commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: FIELD_OF_VIEW.to_radians(),
                far: SKY_RADIUS * 2.0,
                ..default()
            }),
            Transform::default(),
            WorldCamera,
        ))
        .with_children(|camera| {
            camera
                .spawn((
                    Transform::from_translation(BLADE_GRIP_OFFSET)
                        .with_rotation(Quat::from_rotation_x(-BLADE_TILT.to_radians())),
                    Visibility::Hidden,
                    BladeRoot,
                ))
                .with_children(|blade| {
                    blade.spawn((
                        Mesh3d(cylinder.clone()),
                        MeshMaterial3d(materials.add(unlit(HILT_COLOR))),
                        Transform::from_xyz(0.0, -HILT_LENGTH * 0.5, 0.0).with_scale(Vec3::new(
                            HILT_RADIUS,
                            HILT_LENGTH,
                            HILT_RADIUS,
                        )),
                    ));
                    blade.spawn((
                        Mesh3d(cylinder.clone()),
                        MeshMaterial3d(materials.add(unlit(BLADE_CORE_COLOR))),
                        Transform::default(),
                        BladeCore,
                    ));
                    blade.spawn((
                        Mesh3d(cylinder.clone()),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: BLADE_GLOW_COLOR.with_alpha(0.15),
                            alpha_mode: AlphaMode::Add,
                            unlit: true,
                            ..default()
                        })),
                        Transform::default(),
                        BladeGlow,
                    ));
                });
        });

    // Seen from inside, so back faces must render.
    commands.spawn((
        Mesh3d(sphere.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            cull_mode: None,
            ..unlit(SKY_FALLBACK)
        })),
        Transform::from_scale(Vec3::splat(SKY_RADIUS)),
        Visibility::Hidden,
        SkySphere,
    ));

    commands.spawn((
        Mesh3d(sphere),
        MeshMaterial3d(materials.add(unlit(PLANET_FALLBACK))),
        planet_transform(&config),
        Visibility::Hidden,
        PlanetBody,
    ));

    info!("Scene ready");
}

// ── Update / GameSet::Present ─────────────────────────────────────────────────

pub fn sync_camera(
    draw: Res<DrawList>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<WorldCamera>>,
) {
    let Some(view) = draw.view else {
        return;
    };
    for (mut transform, mut projection) in cameras.iter_mut() {
        transform.translation = view.position;
        if view.direction != Vec3::ZERO {
            transform.look_to(view.direction, Vec3::Y);
        }
        if let Projection::Perspective(ref mut perspective) = *projection {
            let fov = view.fov.to_radians();
            if perspective.fov != fov {
                perspective.fov = fov;
            }
        }
    }
}

/// Sky follows the camera; planet spins in place.
pub fn sync_backdrop(
    draw: Res<DrawList>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sky: Query<
        (&mut Transform, &mut Visibility, &MeshMaterial3d<StandardMaterial>),
        (With<SkySphere>, Without<PlanetBody>),
    >,
    mut planet: Query<
        (&mut Transform, &mut Visibility, &MeshMaterial3d<StandardMaterial>),
        (With<PlanetBody>, Without<SkySphere>),
    >,
) {
    for (mut transform, mut visibility, material) in sky.iter_mut() {
        show(&mut visibility, draw.skybox.is_some());
        if let (Some(surface), Some(view)) = (&draw.skybox, draw.view) {
            transform.translation = view.position;
            update_material(&mut materials, material, surface);
        }
    }
    for (mut transform, mut visibility, material) in planet.iter_mut() {
        show(&mut visibility, draw.planet.is_some());
        if let Some((rotation, surface)) = &draw.planet {
            transform.rotation = Quat::from_rotation_y(rotation.to_radians());
            update_material(&mut materials, material, surface);
        }
    }
}

/// Pose one pooled visual per drawn meteor; grow the pool when short.
pub fn sync_meteors(
    mut commands: Commands,
    draw: Res<DrawList>,
    scene_meshes: Res<SceneMeshes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pool: Query<
        (&mut Transform, &mut Visibility, &MeshMaterial3d<StandardMaterial>),
        With<MeteorVisual>,
    >,
) {
    let mut draws = draw.projectiles.iter();
    for (mut transform, mut visibility, material) in pool.iter_mut() {
        match draws.next() {
            Some(meteor) => {
                *transform = Transform::from_translation(meteor.position)
                    .with_rotation(meteor.rotation)
                    .with_scale(Vec3::splat(meteor.size));
                show(&mut visibility, true);
                update_material(&mut materials, material, &meteor.surface);
            }
            None => show(&mut visibility, false),
        }
    }

    for meteor in draws {
        let mut material = unlit(Color::WHITE);
        apply_surface(&mut material, &meteor.surface);
        commands.spawn((
            Mesh3d(scene_meshes.sphere.clone()),
            MeshMaterial3d(materials.add(material)),
            Transform::from_translation(meteor.position)
                .with_rotation(meteor.rotation)
                .with_scale(Vec3::splat(meteor.size)),
            Visibility::Inherited,
            MeteorVisual,
        ));
    }
}

pub fn sync_blade(
    draw: Res<DrawList>,
    mut roots: Query<&mut Visibility, With<BladeRoot>>,
    mut cores: Query<&mut Transform, (With<BladeCore>, Without<BladeGlow>)>,
    mut glows: Query<&mut Transform, (With<BladeGlow>, Without<BladeCore>)>,
) {
    for mut visibility in roots.iter_mut() {
        show(&mut visibility, draw.equipment.is_some());
    }
    let Some(pose) = draw.equipment else {
        return;
    };
    for mut transform in cores.iter_mut() {
        *transform = blade_core_transform(&pose);
    }
    for mut transform in glows.iter_mut() {
        *transform = blade_glow_transform(&pose);
    }
}

/// Pulse the glow sheath's opacity.
pub fn sync_blade_glow(
    draw: Res<DrawList>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    glows: Query<&MeshMaterial3d<StandardMaterial>, With<BladeGlow>>,
) {
    let Some(pose) = draw.equipment else {
        return;
    };
    for handle in glows.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = BLADE_GLOW_COLOR.with_alpha(pose.glow_alpha);
        }
    }
}
