//! Composite models built from unit primitives.
//!
//! Each builder takes the entity's root transform and returns its parts in
//! world space. Local +Z is the model's facing direction.

use crate::scene::DrawItem;
use glam::{Mat4, Quat, Vec3};
use grove_assets::Primitive;
use grove_common::{Color, Transform};
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

const HIPPO_SKIN: u32 = 0x8b7355;
const HIPPO_LEGS: u32 = 0x6b5345;
const TRUNK: u32 = 0x4b3621;
const LEAVES: u32 = 0x0f6b0f;
const ENEMY_BODY: u32 = 0x4b0082;
const ENEMY_GLOW: u32 = 0x8b00ff;
const ENEMY_EYES: u32 = 0xff0000;
const WATER: u32 = 0x00bfff;

/// Root transform for something standing at `position` facing `yaw`.
pub fn root(position: Vec3, yaw: f32) -> Mat4 {
    Transform::from_position_yaw(position, yaw).matrix()
}

fn place(root: Mat4, offset: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    root * Mat4::from_scale_rotation_translation(scale, rotation, offset)
}

fn box_part(root: Mat4, size: Vec3, offset: Vec3, color: Color) -> DrawItem {
    DrawItem::solid(
        Primitive::Cube,
        place(root, offset, Quat::IDENTITY, size),
        color,
    )
}

fn ball(root: Mat4, radius: f32, offset: Vec3, color: Color) -> DrawItem {
    DrawItem::solid(
        Primitive::Sphere,
        place(root, offset, Quat::IDENTITY, Vec3::splat(radius)),
        color,
    )
}

/// Cylinder with separate top and bottom radii.
fn column(
    root: Mat4,
    top: f32,
    bottom: f32,
    height: f32,
    offset: Vec3,
    rotation: Quat,
    color: Color,
) -> DrawItem {
    let taper = (top / bottom * 100.0).round() as u16;
    let primitive = Primitive::Cylinder { taper };
    DrawItem::solid(
        primitive,
        place(root, offset, rotation, Vec3::new(bottom, height, bottom)),
        color,
    )
}

pub fn hippo(root: Mat4) -> Vec<DrawItem> {
    let skin = Color::from_hex(HIPPO_SKIN);
    let mut parts = vec![
        box_part(root, Vec3::new(1.5, 1.0, 2.0), Vec3::new(0.0, 0.5, 0.0), skin),
        box_part(root, Vec3::new(1.0, 0.8, 1.2), Vec3::new(0.0, 0.7, 1.2), skin),
        box_part(root, Vec3::new(0.6, 0.4, 0.6), Vec3::new(0.0, 0.6, 1.8), skin),
        ball(root, 0.1, Vec3::new(-0.3, 0.9, 1.7), Color::BLACK),
        ball(root, 0.1, Vec3::new(0.3, 0.9, 1.7), Color::BLACK),
    ];
    for (x, tilt) in [(-0.5, FRAC_PI_6), (0.5, -FRAC_PI_6)] {
        parts.push(DrawItem::solid(
            Primitive::Cone,
            place(
                root,
                Vec3::new(x, 1.2, 1.0),
                Quat::from_rotation_z(tilt),
                Vec3::new(0.2, 0.3, 0.2),
            ),
            skin,
        ));
    }
    let legs = Color::from_hex(HIPPO_LEGS);
    for (x, z) in [(-0.5, 0.6), (0.5, 0.6), (-0.5, -0.6), (0.5, -0.6)] {
        parts.push(column(
            root,
            0.2,
            0.2,
            0.8,
            Vec3::new(x, 0.4, z),
            Quat::IDENTITY,
            legs,
        ));
    }
    parts.push(column(
        root,
        0.1,
        0.05,
        0.8,
        Vec3::new(0.0, 0.8, -1.2),
        Quat::from_rotation_x(FRAC_PI_3),
        skin,
    ));
    parts
}

pub fn tree(root: Mat4) -> Vec<DrawItem> {
    let mut parts = vec![column(
        root,
        0.3,
        0.4,
        3.0,
        Vec3::new(0.0, 1.5, 0.0),
        Quat::IDENTITY,
        Color::from_hex(TRUNK),
    )];
    let leaves = Color::from_hex(LEAVES);
    for i in 0..3 {
        let i = i as f32;
        parts.push(ball(root, 1.0 + i * 0.3, Vec3::new(0.0, 2.5 + i * 0.5, 0.0), leaves));
    }
    parts
}

pub fn fruit(root: Mat4, radius: f32, color: Color) -> DrawItem {
    ball(root, radius, Vec3::ZERO, color).glowing(color, 0.3)
}

pub fn enemy(root: Mat4) -> Vec<DrawItem> {
    let eyes = Color::from_hex(ENEMY_EYES);
    vec![
        box_part(
            root,
            Vec3::splat(0.8),
            Vec3::new(0.0, 0.5, 0.0),
            Color::from_hex(ENEMY_BODY),
        )
        .glowing(Color::from_hex(ENEMY_GLOW), 0.3),
        ball(root, 0.15, Vec3::new(-0.2, 0.7, 0.5), eyes).glowing(eyes, 0.8),
        ball(root, 0.15, Vec3::new(0.2, 0.7, 0.5), eyes).glowing(eyes, 0.8),
    ]
}

pub fn water_shot(position: Vec3) -> DrawItem {
    let water = Color::from_hex(WATER);
    ball(root(position, 0.0), 0.2, Vec3::ZERO, water)
        .glowing(water, 0.5)
        .translucent(0.8)
}
