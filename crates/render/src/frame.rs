use crate::models;
use crate::scene::{Lighting, SceneFrame, TerrainSurface};
use grove_common::Color;
use grove_kernel::World;

const GROUND: u32 = 0x228b22;

/// Lighting for the world's current atmosphere.
pub fn lighting(world: &World) -> Lighting {
    let atmosphere = world.atmosphere();
    Lighting {
        sun_intensity: atmosphere.sun_intensity,
        point_intensity: atmosphere.green_intensity,
        fog_color: atmosphere.fog_color,
        ..Lighting::default()
    }
}

/// Describe everything visible in `world` this tick.
pub fn frame_from_world(world: &World) -> SceneFrame {
    let mut frame = SceneFrame::new(lighting(world));

    let hippo = world.hippo();
    frame.extend(models::hippo(models::root(hippo.position, hippo.yaw)));
    for tree in world.trees() {
        frame.extend(models::tree(models::root(tree.position, 0.0)));
    }
    for fruit in world.fruits() {
        frame.items.push(models::fruit(
            models::root(fruit.position, fruit.spin),
            fruit.kind.radius(),
            fruit.kind.color(),
        ));
    }
    for enemy in world.enemies() {
        frame.extend(models::enemy(models::root(enemy.position, enemy.yaw)));
    }
    for shot in world.shots() {
        frame.items.push(models::water_shot(shot.position));
    }

    let terrain = world.terrain();
    frame.terrain = Some(TerrainSurface {
        positions: terrain.positions(),
        indices: terrain.indices(),
        color: Color::from_hex(GROUND),
    });
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_assets::Primitive;
    use grove_kernel::GameConfig;

    #[test]
    fn frame_counts_match_world() {
        let world = World::new(GameConfig::default(), 9);
        let frame = frame_from_world(&world);

        let expected = 12
            + world.trees().len() * 4
            + world.fruits().len()
            + world.enemies().len() * 3
            + world.shots().len();
        assert_eq!(frame.items.len(), expected);
        // Hippo and enemy eyes plus every fruit and foliage ball.
        assert_eq!(
            frame.count(Primitive::Sphere),
            2 + world.enemies().len() * 2 + world.fruits().len() + world.trees().len() * 3
        );
        let terrain = frame.terrain.as_ref().unwrap();
        assert_eq!(terrain.positions.len(), world.terrain().vertex_count());
    }

    #[test]
    fn shots_show_up_after_firing() {
        let mut world = World::new(GameConfig::default(), 9);
        let before = frame_from_world(&world).items.len();
        world.fire();
        assert_eq!(frame_from_world(&world).items.len(), before + 1);
    }

    #[test]
    fn lighting_follows_atmosphere() {
        let mut world = World::new(GameConfig::default(), 2);
        for _ in 0..100 {
            world.step(glam::Vec3::ZERO);
        }
        let l = lighting(&world);
        assert_eq!(l.sun_intensity, world.atmosphere().sun_intensity);
        assert_eq!(l.fog_color, frame_from_world(&world).background());
    }
}
