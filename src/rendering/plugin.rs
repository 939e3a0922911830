//! Rendering plugin - turns the session's draw list into sprites.
//!
//! The simulation draws into a [`DrawList`] in area coordinates (origin at
//! the top-left, y down). Every frame the list is replayed as one sprite per
//! command, stacked in command order.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::collections::HashMap;

use super::canvas::{DrawCommand, DrawList};
use crate::core::RectF;
use crate::world::{ActiveSession, DataRegistry};

/// Depth step between consecutive draw commands.
const LAYER_STEP: f32 = 0.001;

/// Rendering plugin - 2D camera and the per-frame sprite pass.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .init_resource::<SheetHandles>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                draw_session.run_if(resource_exists::<ActiveSession>),
            );
    }
}

/// Pooled sprite slot, refilled from the draw list every frame.
#[derive(Component)]
struct FrameSprite;

type Slots<'w, 's> = Query<
    'w,
    's,
    (&'static mut Sprite, &'static mut Transform, &'static mut Visibility),
    With<FrameSprite>,
>;

/// Image handles by sheet id, loaded on first use.
#[derive(Resource, Default)]
struct SheetHandles(HashMap<String, Handle<Image>>);

impl SheetHandles {
    fn get(
        &mut self,
        sheet: &str,
        registry: &DataRegistry,
        asset_server: &AssetServer,
    ) -> Option<Handle<Image>> {
        if let Some(handle) = self.0.get(sheet) {
            return Some(handle.clone());
        }
        match registry.sheet(sheet) {
            Ok(def) => {
                let handle: Handle<Image> = asset_server.load(def.path.clone());
                self.0.insert(sheet.to_string(), handle.clone());
                Some(handle)
            }
            Err(e) => {
                warn!("Cannot draw: {}", e);
                None
            }
        }
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Area point to world space, with the viewport centred on the camera.
fn to_world(position: Vec2, viewport: RectF, layer: usize) -> Transform {
    Transform::from_xyz(
        position.x - viewport.width / 2.0,
        viewport.height / 2.0 - position.y,
        layer as f32 * LAYER_STEP,
    )
}

fn fill_sprite(rect: RectF, color: Color, viewport: RectF, layer: usize) -> (Sprite, Transform) {
    (
        Sprite {
            color,
            custom_size: Some(rect.size()),
            anchor: Anchor::TopLeft,
            ..default()
        },
        to_world(rect.location(), viewport, layer),
    )
}

fn blit_sprite(
    image: Handle<Image>,
    source: RectF,
    position: Vec2,
    viewport: RectF,
    layer: usize,
) -> (Sprite, Transform) {
    (
        Sprite {
            image,
            rect: Some(Rect::new(
                source.left(),
                source.top(),
                source.right(),
                source.bottom(),
            )),
            anchor: Anchor::TopLeft,
            ..default()
        },
        to_world(position, viewport, layer),
    )
}

/// Hand this frame's sprites to the pooled slots, spawning only when the
/// pool runs short. Slots left over are hidden, not despawned.
fn recycle(
    commands: &mut Commands,
    slots: &mut Slots,
    frame: impl IntoIterator<Item = (Sprite, Transform)>,
) {
    let mut free = slots.iter_mut();
    for (sprite, transform) in frame {
        match free.next() {
            Some((mut slot, mut slot_transform, mut visibility)) => {
                *slot = sprite;
                slot_transform.set_if_neq(transform);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                commands.spawn((sprite, transform, Visibility::default(), FrameSprite));
            }
        }
    }
    for (_, _, mut visibility) in free {
        visibility.set_if_neq(Visibility::Hidden);
    }
}

fn draw_session(
    mut commands: Commands,
    session: Res<ActiveSession>,
    asset_server: Res<AssetServer>,
    mut handles: ResMut<SheetHandles>,
    mut slots: Slots,
) {
    let mut list = DrawList::default();
    session.draw(&mut list);
    let viewport = session.config().viewport_rect();

    let frame = list
        .commands()
        .iter()
        .enumerate()
        .filter_map(|(layer, command)| match command {
            DrawCommand::Blit {
                sheet,
                source,
                position,
            } => handles
                .get(sheet, session.registry(), &asset_server)
                .map(|image| blit_sprite(image, *source, *position, viewport, layer)),
            DrawCommand::Fill { rect, color } => Some(fill_sprite(*rect, *color, viewport, layer)),
        });
    recycle(&mut commands, &mut slots, frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_origin_maps_to_top_left_of_the_view() {
        let viewport = RectF::new(0.0, 0.0, 800.0, 600.0);
        let transform = to_world(Vec2::ZERO, viewport, 0);
        assert_eq!(transform.translation, Vec3::new(-400.0, 300.0, 0.0));

        let transform = to_world(Vec2::new(400.0, 300.0), viewport, 10);
        assert_eq!(transform.translation.truncate(), Vec2::ZERO);
        assert!(transform.translation.z > 0.0);
    }

    #[derive(Resource)]
    struct Frame(Vec<RectF>);

    fn fill_frame(mut commands: Commands, frame: Res<Frame>, mut slots: Slots) {
        let viewport = RectF::new(0.0, 0.0, 800.0, 600.0);
        let sprites = frame
            .0
            .iter()
            .enumerate()
            .map(|(layer, rect)| fill_sprite(*rect, Color::WHITE, viewport, layer));
        recycle(&mut commands, &mut slots, sprites);
    }

    /// (pooled, visible) sprite counts.
    fn pool(app: &mut App) -> (usize, usize) {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Visibility, With<FrameSprite>>();
        let all: Vec<_> = query.iter(world).collect();
        let visible = all.iter().filter(|v| ***v != Visibility::Hidden).count();
        (all.len(), visible)
    }

    #[test]
    fn sprites_are_reused_across_frames() {
        let tile = RectF::new(0.0, 0.0, 32.0, 32.0);
        let mut app = App::new();
        app.insert_resource(Frame(vec![tile; 3]))
            .add_systems(Update, fill_frame);

        app.update();
        assert_eq!(pool(&mut app), (3, 3));

        app.world_mut().resource_mut::<Frame>().0.truncate(1);
        app.update();
        assert_eq!(pool(&mut app), (3, 1));

        app.world_mut().resource_mut::<Frame>().0 = vec![tile; 2];
        app.update();
        assert_eq!(pool(&mut app), (3, 2));

        app.world_mut().resource_mut::<Frame>().0 = vec![tile; 5];
        app.update();
        assert_eq!(pool(&mut app), (5, 5));
    }
}
