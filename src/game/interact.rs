//! Click interaction resolver
//!
//! One click, one ray, at most one action. The ray runs from the eye along
//! the view direction; the nearest thing it hits wins, with static
//! architecture occluding entities behind it, so there is no smashing
//! bottles through walls. Dispatch is an exhaustive match on what was hit.

use crate::world::Layout;
use super::components::EntityKind;
use super::event::HintEvent;
use super::movement::Player;
use super::ray::{ray_nearest, Ray};
use super::session::{GameSession, HINT_SECS, MSG_NEED_HAMMER};

/// How far the player can reach with a click
pub const REACH: f32 = 4.0;

/// What a click resolved to. Returned for the caller's benefit (tests,
/// debug overlay); all state changes happen through the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    PickedUpHammer,
    Door,
    Smashed,
    Nothing,
}

/// Resolve a click from the player's current view.
pub fn resolve_click(session: &mut GameSession, layout: &Layout, player: &Player) -> ClickAction {
    let ray = Ray::new(player.position, player.look_dir());
    resolve_ray(session, layout, &ray)
}

/// Resolve a click along an explicit ray.
pub fn resolve_ray(session: &mut GameSession, layout: &Layout, ray: &Ray) -> ClickAction {
    let targets = session.world.click_targets();

    // Nearest entity hit
    let entity_hit = ray_nearest(ray, targets.iter().map(|(_, aabb)| aabb))
        .map(|(i, hit)| (targets[i].0, hit.t));

    // Nearest static surface; anything behind it is unreachable
    let wall_t = ray_nearest(ray, layout.slabs.iter().map(|s| &s.aabb)).map(|(_, hit)| hit.t);

    let Some((entity, t)) = entity_hit else {
        return ClickAction::Nothing;
    };
    if t > REACH {
        return ClickAction::Nothing;
    }
    if let Some(wall_t) = wall_t {
        if wall_t < t {
            return ClickAction::Nothing; // Occluded by architecture
        }
    }

    let Some(kind) = session.world.kinds.get(entity).copied() else {
        return ClickAction::Nothing;
    };

    match kind {
        EntityKind::Hammer => {
            session.pick_up_hammer(entity);
            ClickAction::PickedUpHammer
        }
        EntityKind::Door { .. } => {
            session.interact_door(entity, layout);
            ClickAction::Door
        }
        EntityKind::Breakable { .. } => {
            if session.has_hammer {
                session.smash(entity);
                ClickAction::Smashed
            } else {
                session.events.hints.send(HintEvent {
                    text: MSG_NEED_HAMMER,
                    seconds: HINT_SECS,
                });
                ClickAction::Nothing
            }
        }
        // Statics never appear among click targets, but the dispatch
        // stays exhaustive
        EntityKind::Static => ClickAction::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec3;
    use crate::game::components::PropKind;
    use crate::game::session::RoomPhase;
    use crate::world::standard_rooms;

    fn fresh() -> (GameSession, Layout) {
        let rooms = standard_rooms();
        let layout = Layout::new(rooms.len());
        (GameSession::new(rooms, &layout, 77), layout)
    }

    fn aim(from: macroquad::prelude::Vec3, at: macroquad::prelude::Vec3) -> Ray {
        Ray::new(from, at - from)
    }

    #[test]
    fn test_click_hammer_picks_it_up() {
        let (mut session, layout) = fresh();
        let rest = layout.hammer_rest.center;

        let action = resolve_ray(&mut session, &layout, &aim(vec3(0.0, 1.6, 3.0), rest));

        assert_eq!(action, ClickAction::PickedUpHammer);
        assert!(session.has_hammer);
    }

    #[test]
    fn test_click_door_with_hammer_activates_room() {
        let (mut session, layout) = fresh();
        resolve_ray(
            &mut session,
            &layout,
            &aim(vec3(0.0, 1.6, 3.0), layout.hammer_rest.center),
        );

        let leaf = layout.doorways[0].leaf.center;
        let action = resolve_ray(&mut session, &layout, &aim(vec3(0.0, 1.6, -2.0), leaf));

        assert_eq!(action, ClickAction::Door);
        assert!(session.world.door_open(1));
        assert!(matches!(session.phase, RoomPhase::Active { .. }));
    }

    #[test]
    fn test_click_door_without_hammer_hints() {
        let (mut session, layout) = fresh();
        let leaf = layout.doorways[0].leaf.center;

        let action = resolve_ray(&mut session, &layout, &aim(vec3(0.0, 1.6, -2.0), leaf));

        assert_eq!(action, ClickAction::Door);
        assert!(!session.world.door_open(1));
        assert_eq!(session.events.hints.len(), 1);
    }

    #[test]
    fn test_click_prop_in_range_smashes() {
        let (mut session, layout) = fresh();
        session.has_hammer = true;
        // Plant a known prop instead of opening a room, so the geometry
        // of the test stays fixed
        let prop = session.world.spawn_prop(PropKind::Vase, 1, vec3(0.0, 0.4, 0.0));
        session.phase = RoomPhase::Active {
            seconds_left: 60,
            tick_accum: 0.0,
            remaining: 1,
        };

        let action = resolve_ray(&mut session, &layout, &aim(vec3(0.0, 1.6, 2.0), vec3(0.0, 0.4, 0.0)));

        assert_eq!(action, ClickAction::Smashed);
        assert!(!session.world.is_alive(prop));
        assert_eq!(session.score, PropKind::Vase.point_value());
    }

    #[test]
    fn test_click_prop_without_hammer_hints() {
        let (mut session, layout) = fresh();
        let prop = session.world.spawn_prop(PropKind::Bottle, 1, vec3(0.0, 0.35, 0.0));
        session.phase = RoomPhase::Active {
            seconds_left: 60,
            tick_accum: 0.0,
            remaining: 1,
        };

        let action = resolve_ray(
            &mut session,
            &layout,
            &aim(vec3(0.0, 1.6, 2.0), vec3(0.0, 0.35, 0.0)),
        );

        assert_eq!(action, ClickAction::Nothing);
        assert!(session.world.is_alive(prop));
        assert!(session
            .events
            .hints
            .iter()
            .any(|h| h.text == MSG_NEED_HAMMER));
    }

    #[test]
    fn test_click_beyond_reach_does_nothing() {
        let (mut session, layout) = fresh();
        session.has_hammer = true;
        let prop = session.world.spawn_prop(PropKind::Vase, 1, vec3(0.0, 0.4, -3.0));
        session.phase = RoomPhase::Active {
            seconds_left: 60,
            tick_accum: 0.0,
            remaining: 1,
        };

        // Just over five units away
        let action = resolve_ray(
            &mut session,
            &layout,
            &aim(vec3(0.0, 1.6, 2.3), vec3(0.0, 0.4, -3.0)),
        );

        assert_eq!(action, ClickAction::Nothing);
        assert!(session.world.is_alive(prop));
    }

    #[test]
    fn test_wall_occludes_prop_behind_it() {
        let (mut session, layout) = fresh();
        session.has_hammer = true;
        // A prop just past the first dividing wall (z = -5), off to the
        // side so the doorway opening doesn't expose it
        let prop = session.world.spawn_prop(PropKind::Vase, 1, vec3(3.0, 0.9, -5.4));
        session.phase = RoomPhase::Active {
            seconds_left: 60,
            tick_accum: 0.0,
            remaining: 1,
        };

        let action = resolve_ray(
            &mut session,
            &layout,
            &aim(vec3(3.0, 1.6, -2.0), vec3(3.0, 0.9, -5.4)),
        );

        assert_eq!(action, ClickAction::Nothing);
        assert!(session.world.is_alive(prop));
    }

    #[test]
    fn test_click_into_empty_space_does_nothing() {
        let (mut session, layout) = fresh();
        let action = resolve_ray(
            &mut session,
            &layout,
            &Ray::new(vec3(0.0, 1.6, 3.0), vec3(0.0, 1.0, 0.0)),
        );
        assert_eq!(action, ClickAction::Nothing);
        assert!(session.events.hints.is_empty());
    }
}
