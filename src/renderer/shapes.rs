//! Balloon and particle drawing
//!
//! All shading is derived from the balloon's base color, so two balloons of
//! the same kind and color always draw identically.

use glam::Vec2;

use super::{Fill, Font, RadialGradient, Surface};
use crate::color::Rgb;
use crate::sim::{Balloon, BalloonKind, Particle, ParticleShape};

const STRING_COLOR: Rgb = Rgb::from_hex(0x333333);
const GOLD_HIGHLIGHT: Rgb = Rgb::from_hex(0xFFFACD);
const GOLD_RIM: Rgb = Rgb::from_hex(0xFFA500);
const GOLD_GLOW: Rgb = Rgb::from_hex(0xFFD700);

/// Body gradient for a balloon whose center is drawn at `center`
pub fn balloon_gradient(balloon: &Balloon, center: Vec2) -> RadialGradient {
    let r = balloon.radius;
    let gradient = RadialGradient::new(center - Vec2::splat(r * 0.3), r * 0.1, center, r);
    let color = balloon.color;

    match balloon.kind {
        BalloonKind::Gold => gradient
            .stop(0.0, GOLD_HIGHLIGHT)
            .stop(0.4, color)
            .stop(0.8, GOLD_RIM)
            .stop(1.0, color.darken(30.0)),
        // Bombs fade to black at the rim
        BalloonKind::Bomb => gradient
            .stop(0.0, color.lighten(20.0))
            .stop(0.7, color)
            .stop(1.0, Rgb::BLACK),
        BalloonKind::Normal => gradient
            .stop(0.0, color.lighten(40.0))
            .stop(0.7, color)
            .stop(1.0, color.darken(20.0)),
    }
}

/// Draw a balloon, or its pop effect once popped
///
/// With `motion` off the balloon is drawn without sway and gold balloons
/// keep a steady outline.
pub fn draw_balloon<S: Surface + ?Sized>(surface: &mut S, balloon: &Balloon, motion: bool) {
    if balloon.popped {
        if balloon.pop_progress < 1.0 {
            draw_pop_effect(surface, balloon);
        }
        return;
    }

    let r = balloon.radius;
    let sway = if motion { balloon.wobble_offset() } else { 0.0 };
    let center = balloon.pos + Vec2::new(sway, 0.0);

    // String hangs from the knot to a fixed anchor under the unswayed center
    surface.stroke_line(
        Vec2::new(center.x, center.y + r),
        Vec2::new(balloon.pos.x, balloon.pos.y + r + balloon.string_length),
        STRING_COLOR.into(),
        2.0,
    );

    surface.fill_circle(center, r, &Fill::Radial(balloon_gradient(balloon, center)));

    // Highlight
    surface.fill_circle(
        center - Vec2::splat(r * 0.25),
        r * 0.2,
        &Rgb::WHITE.with_alpha(0.6).into(),
    );

    if let Some(label) = &balloon.label {
        surface.fill_text(
            label,
            center,
            Font { size: r * 0.8, bold: false },
            Rgb::WHITE.with_alpha(0.6),
        );
    }

    // Knot
    surface.fill_ellipse(
        Vec2::new(center.x, center.y + r),
        Vec2::new(r * 0.15, r * 0.25),
        balloon.color.darken(30.0).into(),
    );

    if balloon.kind == BalloonKind::Gold {
        let alpha = if motion {
            0.3 + (balloon.wobble * 2.0).sin() * 0.2
        } else {
            0.3
        };
        surface.save();
        surface.set_alpha(alpha);
        surface.stroke_circle(center, r + 5.0, GOLD_GLOW.into(), 3.0);
        surface.restore();
    }
}

/// Expanding, fading ring with "POP!" text
pub fn draw_pop_effect<S: Surface + ?Sized>(surface: &mut S, balloon: &Balloon) {
    let t = balloon.pop_progress;
    let scale = 1.0 + t * 0.5;

    surface.save();
    surface.set_alpha(1.0 - t);
    surface.stroke_circle(balloon.pos, balloon.radius * scale, balloon.color.into(), 3.0);
    surface.fill_text(
        "POP!",
        balloon.pos,
        Font { size: balloon.radius, bold: true },
        balloon.color.into(),
    );
    surface.restore();
}

/// Draw a particle, faded by its remaining life
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, particle: &Particle) {
    surface.save();
    surface.set_alpha(particle.life.max(0.0));
    surface.transform(particle.pos, particle.rotation);

    match particle.shape {
        ParticleShape::Circle => {
            surface.fill_circle(Vec2::ZERO, particle.size, &particle.color.into());
        }
        ParticleShape::Square => {
            let half = Vec2::splat(particle.size / 2.0);
            surface.fill_rect(-half, Vec2::splat(particle.size), particle.color.into());
        }
    }

    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, DrawList};
    use crate::sim::spawner::{BOMB_COLOR, GOLD_COLOR};

    fn balloon(kind: BalloonKind, color: Rgb) -> Balloon {
        Balloon::new(1, Vec2::new(400.0, 300.0), 45.0, color, 1.8, kind, 45)
    }

    fn gradient_stops(list: &DrawList) -> Vec<(f32, Rgb)> {
        list.cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Circle { fill: Fill::Radial(g), .. } => {
                    Some(g.stops.iter().map(|s| (s.offset, s.color)).collect())
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_normal_gradient() {
        let base = Rgb::from_hex(0x45B7D1);
        let mut list = DrawList::new(800.0, 600.0);
        draw_balloon(&mut list, &balloon(BalloonKind::Normal, base), true);
        assert_eq!(
            gradient_stops(&list),
            vec![(0.0, base.lighten(40.0)), (0.7, base), (1.0, base.darken(20.0))]
        );
    }

    #[test]
    fn test_bomb_gradient_ends_black() {
        let mut list = DrawList::new(800.0, 600.0);
        let mut b = balloon(BalloonKind::Bomb, BOMB_COLOR);
        b.label = Some("💣".into());
        draw_balloon(&mut list, &b, true);
        let stops = gradient_stops(&list);
        assert_eq!(stops.last(), Some(&(1.0, Rgb::BLACK)));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["💣"]);
    }

    #[test]
    fn test_gold_has_outline() {
        let mut list = DrawList::new(800.0, 600.0);
        draw_balloon(&mut list, &balloon(BalloonKind::Gold, GOLD_COLOR), true);
        assert_eq!(gradient_stops(&list).len(), 4);
        assert!(list.cmds.iter().any(|c| matches!(
            c,
            DrawCmd::CircleOutline { radius, .. } if *radius == 50.0
        )));
        assert!(list.is_balanced());
    }

    #[test]
    fn test_gold_pulse_is_steady_without_motion() {
        let mut b = balloon(BalloonKind::Gold, GOLD_COLOR);
        b.wobble = 1.0;
        let mut list = DrawList::new(800.0, 600.0);
        draw_balloon(&mut list, &b, false);
        assert!(list.cmds.contains(&DrawCmd::Alpha(0.3)));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let b = balloon(BalloonKind::Normal, Rgb::from_hex(0xBB8FCE));
        let mut a = DrawList::new(800.0, 600.0);
        let mut c = DrawList::new(800.0, 600.0);
        draw_balloon(&mut a, &b, true);
        draw_balloon(&mut c, &b, true);
        assert_eq!(a.cmds, c.cmds);
    }

    #[test]
    fn test_pop_effect() {
        let mut b = balloon(BalloonKind::Normal, Rgb::from_hex(0xFF6B6B));
        b.pop();
        b.pop_progress = 0.5;
        let mut list = DrawList::new(800.0, 600.0);
        draw_balloon(&mut list, &b, true);
        assert!(list.cmds.contains(&DrawCmd::Alpha(0.5)));
        assert!(list.cmds.iter().any(|c| matches!(
            c,
            DrawCmd::CircleOutline { radius, .. } if (*radius - 56.25).abs() < 1e-4
        )));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["POP!"]);

        // Finished animation draws nothing
        b.pop_progress = 1.0;
        let mut list = DrawList::new(800.0, 600.0);
        draw_balloon(&mut list, &b, true);
        assert!(list.cmds.is_empty());
    }

    #[test]
    fn test_particle_shapes() {
        let mut p = Particle {
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::ZERO,
            color: Rgb::WHITE,
            size: 4.0,
            life: 0.5,
            decay: 0.02,
            rotation: 1.0,
            rotation_speed: 0.0,
            shape: ParticleShape::Square,
        };
        let mut list = DrawList::new(800.0, 600.0);
        draw_particle(&mut list, &p);
        assert!(list.cmds.contains(&DrawCmd::Rect {
            min: Vec2::splat(-2.0),
            size: Vec2::splat(4.0),
            color: Rgb::WHITE.into(),
        }));
        assert!(list.is_balanced());

        p.shape = ParticleShape::Circle;
        let mut list = DrawList::new(800.0, 600.0);
        draw_particle(&mut list, &p);
        assert!(list.cmds.iter().any(|c| matches!(c, DrawCmd::Circle { radius, .. } if *radius == 4.0)));
    }
}
