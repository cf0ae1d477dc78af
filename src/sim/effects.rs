//! Drifting circle effects - the two storable object kinds
//!
//! Both kinds share the same motion model and payload layout; they differ
//! only in colour and type id.

use std::any::Any;
use std::io;

use glam::Vec2;

use super::object::{GameObject, ObjectTypeId, Storable};
use crate::consts::{EFFECT_LIFE, EFFECT_RADIUS};
use crate::persistence::{StateReader, StateWriter};
use crate::renderer::{Canvas, Color};

/// Position, per-frame velocity and remaining life of an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Frames left before expiry
    pub life: i32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: EFFECT_LIFE,
        }
    }
}

impl Motion {
    pub fn new(pos: Vec2, velocity: Vec2, life: i32) -> Self {
        Self { pos, velocity, life }
    }

    /// Step once; true while life remains
    pub fn advance(&mut self) -> bool {
        self.pos += self.velocity;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Payload: pos, velocity, life (20 bytes)
    pub fn write(&self, sink: &mut StateWriter<'_>) -> io::Result<()> {
        sink.write_vec2(self.pos)?;
        sink.write_vec2(self.velocity)?;
        sink.write_i32(self.life)
    }

    pub fn read(&mut self, source: &mut StateReader<'_>) -> io::Result<()> {
        self.pos = source.read_vec2()?;
        self.velocity = source.read_vec2()?;
        self.life = source.read_i32()?;
        Ok(())
    }
}

macro_rules! effect_kind {
    ($(#[$meta:meta])* $name:ident, id = $id:expr, color = $color:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            id: ObjectTypeId,
            motion: Motion,
        }

        impl $name {
            /// Construct directly with known motion (not via the registry)
            pub fn with_motion(motion: Motion) -> Self {
                Self {
                    id: <Self as Storable>::TYPE_ID,
                    motion,
                }
            }

            pub fn motion(&self) -> &Motion {
                &self.motion
            }
        }

        impl Storable for $name {
            const TYPE_ID: ObjectTypeId = ObjectTypeId($id);
            const NAME: &'static str = stringify!($name);

            fn blank(id: ObjectTypeId) -> Self {
                Self {
                    id,
                    motion: Motion::default(),
                }
            }
        }

        impl GameObject for $name {
            fn identity(&self) -> ObjectTypeId {
                self.id
            }

            fn update(&mut self) -> bool {
                self.motion.advance()
            }

            fn draw(&self, canvas: &mut dyn Canvas) {
                canvas.circle(self.motion.pos, EFFECT_RADIUS, $color);
            }

            fn write_state(&self, sink: &mut StateWriter<'_>) -> io::Result<()> {
                self.motion.write(sink)
            }

            fn read_state(&mut self, source: &mut StateReader<'_>) -> io::Result<()> {
                self.motion.read(source)
            }

            fn launch(&mut self, origin: Vec2, velocity: Vec2) {
                self.motion = Motion::new(origin, velocity, EFFECT_LIFE);
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

effect_kind!(
    /// Red drifting circle
    EffectRed,
    id = 1,
    color = Color::RED
);

effect_kind!(
    /// Blue drifting circle
    EffectBlue,
    id = 2,
    color = Color::BLUE
);

/// Motion of any effect handle, if it is one
pub fn motion_of(object: &dyn GameObject) -> Option<&Motion> {
    let any = object.as_any();
    any.downcast_ref::<EffectRed>()
        .map(EffectRed::motion)
        .or_else(|| any.downcast_ref::<EffectBlue>().map(EffectBlue::motion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    #[test]
    fn test_update_moves_and_expires() {
        let mut effect = EffectRed::with_motion(Motion::new(Vec2::ZERO, Vec2::new(1.0, 2.0), 2));

        assert!(effect.update());
        assert_eq!(effect.motion().pos, Vec2::new(1.0, 2.0));
        assert_eq!(effect.motion().life, 1);

        assert!(!effect.update());
        assert_eq!(effect.motion().life, 0);
    }

    #[test]
    fn test_blank_is_default_initialised() {
        let blank = EffectBlue::blank(EffectBlue::TYPE_ID);
        assert_eq!(blank.identity(), ObjectTypeId(2));
        assert_eq!(*blank.motion(), Motion::default());
        assert_eq!(blank.motion().life, EFFECT_LIFE);
    }

    #[test]
    fn test_state_round_trip_overwrites_blank() {
        let original = EffectBlue::with_motion(Motion::new(
            Vec2::new(5.0, 5.0),
            Vec2::new(1.0, 0.0),
            3,
        ));

        let mut buf = Vec::new();
        let mut sink = StateWriter::new(&mut buf);
        original.write_state(&mut sink).unwrap();
        assert_eq!(sink.bytes_written(), 20);

        let mut restored = EffectBlue::blank(EffectBlue::TYPE_ID);
        let mut source = buf.as_slice();
        restored
            .read_state(&mut StateReader::new(&mut source))
            .unwrap();
        assert_eq!(restored.motion(), original.motion());
        assert!(source.is_empty());
    }

    #[test]
    fn test_draw_uses_kind_colour() {
        let red = EffectRed::with_motion(Motion::new(Vec2::new(3.0, 4.0), Vec2::ZERO, 10));
        let blue = EffectBlue::with_motion(Motion::default());

        let mut list = DrawList::default();
        red.draw(&mut list);
        blue.draw(&mut list);

        assert_eq!(list.len(), 2);
        assert_eq!(list.circles()[0].center, Vec2::new(3.0, 4.0));
        assert_eq!(list.circles()[0].color, Color::RED);
        assert_eq!(list.circles()[1].color, Color::BLUE);
        assert_eq!(list.circles()[1].radius, EFFECT_RADIUS);
    }

    #[test]
    fn test_launch_resets_life() {
        let mut effect = EffectRed::with_motion(Motion::new(Vec2::ONE, Vec2::ZERO, 1));
        effect.launch(Vec2::new(400.0, 300.0), Vec2::new(0.0, 1.0));

        assert_eq!(effect.motion().pos, Vec2::new(400.0, 300.0));
        assert_eq!(effect.motion().velocity, Vec2::new(0.0, 1.0));
        assert_eq!(effect.motion().life, EFFECT_LIFE);
    }

    #[test]
    fn test_motion_of_downcasts_both_kinds() {
        let red: Box<dyn GameObject> = Box::new(EffectRed::with_motion(Motion::default()));
        let blue: Box<dyn GameObject> = Box::new(EffectBlue::with_motion(Motion::new(
            Vec2::ONE,
            Vec2::ONE,
            7,
        )));
        assert_eq!(motion_of(red.as_ref()).map(|m| m.life), Some(EFFECT_LIFE));
        assert_eq!(motion_of(blue.as_ref()).map(|m| m.life), Some(7));
    }
}
