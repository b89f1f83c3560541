/// Held movement keys collapsed into one camera-space direction.

use glam::Vec3;
use orrery_engine::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// Arrows and WASD in either case.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp | Key::Char('w') | Key::Char('W') => Some(Direction::Forward),
            Key::ArrowDown | Key::Char('s') | Key::Char('S') => Some(Direction::Backward),
            Key::ArrowLeft | Key::Char('a') | Key::Char('A') => Some(Direction::Left),
            Key::ArrowRight | Key::Char('d') | Key::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is a movement key.
    pub fn key_down(&mut self, key: Key) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.press(dir);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.release(dir);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, dir: Direction) {
        *self.flag_mut(dir) = true;
    }

    pub fn release(&mut self, dir: Direction) {
        *self.flag_mut(dir) = false;
    }

    fn flag_mut(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Unit direction in camera space (forward is -Z, right is +X),
    /// or zero when nothing is held or opposite keys cancel.
    pub fn direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        let v = Vec3::new(
            axis(self.right, self.left),
            0.0,
            axis(self.backward, self.forward),
        );
        v.normalize_or_zero()
    }

    /// Any movement key held, even if they cancel out.
    pub fn is_navigating(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_map_to_the_same_directions() {
        for (key, dir) in [
            (Key::ArrowUp, Direction::Forward),
            (Key::Char('w'), Direction::Forward),
            (Key::Char('W'), Direction::Forward),
            (Key::ArrowDown, Direction::Backward),
            (Key::Char('S'), Direction::Backward),
            (Key::Char('a'), Direction::Left),
            (Key::ArrowRight, Direction::Right),
            (Key::Char('D'), Direction::Right),
        ] {
            assert_eq!(Direction::from_key(key), Some(dir));
        }
        assert_eq!(Direction::from_key(Key::Char('q')), None);
        assert_eq!(Direction::from_key(Key::Escape), None);
    }

    #[test]
    fn forward_points_down_negative_z() {
        let mut intent = InputIntent::new();
        assert!(intent.key_down(Key::ArrowUp));
        assert_eq!(intent.direction(), Vec3::NEG_Z);
        assert!(intent.key_up(Key::ArrowUp));
        assert_eq!(intent.direction(), Vec3::ZERO);
        assert!(!intent.is_navigating());
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut intent = InputIntent::new();
        intent.press(Direction::Forward);
        intent.press(Direction::Right);
        let d = intent.direction();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.x > 0.0 && d.z < 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut intent = InputIntent::new();
        for dir in [Direction::Forward, Direction::Backward, Direction::Left, Direction::Right] {
            intent.press(dir);
        }
        assert_eq!(intent.direction(), Vec3::ZERO);
        assert!(intent.is_navigating());

        intent.clear();
        assert!(!intent.is_navigating());
    }

    #[test]
    fn non_movement_keys_are_ignored() {
        let mut intent = InputIntent::new();
        assert!(!intent.key_down(Key::Space));
        assert_eq!(intent, InputIntent::default());
    }
}
