//! Key and mouse button codes.
//!
//! Both are thin `i32` newtypes so any code the platform layer reports can be
//! passed through unchanged. The named constants use GLFW numbering, which
//! is what the engine's input layer speaks.

use serde::{Deserialize, Serialize};

/// A keyboard key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const D0: KeyCode = KeyCode(48);
    pub const D1: KeyCode = KeyCode(49);
    pub const D2: KeyCode = KeyCode(50);
    pub const D3: KeyCode = KeyCode(51);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const E: KeyCode = KeyCode(69);
    pub const F: KeyCode = KeyCode(70);
    pub const Q: KeyCode = KeyCode(81);
    pub const R: KeyCode = KeyCode(82);
    pub const S: KeyCode = KeyCode(83);
    pub const W: KeyCode = KeyCode(87);
    pub const ESCAPE: KeyCode = KeyCode(256);
    pub const ENTER: KeyCode = KeyCode(257);
    pub const TAB: KeyCode = KeyCode(258);
    pub const RIGHT: KeyCode = KeyCode(262);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const UP: KeyCode = KeyCode(265);
    pub const LEFT_SHIFT: KeyCode = KeyCode(340);
    pub const LEFT_CONTROL: KeyCode = KeyCode(341);
    pub const LEFT_ALT: KeyCode = KeyCode(342);
}

impl From<i32> for KeyCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// A mouse button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MouseButton(pub i32);

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton(0);
    pub const RIGHT: MouseButton = MouseButton(1);
    pub const MIDDLE: MouseButton = MouseButton(2);
}

impl From<i32> for MouseButton {
    fn from(code: i32) -> Self {
        Self(code)
    }
}
