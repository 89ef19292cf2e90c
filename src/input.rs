//! Keyboard camera controls
//!
//! Stdin is switched to non-canonical, no-echo, non-blocking mode so keys
//! can be polled once per frame without waiting for Enter.

use std::io;
use log::debug;
use crate::config::ControlsConfig;
use crate::rasterizer::CameraState;

/// A camera action triggered by one key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Lateral(f64),
    Vertical(f64),
    Forward(f64),
    Turn(f64),
    Tilt(f64),
    Quit,
}

impl Command {
    /// Map a key byte to its command
    pub fn from_key(key: u8, controls: &ControlsConfig) -> Option<Command> {
        let m = controls.move_step;
        let t = controls.turn_step;
        match key {
            b'a' => Some(Command::Lateral(-m)),
            b'd' => Some(Command::Lateral(m)),
            b'w' => Some(Command::Vertical(m)),
            b's' => Some(Command::Vertical(-m)),
            b'q' => Some(Command::Forward(m)),
            b'z' => Some(Command::Forward(-m)),
            b'e' => Some(Command::Turn(t)),
            b'r' => Some(Command::Turn(-t)),
            b'f' => Some(Command::Tilt(-t)),
            b'v' => Some(Command::Tilt(t)),
            b'x' => Some(Command::Quit),
            _ => None,
        }
    }

    /// Apply to the camera. Returns false for [`Command::Quit`].
    pub fn apply(self, camera: &mut CameraState) -> bool {
        match self {
            Command::Lateral(d) => camera.move_lateral(d),
            Command::Vertical(d) => camera.move_vertical(d),
            Command::Forward(d) => camera.move_forward(d),
            Command::Turn(a) => camera.turn(a),
            Command::Tilt(a) => camera.tilt(a),
            Command::Quit => return false,
        }
        true
    }
}

/// Apply every key in order; false once a quit key is seen
pub fn apply_keys(keys: &[u8], controls: &ControlsConfig, camera: &mut CameraState) -> bool {
    keys.iter()
        .filter_map(|&k| Command::from_key(k, controls))
        .all(|cmd| cmd.apply(camera))
}

/// Stdin in polling mode; restores the original settings on drop
pub struct RawTerminal {
    #[cfg(unix)]
    original: Option<libc::termios>,
}

impl RawTerminal {
    #[cfg(unix)]
    pub fn enable() -> io::Result<Self> {
        let fd = libc::STDIN_FILENO;
        if unsafe { libc::isatty(fd) } == 0 {
            debug!("stdin is not a tty, leaving terminal mode alone");
            return Ok(Self { original: None });
        }

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            let original = termios;

            termios.c_lflag &= !(libc::ICANON | libc::ECHO);
            // VMIN=0, VTIME=0: read() returns immediately
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSANOW, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            debug!("Terminal switched to polling mode");
            Ok(Self { original: Some(original) })
        }
    }

    #[cfg(not(unix))]
    pub fn enable() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Drain all pending key bytes
    #[cfg(unix)]
    pub fn poll_keys(&self) -> io::Result<Vec<u8>> {
        let mut keys = Vec::new();
        if self.original.is_none() {
            return Ok(keys);
        }
        let mut buf = [0u8; 64];
        loop {
            let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
            if n == 0 {
                break;
            }
            keys.extend_from_slice(&buf[..n as usize]);
        }
        Ok(keys)
    }

    #[cfg(not(unix))]
    pub fn poll_keys(&self) -> io::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[cfg(unix)]
impl Drop for RawTerminal {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            // Best effort; nothing useful to do if this fails
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &original);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_key_map() {
        let c = ControlsConfig::default();
        assert_eq!(Command::from_key(b'a', &c), Some(Command::Lateral(-0.2)));
        assert_eq!(Command::from_key(b'w', &c), Some(Command::Vertical(0.2)));
        assert_eq!(Command::from_key(b'z', &c), Some(Command::Forward(-0.2)));
        assert_eq!(Command::from_key(b'e', &c), Some(Command::Turn(0.02)));
        assert_eq!(Command::from_key(b'f', &c), Some(Command::Tilt(-0.02)));
        assert_eq!(Command::from_key(b'x', &c), Some(Command::Quit));
        assert_eq!(Command::from_key(b'?', &c), None);
        assert_eq!(Command::from_key(b'A', &c), None);
    }

    #[test]
    fn test_apply_keys_moves_camera() {
        let c = ControlsConfig::default();
        let mut cam = CameraState::new(3.0);
        assert!(apply_keys(b"ddqq", &c, &mut cam));
        assert!((cam.position - Vec3::new(0.4, 0.4, 0.0)).length_squared() < EPS);

        assert!(apply_keys(b"ee r", &c, &mut cam));
        assert!((cam.xangle - 0.02).abs() < EPS);
    }

    #[test]
    fn test_quit_stops_processing() {
        let c = ControlsConfig::default();
        let mut cam = CameraState::new(3.0);
        assert!(!apply_keys(b"dxd", &c, &mut cam));
        assert!((cam.position.x - 0.2).abs() < EPS);
    }

    #[test]
    fn test_custom_steps() {
        let c = ControlsConfig { move_step: 1.0, turn_step: 0.5 };
        let mut cam = CameraState::new(3.0);
        assert!(apply_keys(b"wv", &c, &mut cam));
        assert!((cam.position.z - 1.0).abs() < EPS);
        assert!((cam.zangle - 0.5).abs() < EPS);
    }
}
