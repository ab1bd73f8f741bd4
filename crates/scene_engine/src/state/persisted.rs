//! Flat text file carrying state between runs
//!
//! Ten whitespace-separated values in fixed order, one per line when
//! written:
//!
//! ```text
//! clear_color.r  clear_color.g  clear_color.b
//! ui_enabled (0 or 1)
//! camera_position.x  camera_position.y  camera_position.z
//! camera_front.x  camera_front.y  camera_front.z
//! ```
//!
//! Reading never fails. Values are taken one at a time, in order, until the
//! first missing or unparseable token; that value and every later one keep
//! their defaults. Non-finite numbers count as unparseable.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::foundation::math::Vec3;

/// State restored at startup and saved at shutdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedState {
    /// Background clear color
    pub clear_color: Vec3,
    /// Whether the debug overlay was showing
    pub ui_enabled: bool,
    /// Camera world position
    pub camera_position: Vec3,
    /// Camera viewing direction
    pub camera_front: Vec3,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            clear_color: Vec3::zeros(),
            ui_enabled: false,
            camera_position: Vec3::new(0.0, 0.0, 3.0),
            camera_front: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

impl PersistedState {
    /// Decode `text`, starting from `defaults`
    pub fn parse(text: &str, defaults: Self) -> Self {
        let mut state = defaults;
        let mut tokens = text.split_whitespace();

        // Each step yields None at the first missing/bad token, ending the read
        let _ = (|| -> Option<()> {
            read_vec3_into(&mut state.clear_color, &mut tokens)?;
            state.ui_enabled = read_bool(&mut tokens)?;
            read_vec3_into(&mut state.camera_position, &mut tokens)?;
            read_vec3_into(&mut state.camera_front, &mut tokens)?;
            Some(())
        })();

        state
    }

    /// Encode in the fixed field order, one value per line
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for value in self.clear_color.iter() {
            let _ = writeln!(out, "{}", value);
        }
        let _ = writeln!(out, "{}", u8::from(self.ui_enabled));
        for vector in [self.camera_position, self.camera_front] {
            for value in vector.iter() {
                let _ = writeln!(out, "{}", value);
            }
        }
        out
    }

    /// Read the state file, falling back to `defaults` when it is missing
    /// or unreadable
    pub fn load<P: AsRef<Path>>(path: P, defaults: Self) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loaded program state from {:?}", path);
                Self::parse(&text, defaults)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No program state at {:?}, using defaults", path);
                defaults
            }
            Err(e) => {
                log::warn!("Could not read program state {:?}: {}, using defaults", path, e);
                defaults
            }
        }
    }

    /// Write the state file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.encode())?;
        log::info!("Saved program state to {:?}", path);
        Ok(())
    }
}

fn read_f32<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<f32> {
    tokens.next()?.parse().ok().filter(|v: &f32| v.is_finite())
}

/// Components are stored as they are read, so a partial vector keeps the
/// values that were present
fn read_vec3_into<'a>(target: &mut Vec3, tokens: &mut impl Iterator<Item = &'a str>) -> Option<()> {
    for component in target.iter_mut() {
        *component = read_f32(tokens)?;
    }
    Some(())
}

fn read_bool<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<bool> {
    match tokens.next()? {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scene_engine_state_{}_{}", std::process::id(), name))
    }

    fn sample() -> PersistedState {
        PersistedState {
            clear_color: Vec3::new(0.1, 0.25, 0.9),
            ui_enabled: true,
            camera_position: Vec3::new(-3.5, 7.125, 12.0),
            camera_front: Vec3::new(0.6, -0.48, -0.64),
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = temp_file("round_trip.txt");
        sample().save(&path).unwrap();

        let loaded = PersistedState::load(&path, PersistedState::default());
        assert_eq!(loaded, sample());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_encoding_is_one_value_per_line() {
        let text = sample().encode();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "0.1");
        assert_eq!(lines[3], "1");
        assert_eq!(lines[6], "12");
    }

    #[test]
    fn test_missing_and_empty_files_give_defaults() {
        let missing = temp_file("does_not_exist.txt");
        let _ = fs::remove_file(&missing);
        assert_eq!(PersistedState::load(&missing, PersistedState::default()), PersistedState::default());

        let empty = temp_file("empty.txt");
        fs::write(&empty, "").unwrap();
        assert_eq!(PersistedState::load(&empty, PersistedState::default()), PersistedState::default());
        let _ = fs::remove_file(&empty);
    }

    #[test]
    fn test_truncated_file_keeps_trailing_defaults() {
        let state = PersistedState::parse("0.5 0.5 0.5\n1\n4\n5\n", PersistedState::default());
        assert_eq!(state.clear_color, Vec3::new(0.5, 0.5, 0.5));
        assert!(state.ui_enabled);
        // x and y were present; z and the whole front stay default
        assert_eq!(state.camera_position, Vec3::new(4.0, 5.0, 3.0));
        assert_eq!(state.camera_front, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let state = PersistedState::parse("0 0 0\n0\nNaN\ninf\n1\n0\n0\n-1\n", PersistedState::default());
        assert_eq!(state.camera_position, Vec3::new(0.0, 0.0, 3.0));
        assert!(state.camera_position.iter().all(|v| v.is_finite()));

        let state = PersistedState::parse("0.5 infinity 0.5\n1\n", PersistedState::default());
        assert_eq!(state.clear_color, Vec3::new(0.5, 0.0, 0.0));
        assert!(!state.ui_enabled);

        let state = PersistedState::parse("0.1 0.2 0.3\n1\n1 2 3\n-inf 0 -1\n", PersistedState::default());
        assert_eq!(state.camera_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(state.camera_front, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_corrupt_token_stops_reading() {
        let state = PersistedState::parse("0.2 0.3 0.4 yes 1 2 3 0 0 -1", PersistedState::default());
        assert_eq!(state.clear_color, Vec3::new(0.2, 0.3, 0.4));
        assert!(!state.ui_enabled);
        assert_eq!(state.camera_position, Vec3::new(0.0, 0.0, 3.0));
    }
}
