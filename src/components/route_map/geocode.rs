use super::types::Station;

/// Base coordinate the synthesized positions spread around.
pub const BASE_LAT: f64 = -10.0464;
pub const BASE_LNG: f64 = -73.0228;

/// Width of the symmetric offset window, in decimal degrees.
pub const SPREAD_DEG: f64 = 0.15;

/// 32-bit rolling hash over the UTF-16 code units of `name`, with wrapping
/// signed arithmetic. Empty input hashes to 0.
fn name_hash(name: &str) -> i32 {
	let mut hash: i32 = 0;
	for unit in name.encode_utf16() {
		hash = (unit as i32).wrapping_add((hash << 5).wrapping_sub(hash));
	}
	hash
}

/// Sine-based scrambler mapping an integer seed into `[0, 1)`.
fn pseudo_random(seed: i32) -> f64 {
	let x = (seed as f64).sin() * 10000.0;
	x - x.floor()
}

/// Derive a stable display coordinate from a station name.
///
/// Pure function of the name alone: the same name yields bitwise-identical
/// coordinates on every call, so a station lands on the same spot across
/// reloads. The result is demonstration placement, not real geocoding.
pub fn geocode(name: &str) -> (f64, f64) {
	let hash = name_hash(name);
	let lat = BASE_LAT + (pseudo_random(hash) - 0.5) * SPREAD_DEG;
	let lng = BASE_LNG + (pseudo_random(hash.wrapping_add(1)) - 0.5) * SPREAD_DEG;
	(lat, lng)
}

impl Station {
	/// Build a station by geocoding its name.
	pub fn positioned(name: impl Into<String>) -> Self {
		let name = name.into();
		let (lat, lng) = geocode(&name);
		Self { name, lat, lng }
	}
}
