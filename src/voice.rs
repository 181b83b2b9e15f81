//! Voice selection: the recipient's configured voice, or a random one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// German voice. Valid on the device but not part of the random rotation.
pub const VOICE_DE: &str = "DE-Otto";

pub const VOICE_CATALOG: [&str; 15] = [
    "AU-Colleen",
    "AU-Jon",
    "UK-Edwin",
    "UK-Leonard",
    "UK-Mistermuggles",
    "UK-Penelope",
    "UK-Rachel",
    "UK-Shirley",
    "US-Bethany",
    "US-Billye",
    "US-Clarence",
    "US-Darleen",
    "US-Ernest",
    "US-Liberty",
    "US-Lilian",
];

pub struct VoiceSelector<R = StdRng> {
    rng: R,
}

impl VoiceSelector<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VoiceSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the override untouched if set, otherwise a catalog voice.
    ///
    /// Overrides are not checked against the catalog; the device knows
    /// voices that are not listed here.
    pub fn select(&mut self, user_override: Option<&str>) -> String {
        match user_override {
            Some(voice) if !voice.is_empty() => voice.to_string(),
            _ => {
                let index = self.rng.gen_range(0..VOICE_CATALOG.len());
                VOICE_CATALOG[index].to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        for seed in 0..20 {
            let mut selector = VoiceSelector::seeded(seed);
            assert_eq!(selector.select(Some("UK-Penelope")), "UK-Penelope");
        }
    }

    #[test]
    fn test_override_outside_catalog() {
        let mut selector = VoiceSelector::seeded(1);
        assert_eq!(selector.select(Some(VOICE_DE)), VOICE_DE);
    }

    #[test]
    fn test_empty_override_picks_random() {
        let mut selector = VoiceSelector::seeded(3);
        let voice = selector.select(Some(""));
        assert!(VOICE_CATALOG.contains(&voice.as_str()));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = VoiceSelector::seeded(42);
        let mut b = VoiceSelector::seeded(42);
        let first: Vec<String> = (0..10).map(|_| a.select(None)).collect();
        let second: Vec<String> = (0..10).map(|_| b.select(None)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|v| VOICE_CATALOG.contains(&v.as_str())));
    }

    #[test]
    fn test_covers_catalog() {
        let mut selector = VoiceSelector::seeded(7);
        let picked: std::collections::HashSet<String> =
            (0..2000).map(|_| selector.select(None)).collect();
        assert_eq!(picked.len(), VOICE_CATALOG.len());
    }
}
