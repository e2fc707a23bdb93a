use std::collections::VecDeque;

/// ↑ ↑ ↓ ↓ ← → ← → B A, as `KeyboardEvent.key` names
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Sliding window over the most recent key presses
pub struct SecretSequence {
    code: Vec<String>,
    recent: VecDeque<String>,
}

impl Default for SecretSequence {
    fn default() -> Self {
        Self::new(&KONAMI_CODE)
    }
}

impl SecretSequence {
    pub fn new(code: &[&str]) -> Self {
        Self {
            code: code.iter().map(|key| normalize(key)).collect(),
            recent: VecDeque::with_capacity(code.len()),
        }
    }

    /// Feed one key press. Returns true when the sequence just completed;
    /// the buffer is then cleared so the next match needs the full code again.
    pub fn push(&mut self, key: &str) -> bool {
        if self.code.is_empty() {
            return false;
        }

        self.recent.push_back(normalize(key));
        if self.recent.len() > self.code.len() {
            self.recent.pop_front();
        }

        if self.recent.iter().eq(self.code.iter()) {
            self.recent.clear();
            return true;
        }
        false
    }

    /// Drop partial progress, e.g. when the desktop loses keyboard focus
    pub fn reset(&mut self) {
        self.recent.clear();
    }
}

/// Single letters compare case-insensitively (caps lock, shift)
fn normalize(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(seq: &mut SecretSequence, keys: &[&str]) -> Vec<bool> {
        keys.iter().map(|key| seq.push(key)).collect()
    }

    #[test]
    fn test_full_code_unlocks_on_last_key() {
        let mut seq = SecretSequence::default();
        let results = feed(&mut seq, &KONAMI_CODE);

        assert_eq!(results.iter().filter(|hit| **hit).count(), 1);
        assert!(results[9]);
    }

    #[test]
    fn test_leading_noise_is_ignored() {
        let mut seq = SecretSequence::default();
        feed(&mut seq, &["x", "Enter", "ArrowUp"]);

        let results = feed(&mut seq, &KONAMI_CODE);
        assert!(results[9]);
    }

    #[test]
    fn test_letters_case_insensitive() {
        let mut seq = SecretSequence::default();
        let mut keys = KONAMI_CODE.to_vec();
        keys[8] = "B";
        keys[9] = "A";

        assert!(*feed(&mut seq, &keys).last().unwrap());
    }

    #[test]
    fn test_arrow_names_are_exact() {
        let mut seq = SecretSequence::default();
        let mut keys = KONAMI_CODE.to_vec();
        keys[0] = "arrowup";

        assert!(!feed(&mut seq, &keys).into_iter().any(|hit| hit));
    }

    #[test]
    fn test_buffer_resets_after_unlock() {
        let mut seq = SecretSequence::default();
        feed(&mut seq, &KONAMI_CODE);

        // Only the tail of the code again is not enough
        assert!(!feed(&mut seq, &["b", "a"]).into_iter().any(|hit| hit));
        assert!(*feed(&mut seq, &KONAMI_CODE).last().unwrap());
    }

    #[test]
    fn test_reset_discards_partial_progress() {
        let mut seq = SecretSequence::default();
        feed(&mut seq, &KONAMI_CODE[..6]);
        seq.reset();

        assert!(!feed(&mut seq, &KONAMI_CODE[6..]).into_iter().any(|hit| hit));
        assert!(*feed(&mut seq, &KONAMI_CODE).last().unwrap());
    }

    #[test]
    fn test_interrupted_sequence_fails() {
        let mut seq = SecretSequence::default();
        let mut keys = KONAMI_CODE.to_vec();
        keys.insert(5, "Shift");

        assert!(!feed(&mut seq, &keys).into_iter().any(|hit| hit));
    }
}
