// Keyboard input the backend cares about.
// Window gestures come through the chrome events; this only watches for
// the secret sequence that unlocks the hidden travel log.

pub mod secret;

pub use secret::{SecretSequence, KONAMI_CODE};
