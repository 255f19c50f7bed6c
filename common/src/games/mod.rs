mod session_rng;

pub mod sos;

pub use session_rng::SessionRng;
