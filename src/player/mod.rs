//! Player module: first-person camera and sprint stamina.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`camera`] | Yaw/pitch look, WASD integration, arena clamp, eye-height pin |
//! | [`stamina`] | Sprint pool: drain while sprinting, recover otherwise |

pub mod camera;
pub mod stamina;

pub use camera::{CameraView, PlayerCamera};
pub use stamina::Stamina;
