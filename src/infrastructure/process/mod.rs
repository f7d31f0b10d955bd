pub mod launcher;

pub use launcher::{LaunchSpec, ProcessLauncher};
