pub mod choreography;
pub mod constants;
pub mod geometry;
pub mod mesh;
pub mod ring;
pub mod ripple;
pub mod scene;
pub mod spring;
pub mod state;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use choreography::*;
pub use mesh::*;
pub use ring::*;
pub use ripple::*;
pub use scene::*;
pub use spring::*;
pub use state::*;
