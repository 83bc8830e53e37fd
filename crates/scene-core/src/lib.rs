pub mod centerpiece;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod mode;
pub mod particles;
pub mod scene;
pub mod scroll;
pub mod ticker;

pub use centerpiece::*;
pub use geometry::*;
pub use input::*;
pub use mode::*;
pub use particles::*;
pub use scene::*;
pub use scroll::*;
pub use ticker::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
