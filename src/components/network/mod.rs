mod component;
mod render;
mod state;
mod types;

pub use component::NetworkPanel;
pub use types::GraphSnapshot;
