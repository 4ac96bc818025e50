pub mod charts;
pub mod modal;
pub mod network;
pub mod plot_gallery;
pub mod search;
