//! Company detail modal, opened from search results and network nodes.

mod component;
mod state;

pub use component::{CompanyModal, ModalHandle};
