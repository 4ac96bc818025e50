mod component;
mod controller;

pub use component::CompanySearch;
