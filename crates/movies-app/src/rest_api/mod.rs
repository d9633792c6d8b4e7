pub mod movie;
mod paging;

pub use paging::Paging;
