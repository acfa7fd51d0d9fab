//! HTML template rendering handlers.

mod index;
mod redirect;

pub use index::index_handler;
pub use redirect::redirect_handler;
