pub mod field;
pub mod institution;
pub mod member;
pub mod official;
pub mod session;

pub use institution::*;
pub use member::*;
pub use official::*;
pub use session::*;
