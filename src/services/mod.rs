pub mod auth_service;
pub mod institution_service;
pub mod intake_service;
pub mod search_service;
pub mod view_router;

pub use auth_service::*;
pub use institution_service::*;
pub use intake_service::*;
pub use search_service::*;
pub use view_router::*;
