//! Service layer
//!
//! Business logic shared by the HTTP handlers: link CRUD, short-path
//! resolution, crawler detection, and the generated HTML documents.

pub mod bot;
pub mod frontend;
pub mod links;
pub mod pages;
pub mod redirect;

pub use frontend::{FrontendService, frontend_routes};
pub use links::{
    CreateLinkInput, CreatedLink, LinkService, LinkSummary, UpdateLinkInput, UpdatedLink,
};
pub use redirect::{RedirectService, redirect_routes};
