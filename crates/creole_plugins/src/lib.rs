//! Bundled plugins and autoconverts for `creole_engine`.
//!
//! Everything here goes through the engine's public callback contracts: the
//! plugins emit through the shared template emitter, and the autoconverts
//! rewrite bare URLs and CamelCase words into link markup that the engine
//! then reparses. Wire them into a format by listing them in its `plugins`
//! and `autoconverts` tables.

pub use autolink::{convert_camel_case, convert_url};
pub use calendar::CALENDAR;
pub use raw::RAW;
pub use reverse::REVERSE;
pub use rot13::ROT13;
pub use toc::TOC;
pub use uppercase::UPPERCASE;

mod autolink;
mod calendar;
mod num;
mod raw;
mod reverse;
mod rot13;
mod toc;
mod uppercase;
