//! Chapter resolution, content composition, and page rendering for VoyageLog.
//!
//! Everything here is pure and synchronous: given a loaded chapter list and
//! the current URL, [`page::navigate`] resolves the chapter and renders the
//! page fragment.

pub mod composer;
pub mod location;
pub mod page;
pub mod render;
pub mod resolver;

pub use composer::{ComposedContent, compose, escape_html, nl2p};
pub use location::{chapter_href, chapter_id, parse_location};
pub use page::{PageView, ViewKind, navigate};
pub use render::RenderOptions;
pub use resolver::{MatchRule, Resolution, ResolvedChapter, resolve};
