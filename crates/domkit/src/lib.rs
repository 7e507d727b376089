//! domkit - DOM convenience extensions
//!
//! Convenience operations for the domkit host DOM: selection shortcuts,
//! class and attribute helpers, structural mutation, cross-platform event
//! dispatch and vendor-prefixed style resolution.
//!
//! Operations live in a [`CapabilityRegistry`] keyed by host category.
//! [`install`] builds the process-wide registry once for a [`Platform`];
//! every name the platform already provides natively is kept as is. The
//! handles and extension traits in this crate resolve their behavior through
//! that registry.
//!
//! ```ignore
//! use domkit::{DocumentExt, NodeListExt};
//!
//! let mut doc = domkit_html::parse("<div id=d><span></span></div>")?;
//! let spans = doc.ext().find_all("div#d span")?;
//! spans.each(|span, index| println!("{index}: {span:?}"));
//! ```

mod attributes;
mod capability;
mod class_list;
mod device;
mod document;
mod events;
mod handle;
mod installer;
mod node_list;
mod render;
mod style;
mod traversal;

pub use attributes::{AttrOps, DataOps, RemoveAttrFn, RemoveDataFn, data_key};
pub use capability::{Capability, CapabilityRegistry, Category, Origin, UnboundNative};
pub use class_list::{ClassMutFn, HasClassFn};
pub use device::{DeviceTargetFn, EventExt};
pub use document::{FindAllFn, FindFn, FragmentFn};
pub use events::{OffFn, OnFn, ReadyFn, TriggerFn};
pub use handle::{DocumentExt, DocumentHandle, ElementHandle, WindowExt, WindowHandle};
pub use installer::{CAPABILITY_VERSION, capabilities, install};
pub use node_list::{EachFn, GetFn, NodeListExt};
pub use render::{RenderFn, StrExt};
pub use style::{CssOps, StyleExt, StyleSetFn, VENDOR_PREFIXES, parse_int};
pub use traversal::{ClosestFn, InsertFn, MatchesFn};

pub use domkit_dom::{self as dom, Platform};
pub use domkit_html as html;

use domkit_dom::DomError;
use domkit_html::HtmlError;

/// Extension errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Html(#[from] HtmlError),

    #[error("invalid JSON in data attribute: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for extension operations
pub type Result<T> = std::result::Result<T, Error>;
