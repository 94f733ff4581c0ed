//! # Water Can Pages
//!
//! The two page surfaces of the Water Can usage client.
//!
//! A user page looks up how often a can has been used; an admin page sets the
//! count. Each handler runs one request and writes one result into its
//! region, replacing what was there. Validation failures render a message
//! without touching the network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use watercan_core::client::WaterCanClient;
//! use watercan_pages::page::{FieldId, Key, Page, RegionId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WaterCanClient::builder()
//!         .endpoint("http://127.0.0.1:7000")
//!         .build()?;
//!
//!     let mut page = Page::admin(client);
//!     page.attach_handlers();
//!
//!     page.set_value(FieldId::AdminCanId, "WC-1001");
//!     page.set_value(FieldId::AdminCount, "0");
//!     page.key_press(FieldId::AdminCount, Key::Enter).await;
//!
//!     println!("{}", page.region(RegionId::AdminResult).unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`page`] - fields, regions, and Enter-key bindings
//! - [`lookup`] - the usage lookup handler
//! - [`update`] - the usage update handler
//! - [`render`] - result values and their markup

pub mod lookup;
pub mod page;
pub mod render;
pub mod update;

pub use page::{Action, FieldId, Key, Page, PageVariant, RegionId};
pub use render::Rendered;
