//! Page model: input fields, result regions, and Enter-key activation.
//!
//! A [`Page`] holds whichever fields and regions a page variant carries. The
//! user page has only the lookup field, the admin page only the update
//! fields, and the combined page both. [`Page::attach_handlers`] inspects what
//! is present and binds the Enter key of each field that drives a handler;
//! running it again changes nothing.
//!
//! # Example
//!
//! ```rust,no_run
//! # use watercan_core::client::WaterCanClient;
//! use watercan_pages::page::{FieldId, Key, Page, RegionId};
//!
//! # async fn example(client: WaterCanClient) {
//! let mut page = Page::user(client);
//! page.attach_handlers();
//!
//! page.set_value(FieldId::CanId, "WC-1001");
//! page.key_press(FieldId::CanId, Key::Enter).await;
//!
//! println!("{}", page.region(RegionId::Result).unwrap_or_default());
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use watercan_core::client::WaterCanClient;

use crate::lookup;
use crate::render::Rendered;
use crate::update;

/// Input fields a page may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    /// Water Can ID on the user page.
    CanId,
    /// Water Can ID on the admin page.
    AdminCanId,
    /// New usage count on the admin page.
    AdminCount,
}

impl FieldId {
    /// Element id of the field in the page markup.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::CanId => "canIdInput",
            Self::AdminCanId => "adminCanIdInput",
            Self::AdminCount => "adminCountInput",
        }
    }
}

/// Display regions handlers write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    Result,
    AdminResult,
}

impl RegionId {
    /// Element id of the region in the page markup.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Result => "result",
            Self::AdminResult => "adminResult",
        }
    }
}

/// Handlers a page can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CheckUsage,
    UpdateUsage,
}

impl Action {
    /// Region the handler's output replaces.
    pub fn region(self) -> RegionId {
        match self {
            Self::CheckUsage => RegionId::Result,
            Self::UpdateUsage => RegionId::AdminResult,
        }
    }

    /// Fields that must all exist for the handler to be bound.
    pub fn required_fields(self) -> &'static [FieldId] {
        match self {
            Self::CheckUsage => &[FieldId::CanId],
            Self::UpdateUsage => &[FieldId::AdminCanId, FieldId::AdminCount],
        }
    }
}

/// A key pressed inside a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(String),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        if name == "Enter" {
            Self::Enter
        } else {
            Self::Other(name.to_string())
        }
    }
}

/// Which fields and regions a page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    User,
    Admin,
    Combined,
}

impl PageVariant {
    fn fields(self) -> &'static [FieldId] {
        match self {
            Self::User => &[FieldId::CanId],
            Self::Admin => &[FieldId::AdminCanId, FieldId::AdminCount],
            Self::Combined => &[FieldId::CanId, FieldId::AdminCanId, FieldId::AdminCount],
        }
    }

    fn regions(self) -> &'static [RegionId] {
        match self {
            Self::User => &[RegionId::Result],
            Self::Admin => &[RegionId::AdminResult],
            Self::Combined => &[RegionId::Result, RegionId::AdminResult],
        }
    }
}

/// A page: its fields, its regions, and the Enter bindings attached to it.
pub struct Page {
    client: WaterCanClient,
    fields: BTreeMap<FieldId, String>,
    regions: BTreeMap<RegionId, Option<Rendered>>,
    bindings: BTreeMap<FieldId, Action>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("endpoint", &self.client.endpoint().as_str())
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("regions", &self.regions.keys().collect::<Vec<_>>())
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl Page {
    /// Create a page with an explicit set of fields and regions.
    pub fn new(
        client: WaterCanClient,
        fields: impl IntoIterator<Item = FieldId>,
        regions: impl IntoIterator<Item = RegionId>,
    ) -> Self {
        Self {
            client,
            fields: fields.into_iter().map(|f| (f, String::new())).collect(),
            regions: regions.into_iter().map(|r| (r, None)).collect(),
            bindings: BTreeMap::new(),
        }
    }

    /// Create one of the standard page variants.
    pub fn variant(client: WaterCanClient, variant: PageVariant) -> Self {
        Self::new(
            client,
            variant.fields().iter().copied(),
            variant.regions().iter().copied(),
        )
    }

    /// The user page: lookup only.
    pub fn user(client: WaterCanClient) -> Self {
        Self::variant(client, PageVariant::User)
    }

    /// The admin page: update only.
    pub fn admin(client: WaterCanClient) -> Self {
        Self::variant(client, PageVariant::Admin)
    }

    /// A page with both handlers.
    pub fn combined(client: WaterCanClient) -> Self {
        Self::variant(client, PageVariant::Combined)
    }

    pub fn has_field(&self, field: FieldId) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn has_region(&self, region: RegionId) -> bool {
        self.regions.contains_key(&region)
    }

    /// Current text of a field, if the page has it.
    pub fn value(&self, field: FieldId) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Replace the text of a field. Returns `false` if the page has no such field.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) -> bool {
        match self.fields.get_mut(&field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Last content written to a region, as an HTML fragment.
    pub fn region(&self, region: RegionId) -> Option<String> {
        self.regions
            .get(&region)
            .and_then(Option::as_ref)
            .map(Rendered::to_html)
    }

    /// Last content written to a region.
    pub fn rendered(&self, region: RegionId) -> Option<&Rendered> {
        self.regions.get(&region).and_then(Option::as_ref)
    }

    /// Handler bound to a field's Enter key, if any.
    pub fn binding(&self, field: FieldId) -> Option<Action> {
        self.bindings.get(&field).copied()
    }

    /// Bind Enter in every field that drives a handler present on this page.
    ///
    /// A handler is bound only when all of its fields exist. Calling this more
    /// than once leaves the bindings as they were. Returns the bound fields.
    pub fn attach_handlers(&mut self) -> BTreeSet<FieldId> {
        for action in [Action::CheckUsage, Action::UpdateUsage] {
            let fields = action.required_fields();
            if !fields.iter().all(|f| self.has_field(*f)) {
                tracing::debug!(?action, "handler not bound: fields missing");
                continue;
            }
            for field in fields {
                if self.bindings.insert(*field, action).is_none() {
                    tracing::debug!(field = field.element_id(), ?action, "bound Enter");
                }
            }
        }
        self.bindings.keys().copied().collect()
    }

    /// Deliver a key press to a field.
    ///
    /// Enter in a bound field runs its handler, exactly like [`Page::submit`].
    /// Any other key, or a field without a binding, does nothing. Returns the
    /// handler that ran.
    pub async fn key_press(&mut self, field: FieldId, key: impl Into<Key>) -> Option<Action> {
        let key: Key = key.into();
        if key != Key::Enter {
            return None;
        }
        let action = self.binding(field)?;
        self.submit(action).await?;
        Some(action)
    }

    /// Run a handler as if its submit button was pressed, and write the
    /// result into its region.
    ///
    /// Returns `None` without doing anything if the page lacks the handler's
    /// fields or region.
    pub async fn submit(&mut self, action: Action) -> Option<&Rendered> {
        let region = action.region();
        if !self.has_region(region) {
            tracing::debug!(?action, "no region to render into");
            return None;
        }

        let rendered = match action {
            Action::CheckUsage => {
                let id = self.value(FieldId::CanId)?;
                lookup::check_usage(&self.client, id).await
            }
            Action::UpdateUsage => {
                let id = self.value(FieldId::AdminCanId)?;
                let count = self.value(FieldId::AdminCount)?;
                update::submit_update(&self.client, id, count).await
            }
        };

        tracing::debug!(region = region.element_id(), shown = %rendered, "region updated");
        let slot = self.regions.get_mut(&region)?;
        *slot = Some(rendered);
        slot.as_ref()
    }
}
