//! Dashboard session state and its update operations.
//!
//! One [`Dashboard`] lives for one run of the UI. Key handling calls these
//! methods; rendering only reads the state and the derived views.
//!
use tracing::{debug, info};

use crate::form::{self, FieldErrors, FormData};
use crate::store::{User, UserId, UserStore};
use crate::view::{self, SortOrder};

/// What a successful submit did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    Created(UserId),
    Updated(UserId),
    /// The edited record was gone by submit time; nothing was written.
    Missing(UserId),
}

#[derive(Clone, Debug)]
pub struct Dashboard {
    pub store: UserStore,
    /// Present while the form edits an existing record.
    pub editing: Option<UserId>,
    /// 1-based.
    pub page: usize,
    pub sort: SortOrder,
    pub form: FormData,
    pub errors: FieldErrors,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            store: UserStore::new(),
            editing: None,
            page: 1,
            sort: SortOrder::Ascending,
            form: FormData::default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update User" } else { "Add User" }
    }

    /// Validate the current form contents and commit them.
    ///
    /// On rejection nothing changes except the field errors; the typed
    /// values stay in the form.
    pub fn submit(&mut self) -> Result<Submitted, FieldErrors> {
        if let Err(errors) = form::validate(&self.form) {
            debug!(?errors, "submission rejected");
            self.errors = errors.clone();
            return Err(errors);
        }
        let FormData { name, email } = std::mem::take(&mut self.form);
        self.errors = FieldErrors::default();
        let outcome = match self.editing.take() {
            Some(id) => {
                if self.store.update(id, name, email) {
                    info!(id, "user updated");
                    Submitted::Updated(id)
                } else {
                    debug!(id, "edited user no longer exists; nothing updated");
                    Submitted::Missing(id)
                }
            }
            None => {
                let id = self.store.insert(name, email);
                info!(id, total = self.store.len(), "user created");
                Submitted::Created(id)
            }
        };
        Ok(outcome)
    }

    /// Convenience for callers holding the values outside the form.
    pub fn submit_form(&mut self, data: FormData) -> Result<Submitted, FieldErrors> {
        self.form = data;
        self.submit()
    }

    /// Load `id` into the form and switch to edit mode. No-op when absent.
    pub fn start_edit(&mut self, id: UserId) -> bool {
        let Some(user) = self.store.get(id) else {
            return false;
        };
        self.form = FormData::new(user.name.clone(), user.email.clone());
        self.errors = FieldErrors::default();
        self.editing = Some(id);
        debug!(id, "editing user");
        true
    }

    /// Leave edit mode, discarding the loaded values and their errors.
    ///
    /// In create mode this does nothing, so typed input survives. Returns
    /// whether an edit was cancelled.
    pub fn cancel_edit(&mut self) -> bool {
        let Some(id) = self.editing.take() else {
            return false;
        };
        self.form.clear();
        self.errors = FieldErrors::default();
        debug!(id, "edit cancelled");
        true
    }

    /// Remove `id` if present, keeping the page within range afterwards.
    pub fn delete(&mut self, id: UserId) -> Option<User> {
        let removed = self.store.remove(id)?;
        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.page = self.clamp_page(self.page);
        info!(id, total = self.store.len(), "user deleted");
        Some(removed)
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
        debug!(sort = ?self.sort, "sort toggled");
    }

    /// Jump to page `n`, clamped into `[1, max(total_pages, 1)]`.
    pub fn go_to_page(&mut self, n: usize) {
        self.page = self.clamp_page(n);
        debug!(page = self.page, "page changed");
    }

    fn clamp_page(&self, n: usize) -> usize {
        n.clamp(1, self.total_pages().max(1))
    }

    pub fn sorted_users(&self) -> Vec<&User> {
        view::sorted_users(self.store.users(), self.sort)
    }

    pub fn total_pages(&self) -> usize {
        view::total_pages(self.store.len())
    }

    pub fn visible_users(&self) -> Vec<&User> {
        view::visible_users(&self.sorted_users(), self.page)
    }
}
