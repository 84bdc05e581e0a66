/// A column of either line-item table that a cell can belong to.
///
/// Derived columns are listed so the editor can reject them at
/// `start_edit` time; they may never enter edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellField {
    // Product columns
    ProductName,
    ProductUserPrice,
    ProductPresentationSize,
    ProductRecipeUsage,
    ProductSupplier,
    /// Derived — read-only
    ProductCatalogPrice,
    /// Derived — read-only
    ProductLineCost,

    // Additional-cost columns
    CostDescription,
    CostPackageCost,
    CostUnitsPerPackage,
    CostUnitsUsed,
    /// Derived — read-only
    CostUnitCost,
    /// Derived — read-only
    CostTotal,
}

impl CellField {
    /// Derived columns can never enter edit mode.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            CellField::ProductCatalogPrice
                | CellField::ProductLineCost
                | CellField::CostUnitCost
                | CellField::CostTotal
        )
    }

    /// Whether committed text for this column goes through numeric parsing.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellField::ProductUserPrice
                | CellField::ProductPresentationSize
                | CellField::ProductRecipeUsage
                | CellField::CostPackageCost
                | CellField::CostUnitsPerPackage
                | CellField::CostUnitsUsed
        )
    }
}

/// A committed edit, ready to be routed to the owning store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub item_id: u32,
    pub field: CellField,
    pub text: String,
}

/// Single-focus inline-edit state machine.
///
/// At most one cell is editable at any time. Typing accumulates into
/// `pending` without touching the underlying store; only `commit`
/// produces an edit for the caller to apply. `cancel` discards.
///
/// Starting a new edit while another is active replaces the active cell —
/// whether the previous edit is committed first is the host UI's choice
/// (blur-commit hosts call `commit` before `start_edit`); the engine
/// guarantees only the single-active-cell invariant.
#[derive(Debug, Default)]
pub struct CellEditor {
    active: Option<(u32, CellField)>,
    pending: String,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin editing a cell. Returns `false` (and leaves the editor
    /// untouched) for read-only columns. Clears any pending text.
    pub fn start_edit(&mut self, item_id: u32, field: CellField) -> bool {
        if field.is_read_only() {
            return false;
        }
        self.active = Some((item_id, field));
        self.pending.clear();
        true
    }

    /// Replace the pending text while editing. Ignored when no cell is
    /// active.
    pub fn type_text(&mut self, text: &str) {
        if self.active.is_some() {
            self.pending.clear();
            self.pending.push_str(text);
        }
    }

    /// Commit the pending edit, clearing the active-cell state.
    /// Returns `None` when no cell was being edited.
    pub fn commit(&mut self) -> Option<CellEdit> {
        let (item_id, field) = self.active.take()?;
        let text = std::mem::take(&mut self.pending);
        Some(CellEdit { item_id, field, text })
    }

    /// Discard the pending edit without committing.
    pub fn cancel(&mut self) {
        self.active = None;
        self.pending.clear();
    }

    pub fn active_cell(&self) -> Option<(u32, CellField)> {
        self.active
    }

    pub fn pending_text(&self) -> &str {
        &self.pending
    }
}
