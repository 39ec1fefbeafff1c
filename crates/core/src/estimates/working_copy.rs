//! Client-side working copy of a quote.
//!
//! The client edits a local copy of a persisted quote; derived values
//! (per-item totals, category totals, the cost range) are kept consistent
//! after every edit without a server round trip. Persistence is a separate,
//! explicit update call made by the owner of this copy.

use serde::{Deserialize, Serialize};

use crate::estimates::estimates_model::{
    CostRange, ItemCategory, LineItem, QuoteData, QuoteTotals,
};

/// Fields of a line item supplied by the user when adding a row; the id and
/// derived total are assigned by the working copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    pub category: ItemCategory,
    pub item: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Recompute category totals from a set of line items.
pub fn recalc_totals(line_items: &[LineItem]) -> QuoteTotals {
    let mut totals = QuoteTotals::default();
    for item in line_items {
        let amount = item.quantity * item.unit_cost;
        match item.category {
            ItemCategory::Materials => totals.materials += amount,
            ItemCategory::Labor => totals.labor += amount,
            ItemCategory::Equipment => totals.equipment += amount,
            ItemCategory::Other => totals.other += amount,
        }
    }
    totals.subtotal = totals.materials + totals.labor + totals.equipment + totals.other;
    totals.total = totals.subtotal;
    totals
}

/// Locally editable copy of a quote, distinct from the server-persisted
/// version until explicitly saved.
#[derive(Debug, Clone)]
pub struct WorkingQuote {
    quote: QuoteData,
    editing: Option<String>,
    dirty: bool,
}

impl WorkingQuote {
    pub fn new(quote: QuoteData) -> Self {
        Self {
            quote,
            editing: None,
            dirty: false,
        }
    }

    pub fn quote(&self) -> &QuoteData {
        &self.quote
    }

    pub fn into_quote(self) -> QuoteData {
        self.quote
    }

    /// True when local edits have not been pushed back to the server.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the copy clean after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Line item currently open for editing, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn open_editor(&mut self, item_id: &str) {
        if self.quote.line_items.iter().any(|i| i.id == item_id) {
            self.editing = Some(item_id.to_string());
        }
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    /// Change a line item's quantity. Returns false when the id is unknown.
    pub fn set_quantity(&mut self, item_id: &str, quantity: f64) -> bool {
        self.edit_item(item_id, |item| item.quantity = quantity)
    }

    /// Change a line item's unit cost. Returns false when the id is unknown.
    pub fn set_unit_cost(&mut self, item_id: &str, unit_cost: f64) -> bool {
        self.edit_item(item_id, |item| item.unit_cost = unit_cost)
    }

    fn edit_item(&mut self, item_id: &str, apply: impl FnOnce(&mut LineItem)) -> bool {
        let Some(item) = self.quote.line_items.iter_mut().find(|i| i.id == item_id) else {
            return false;
        };
        apply(item);
        item.total_cost = item.quantity * item.unit_cost;
        self.recalc();
        true
    }

    /// Append a new line item under a fresh id and open it for editing.
    pub fn add_line_item(&mut self, draft: LineItemDraft) -> String {
        let id = self.next_item_id();
        let total_cost = draft.quantity * draft.unit_cost;
        self.quote.line_items.push(LineItem {
            id: id.clone(),
            category: draft.category,
            item: draft.item,
            quantity: draft.quantity,
            unit: draft.unit,
            unit_cost: draft.unit_cost,
            total_cost,
            editable: true,
            notes: draft.notes,
        });
        self.editing = Some(id.clone());
        self.recalc();
        id
    }

    /// Remove a line item; closes the editor if it held that row.
    pub fn remove_line_item(&mut self, item_id: &str) -> bool {
        let before = self.quote.line_items.len();
        self.quote.line_items.retain(|i| i.id != item_id);
        if self.quote.line_items.len() == before {
            return false;
        }
        if self.editing.as_deref() == Some(item_id) {
            self.editing = None;
        }
        self.recalc();
        true
    }

    /// Fresh item id under the quote id, one past the highest ordinal in use.
    fn next_item_id(&self) -> String {
        let next = self
            .quote
            .line_items
            .iter()
            .filter_map(|i| i.ordinal_suffix().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        format!("{}_{}", self.quote.id, next)
    }

    fn recalc(&mut self) {
        self.dirty = true;
        self.quote.totals = recalc_totals(&self.quote.line_items);

        // Re-derive the range from the new total with a confidence-dependent
        // spread. A non-positive total keeps the previously stored range
        // rather than collapsing it to zero width.
        let total = self.quote.totals.total;
        if total > 0.0 {
            let spread = self.quote.confidence.spread();
            self.quote.total_cost_range = CostRange {
                min: (total * (1.0 - spread)).round().max(0.0),
                max: (total * (1.0 + spread)).round().max(0.0),
                currency: self.quote.total_cost_range.currency.clone(),
            };
        }
    }
}
