// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Text editing of [`PricingGrid`] fields.
//!
//! Text that can't be parsed as a number yet, like `12,` while the user is
//! still typing, is held aside and never reaches the committed values.

use crate::{EditableField, Error, PricingGrid, YearMonth};

/// The result of typing text into a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditOutcome {
    /// The text was a number, and was committed.
    Committed(f64),
    /// The text was empty, and the field was cleared.
    Cleared,
    /// The text isn't a number yet.  It is held until it becomes one, or
    /// until the field loses focus.
    Pending,
}

/// Text editing.
impl PricingGrid {
    /// Handles text typed into a field of a month.
    ///
    /// Both `,` and `.` are accepted as decimal separators.
    pub fn input(
        &mut self,
        month: YearMonth,
        field: EditableField,
        text: &str,
    ) -> Result<EditOutcome, Error> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.set_value(month, field, None)?;
            return Ok(EditOutcome::Cleared);
        }
        if let Some(value) = parse_decimal(trimmed) {
            self.set_value(month, field, Some(value))?;
            return Ok(EditOutcome::Committed(value));
        }

        self.row_index(month)?;
        if field == EditableField::AdjustedPrice {
            self.ensure_manual_prices_allowed(month)?;
        }
        self.pending.insert((month, field), text.to_owned());
        Ok(EditOutcome::Pending)
    }

    /// Handles a field losing focus.
    ///
    /// Pending text is discarded, and the field goes back to its committed
    /// value, which is returned.
    pub fn blur(
        &mut self,
        month: YearMonth,
        field: EditableField,
    ) -> Result<Option<f64>, Error> {
        let index = self.row_index(month)?;
        if let Some(text) = self.pending.remove(&(month, field)) {
            tracing::debug!(
                "Discarding unparsable {} input for {}: {:?}",
                field,
                month,
                text
            );
        }
        Ok(self.rows[index].value(field))
    }

    /// Returns the pending text of a field, if there is any.
    pub fn pending_text(&self, month: YearMonth, field: EditableField) -> Option<&str> {
        self.pending.get(&(month, field)).map(String::as_str)
    }

    /// Returns the text to show in a field: the pending text if there is
    /// any, otherwise the committed value, or an empty string.
    pub fn display_text(
        &self,
        month: YearMonth,
        field: EditableField,
    ) -> Result<String, Error> {
        let row = self.row(month)?;
        if let Some(text) = self.pending_text(month, field) {
            return Ok(text.to_owned());
        }
        Ok(row.value(field).map(|v| v.to_string()).unwrap_or_default())
    }
}

/// Parses a decimal number that may use a comma as decimal separator.
///
/// Returns `None` for text that isn't a complete finite number, including
/// text that ends in a separator.
pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.ends_with([',', '.']) || text.matches([',', '.']).count() > 1 {
        return None;
    }
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
