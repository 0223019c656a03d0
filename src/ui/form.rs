use chrono::NaiveDate;

use crate::models::{TransactionDraft, TransactionType, DATE_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Type,
    Category,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Description,
            Self::Amount,
            Self::Type,
            Self::Category,
            Self::Date,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Type => "Type",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    /// Free-text fields take typed characters; the others are pickers.
    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Description | Self::Amount | Self::Date)
    }
}

/// The add-transaction form.
#[derive(Debug, Clone)]
pub(crate) struct Form {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) kind: TransactionType,
    pub(crate) category_index: usize,
    pub(crate) date: String,
    pub(crate) field: FormField,
}

impl Form {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            kind: TransactionType::Income,
            category_index: 0,
            date: today.format(DATE_FORMAT).to_string(),
            field: FormField::Description,
        }
    }

    /// Back to an empty income entry dated `today`.
    pub(crate) fn clear(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub(crate) fn set_date(&mut self, date: NaiveDate) {
        self.date = date.format(DATE_FORMAT).to_string();
    }

    pub(crate) fn draft(&self, categories: &[String]) -> TransactionDraft {
        TransactionDraft {
            description: self.description.clone(),
            amount: self.amount.clone(),
            kind: self.kind,
            category: categories
                .get(self.category_index)
                .cloned()
                .unwrap_or_default(),
            date: self.date.clone(),
        }
    }

    pub(crate) fn next_field(&mut self) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(idx + 1) % fields.len()];
    }

    pub(crate) fn prev_field(&mut self) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(idx + fields.len() - 1) % fields.len()];
    }

    pub(crate) fn input_char(&mut self, c: char) {
        match self.field {
            FormField::Description => self.description.push(c),
            FormField::Amount if c.is_ascii_digit() || matches!(c, '.' | ',') => {
                self.amount.push(c)
            }
            FormField::Date if c.is_ascii_digit() || c == '-' => self.date.push(c),
            FormField::Type => match c {
                'i' | 'I' | '+' => self.kind = TransactionType::Income,
                'e' | 'E' | '-' => self.kind = TransactionType::Expense,
                _ => {}
            },
            _ => {}
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.field {
            FormField::Description => {
                self.description.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Type | FormField::Category => {}
        }
    }

    /// Step a picker field forwards or backwards.
    pub(crate) fn cycle(&mut self, delta: i32, category_count: usize) {
        match self.field {
            FormField::Type => self.kind = self.kind.toggle(),
            FormField::Category if category_count > 0 => {
                let len = category_count as i32;
                let next = (self.category_index as i32 + delta).rem_euclid(len);
                self.category_index = next as usize;
            }
            _ => {}
        }
    }

    /// Current text of `field` for display.
    pub(crate) fn value(&self, field: FormField, categories: &[String]) -> String {
        match field {
            FormField::Description => self.description.clone(),
            FormField::Amount => self.amount.clone(),
            FormField::Type => self.kind.to_string(),
            FormField::Category => categories
                .get(self.category_index)
                .cloned()
                .unwrap_or_default(),
            FormField::Date => self.date.clone(),
        }
    }
}
