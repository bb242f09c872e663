//! Column-oriented data of one file.

use crate::columns::{ColumnInfo, ColumnRef, SetId};
use crate::error::{Mgd77Error, Result};
use crate::fields::{self, N_SETS};
use crate::header::Header;
use crate::record::DataRecord;

/// Values of one output column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Self::Numeric(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    pub fn as_numeric_mut(&mut self) -> Option<&mut Vec<f64>> {
        match self {
            Self::Numeric(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Self::Text(v) => Some(v),
            Self::Numeric(_) => None,
        }
    }

    /// Replicate a single stored value to `n` records.
    pub fn broadcast(&mut self, n: usize) {
        match self {
            Self::Numeric(v) if v.len() == 1 => *v = vec![v[0]; n],
            Self::Text(v) if v.len() == 1 => *v = vec![v[0].clone(); n],
            _ => {}
        }
    }

    /// Keep only the records whose index passes `keep`.
    fn retain_indices(&mut self, keep: &[bool]) {
        fn filter<T: Clone>(v: &[T], keep: &[bool]) -> Vec<T> {
            v.iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(x, _)| x.clone())
                .collect()
        }
        match self {
            Self::Numeric(v) => *v = filter(v, keep),
            Self::Text(v) => *v = filter(v, keep),
        }
    }
}

/// A header plus one value array per selected output column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub header: Header,
    /// Output order: which catalog column each position holds.
    pub order: Vec<ColumnRef>,
    pub values: Vec<ColumnValues>,
    /// Per-record bit flags of each set, when the file carries them.
    pub flags: [Option<Vec<u32>>; N_SETS],
}

impl Dataset {
    /// Empty dataset for `order`, one zero-length array per column.
    #[must_use]
    pub fn new(header: Header, order: Vec<ColumnRef>) -> Self {
        let values = order
            .iter()
            .map(|r| match header.catalog.get(*r) {
                Some(c) if c.is_text() => ColumnValues::Text(Vec::new()),
                _ => ColumnValues::Numeric(Vec::new()),
            })
            .collect();
        Self {
            header,
            order,
            values,
            flags: [None, None],
        }
    }

    /// Build the column arrays of `order` from decoded punch-card records.
    #[must_use]
    pub fn from_records(header: Header, order: Vec<ColumnRef>, records: &[DataRecord]) -> Self {
        let mut dataset = Self::new(header, order);
        for rec in records {
            dataset.push_record(rec);
        }
        dataset.header.n_records = dataset.n_records();
        dataset
    }

    /// Append one record to every legacy column; extended columns get NaN.
    pub fn push_record(&mut self, rec: &DataRecord) {
        for (pos, r) in self.order.iter().enumerate() {
            let field = self.header.catalog.get(*r).and_then(|c| c.field);
            match (&mut self.values[pos], field) {
                (ColumnValues::Text(v), Some(f)) => v.push(rec.word(f).to_string()),
                (ColumnValues::Text(v), None) => v.push(String::new()),
                (ColumnValues::Numeric(v), Some(f)) => v.push(rec.number[f]),
                (ColumnValues::Numeric(v), None) => v.push(f64::NAN),
            }
        }
    }

    /// Reassemble record `index` from the legacy columns present.
    ///
    /// Calendar fields missing from the dataset are split from `time`.
    #[must_use]
    pub fn record(&self, index: usize) -> DataRecord {
        let mut rec = DataRecord::default();
        for (pos, r) in self.order.iter().enumerate() {
            let Some(f) = self.header.catalog.get(*r).and_then(|c| c.field) else {
                continue;
            };
            match &self.values[pos] {
                ColumnValues::Text(v) => {
                    let slot = f.checked_sub(fields::ID).and_then(|k| rec.words.get_mut(k));
                    if let (Some(slot), Some(s)) = (slot, v.get(index)) {
                        slot.clone_from(s);
                        if !s.is_empty() {
                            rec.bit_pattern |= fields::bit(f);
                        }
                    }
                }
                ColumnValues::Numeric(v) => {
                    let x = v.get(index).copied().unwrap_or(f64::NAN);
                    rec.number[f] = x;
                    if !x.is_nan() {
                        rec.bit_pattern |= fields::bit(f);
                    }
                }
            }
        }
        if rec.bit_pattern & fields::TIME_BITS == 0 {
            if let Some(cal) = crate::time::split_local(rec.time(), rec.number[fields::TZ]) {
                rec.number[fields::YEAR] = f64::from(cal.year);
                rec.number[fields::MONTH] = f64::from(cal.month);
                rec.number[fields::DAY] = f64::from(cal.day);
                rec.number[fields::HOUR] = f64::from(cal.hour);
                rec.number[fields::MIN] = cal.minute;
                rec.bit_pattern |= fields::TIME_BITS;
            }
        }
        rec
    }

    /// Number of records (length of the first column).
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.values.first().map_or(self.header.n_records, ColumnValues::len)
    }

    /// Output position of the column called `abbrev`.
    #[must_use]
    pub fn position(&self, abbrev: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|r| self.header.catalog.get(*r).is_some_and(|c| c.abbrev == abbrev))
    }

    /// Descriptor of output column `pos`.
    #[must_use]
    pub fn info(&self, pos: usize) -> Option<&ColumnInfo> {
        self.order.get(pos).and_then(|r| self.header.catalog.get(*r))
    }

    /// Output column abbreviations in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        (0..self.order.len())
            .filter_map(|pos| self.info(pos).map(|c| c.abbrev.as_str()))
            .collect()
    }

    #[must_use]
    pub fn numeric(&self, abbrev: &str) -> Option<&[f64]> {
        self.position(abbrev).and_then(|p| self.values[p].as_numeric())
    }

    pub fn numeric_mut(&mut self, abbrev: &str) -> Option<&mut Vec<f64>> {
        let p = self.position(abbrev)?;
        self.values[p].as_numeric_mut()
    }

    #[must_use]
    pub fn text(&self, abbrev: &str) -> Option<&[String]> {
        self.position(abbrev).and_then(|p| self.values[p].as_text())
    }

    /// Numeric column `abbrev`, or an error naming it.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::NoSuchColumn`] when the column is absent or textual.
    pub fn require_numeric(&self, abbrev: &str) -> Result<&[f64]> {
        self.numeric(abbrev).ok_or_else(|| Mgd77Error::NoSuchColumn {
            name: abbrev.to_string(),
        })
    }

    /// Append a new extended-set column, registering it in the catalog.
    ///
    /// # Errors
    ///
    /// Fails when the extended set is full or `values` has the wrong length.
    pub fn add_column(&mut self, info: ColumnInfo, values: ColumnValues) -> Result<ColumnRef> {
        if !self.values.is_empty() && values.len() != self.n_records() {
            return Err(Mgd77Error::bad_argument(format!(
                "column {} has {} values, expected {}",
                info.abbrev,
                values.len(),
                self.n_records()
            )));
        }
        let set = SetId::of(&info.abbrev);
        let item = self.header.catalog.set_mut(set).push(info)?;
        let r = ColumnRef { set, item };
        if let Some(c) = self.header.catalog.get_mut(r) {
            c.pos = Some(self.order.len());
        }
        self.order.push(r);
        self.values.push(values);
        Ok(r)
    }

    /// Reduce the output to `desired` columns, in that order; an empty list
    /// keeps every catalog column present.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::NoSuchColumn`] when a name is not in the catalog or was
    /// not read.
    pub fn select_columns<S: AsRef<str>>(&mut self, desired: &[S]) -> Result<()> {
        let order = self.header.catalog.order_columns(desired)?;
        let mut values = Vec::with_capacity(order.len());
        for r in &order {
            let pos = self.order.iter().position(|o| o == r).ok_or_else(|| {
                Mgd77Error::NoSuchColumn {
                    name: self
                        .header
                        .catalog
                        .get(*r)
                        .map_or_else(String::new, |c| c.abbrev.clone()),
                }
            })?;
            values.push(self.values[pos].clone());
        }
        self.order = order;
        self.values = values;
        Ok(())
    }

    /// Drop every record for which `keep` is false.
    pub fn retain(&mut self, keep: &[bool]) {
        for column in &mut self.values {
            column.retain_indices(keep);
        }
        for flags in self.flags.iter_mut().flatten() {
            *flags = flags
                .iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(f, _)| *f)
                .collect();
        }
        self.header.n_records = self.n_records();
    }
}
