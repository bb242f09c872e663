//! Per-file column catalog.
//!
//! A file exposes up to two independent sets of columns: the legacy set
//! (the punch-card fields, time and the MGD77T quality codes) and the
//! extended set (anything else an MGD77+ file carries). Columns keep their
//! set for life; within a set they are addressed by item number.

use serde::Serialize;

use crate::codec::StorageKind;
use crate::error::{Mgd77Error, Result};
use crate::fields::{self, FIELDS, N_SETS, SET_COLS};

/// Which of the two column sets a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SetId {
    /// Punch-card fields plus time and quality codes.
    Legacy,
    /// Additional MGD77+ columns.
    Extended,
}

impl SetId {
    /// Both sets, legacy first.
    pub const ALL: [SetId; N_SETS] = [SetId::Legacy, SetId::Extended];

    /// Array index of this set.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Legacy => 0,
            Self::Extended => 1,
        }
    }

    /// Set a column called `abbrev` belongs to.
    #[must_use]
    pub fn of(abbrev: &str) -> Self {
        if fields::is_legacy_abbrev(abbrev) {
            Self::Legacy
        } else {
            Self::Extended
        }
    }

    /// Name of the per-record flag variable for this set.
    #[must_use]
    pub const fn flag_variable(self) -> &'static str {
        match self {
            Self::Legacy => "MGD77_flags",
            Self::Extended => "CDF_flags",
        }
    }
}

/// Derived-field recomputation requested for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Adjust {
    #[default]
    None,
    /// Unwrap precision-depth-recorder travel times.
    Twt,
    /// Depth from travel time via the Carter table.
    Depth,
    /// Magnetic anomaly from total field minus IGRF.
    Mag,
    /// Free-air anomaly from observed gravity.
    Faa,
    /// Free-air anomaly with the Eotvos correction added back.
    FaaEot,
}

impl Adjust {
    /// Code stored in the `adjust` attribute.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Twt => 1,
            Self::Depth => 2,
            Self::Mag => 3,
            Self::Faa => 4,
            Self::FaaEot => 5,
        }
    }

    /// Inverse of [`Adjust::code`]; unknown codes mean no adjustment.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Twt,
            2 => Self::Depth,
            3 => Self::Mag,
            4 => Self::Faa,
            5 => Self::FaaEot,
            _ => Self::None,
        }
    }
}

/// Description of one column present in a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub abbrev: String,
    /// Long name, when it differs from the abbreviation.
    pub name: String,
    pub units: String,
    pub comment: String,
    pub storage: StorageKind,
    /// Characters per value; 0 for numeric columns.
    pub text_len: usize,
    pub scale: f64,
    pub offset: f64,
    /// Post-hoc unit correction applied on top of scale/offset.
    pub corr_factor: f64,
    pub corr_offset: f64,
    /// One value shared by every record.
    pub constant: bool,
    pub adjust: Adjust,
    /// Output position once columns have been ordered.
    pub pos: Option<usize>,
    /// (min, max) of the values, once scanned.
    pub limits: Option<(f64, f64)>,
    /// Index into the canonical field table, when this is a canonical field.
    pub field: Option<usize>,
}

impl ColumnInfo {
    /// Column with the default MGD77+ encoding of canonical field `index`.
    #[must_use]
    pub fn from_field(index: usize) -> Self {
        let def = &FIELDS[index];
        Self {
            abbrev: def.abbrev.to_string(),
            name: def.name.to_string(),
            units: def.units.to_string(),
            comment: def.comment.to_string(),
            storage: def.storage,
            text_len: def.text_len,
            scale: def.scale,
            offset: def.offset,
            corr_factor: 1.0,
            corr_offset: 0.0,
            constant: false,
            adjust: Adjust::None,
            pos: None,
            limits: None,
            field: Some(index),
        }
    }

    /// Bare column as found in a container before attributes are read.
    #[must_use]
    pub fn new(abbrev: &str, storage: StorageKind) -> Self {
        Self {
            abbrev: abbrev.to_string(),
            name: String::new(),
            units: String::new(),
            comment: String::new(),
            storage,
            text_len: 0,
            scale: 1.0,
            offset: 0.0,
            corr_factor: 1.0,
            corr_offset: 0.0,
            constant: false,
            adjust: Adjust::None,
            pos: None,
            limits: None,
            field: fields::field_index(abbrev),
        }
    }

    /// True for fixed-width text columns.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.text_len > 0
    }

    /// True when a unit correction must be applied.
    #[must_use]
    pub fn has_correction(&self) -> bool {
        self.corr_factor != 1.0 || self.corr_offset != 0.0
    }
}

/// Address of a column: its set and item number within the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRef {
    pub set: SetId,
    pub item: usize,
}

/// The columns of one set, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnSet {
    columns: Vec<ColumnInfo>,
}

impl ColumnSet {
    /// Append a column.
    ///
    /// # Errors
    ///
    /// Fails when the set already holds the maximum number of columns.
    pub fn push(&mut self, column: ColumnInfo) -> Result<usize> {
        if self.columns.len() >= SET_COLS {
            return Err(Mgd77Error::bad_argument(format!(
                "too many columns in set (max {SET_COLS}) adding {}",
                column.abbrev
            )));
        }
        self.columns.push(column);
        Ok(self.columns.len() - 1)
    }

    /// Remove every column.
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn get(&self, item: usize) -> Option<&ColumnInfo> {
        self.columns.get(item)
    }

    pub fn get_mut(&mut self, item: usize) -> Option<&mut ColumnInfo> {
        self.columns.get_mut(item)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnInfo> {
        self.columns.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ColumnInfo> {
        self.columns.iter_mut()
    }

    /// Item number of the column called `abbrev`.
    #[must_use]
    pub fn position(&self, abbrev: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.abbrev == abbrev)
    }

    /// Columns exposed by the text formats.
    ///
    /// Time replaces the year/month/day/hour/min fields; MGD77T adds
    /// the three quality codes.
    #[must_use]
    pub fn plain_mgd77(with_quality_codes: bool) -> Self {
        let mut set = Self::default();
        set.columns.push(ColumnInfo::from_field(fields::TIME));
        for index in 0..fields::N_DATA_FIELDS {
            if (fields::YEAR..=fields::MIN).contains(&index) {
                continue;
            }
            set.columns.push(ColumnInfo::from_field(index));
        }
        if with_quality_codes {
            for index in [fields::BQC, fields::MQC, fields::GQC] {
                set.columns.push(ColumnInfo::from_field(index));
            }
        }
        set
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnInfo;
    type IntoIter = std::slice::Iter<'a, ColumnInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Both column sets of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    sets: [ColumnSet; N_SETS],
}

impl Catalog {
    /// Catalog for a text-format file.
    #[must_use]
    pub fn plain_mgd77(with_quality_codes: bool) -> Self {
        Self {
            sets: [ColumnSet::plain_mgd77(with_quality_codes), ColumnSet::default()],
        }
    }

    #[must_use]
    pub fn set(&self, id: SetId) -> &ColumnSet {
        &self.sets[id.index()]
    }

    pub fn set_mut(&mut self, id: SetId) -> &mut ColumnSet {
        &mut self.sets[id.index()]
    }

    /// Column at `r`.
    #[must_use]
    pub fn get(&self, r: ColumnRef) -> Option<&ColumnInfo> {
        self.set(r.set).get(r.item)
    }

    pub fn get_mut(&mut self, r: ColumnRef) -> Option<&mut ColumnInfo> {
        self.set_mut(r.set).get_mut(r.item)
    }

    /// Total number of columns in both sets.
    #[must_use]
    pub fn n_fields(&self) -> usize {
        self.sets.iter().map(ColumnSet::len).sum()
    }

    /// Every column, legacy set first.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnRef, &ColumnInfo)> {
        SetId::ALL.into_iter().flat_map(move |set| {
            self.set(set)
                .iter()
                .enumerate()
                .map(move |(item, c)| (ColumnRef { set, item }, c))
        })
    }

    /// Find a column by exact (case-sensitive) abbreviation in either set.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ColumnRef> {
        SetId::ALL.into_iter().find_map(|set| {
            self.set(set)
                .position(name)
                .map(|item| ColumnRef { set, item })
        })
    }

    /// Expose every column in catalog order, assigning output positions.
    pub fn select_all(&mut self) -> Vec<ColumnRef> {
        let order: Vec<ColumnRef> = self.iter().map(|(r, _)| r).collect();
        self.assign_positions(&order);
        order
    }

    /// Map desired output names onto columns, assigning output positions.
    ///
    /// # Errors
    ///
    /// Returns [`Mgd77Error::NoSuchColumn`] naming the first absent column.
    pub fn order_columns<S: AsRef<str>>(&mut self, desired: &[S]) -> Result<Vec<ColumnRef>> {
        if desired.is_empty() {
            return Ok(self.select_all());
        }
        let order = desired
            .iter()
            .map(|name| {
                self.resolve(name.as_ref())
                    .ok_or_else(|| Mgd77Error::NoSuchColumn {
                        name: name.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        self.assign_positions(&order);
        Ok(order)
    }

    fn assign_positions(&mut self, order: &[ColumnRef]) {
        for set in &mut self.sets {
            for column in set.iter_mut() {
                column.pos = None;
            }
        }
        for (pos, r) in order.iter().enumerate() {
            if let Some(column) = self.get_mut(*r) {
                column.pos = Some(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_set_layout() {
        let set = ColumnSet::plain_mgd77(false);
        assert_eq!(set.len(), 23);
        assert_eq!(set.get(0).map(|c| c.abbrev.as_str()), Some("time"));
        assert_eq!(set.get(1).map(|c| c.abbrev.as_str()), Some("drt"));
        assert_eq!(set.position("year"), None);
        assert_eq!(ColumnSet::plain_mgd77(true).len(), 26);
    }

    #[test]
    fn test_order_columns_follows_request() {
        let mut catalog = Catalog::plain_mgd77(false);
        let order = catalog.order_columns(&["lat", "depth"]).unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(catalog.get(order[0]).unwrap().abbrev, "lat");
        assert_eq!(catalog.get(order[1]).unwrap().abbrev, "depth");
        assert_eq!(catalog.get(order[1]).unwrap().pos, Some(1));
        let lon = catalog.resolve("lon").unwrap();
        assert_eq!(catalog.get(lon).unwrap().pos, None);
    }

    #[test]
    fn test_missing_column_is_named() {
        let mut catalog = Catalog::plain_mgd77(false);
        let err = catalog.order_columns(&["lat", "bqc"]).unwrap_err();
        assert!(matches!(err, Mgd77Error::NoSuchColumn { ref name } if name == "bqc"));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let catalog = Catalog::plain_mgd77(false);
        assert!(catalog.resolve("LAT").is_none());
        assert!(catalog.resolve("lat").is_some());
    }

    #[test]
    fn test_select_all_spans_both_sets() {
        let mut catalog = Catalog::plain_mgd77(false);
        catalog
            .set_mut(SetId::Extended)
            .push(ColumnInfo::new("grav2", StorageKind::Short))
            .unwrap();
        let order = catalog.select_all();
        assert_eq!(order.len(), 24);
        assert_eq!(order[23], ColumnRef { set: SetId::Extended, item: 0 });
    }

    #[test]
    fn test_set_capacity() {
        let mut set = ColumnSet::default();
        for k in 0..SET_COLS {
            set.push(ColumnInfo::new(&format!("c{k}"), StorageKind::Int)).unwrap();
        }
        assert!(set.push(ColumnInfo::new("extra", StorageKind::Int)).is_err());
    }

    #[test]
    fn test_set_membership() {
        assert_eq!(SetId::of("time"), SetId::Legacy);
        assert_eq!(SetId::of("gqc"), SetId::Legacy);
        assert_eq!(SetId::of("grav2"), SetId::Extended);
        assert_eq!(Adjust::from_code(Adjust::FaaEot.code()), Adjust::FaaEot);
    }
}
