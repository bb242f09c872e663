//! MGD77+ files: MGD77 columns and header parameters in a netCDF container.
//!
//! One unlimited dimension (`time`, or `record_no` for cruises without
//! time), one variable per column, scalar variables for constant columns.
//! Header parameters are global attributes named after the header item;
//! a revised value that differs from the original is stored under
//! `{name}_REVISED`. Files are written in the classic netCDF format.

use std::collections::HashMap;
use std::path::Path;

use mgd77_core::codec::{self, StorageKind};
use mgd77_core::fields::{self, FIELDS};
use mgd77_core::params::HEADER_ITEMS;
use mgd77_core::{
    Adjust, ColumnInfo, ColumnValues, Dataset, Header, HeaderParams, Mgd77Error, ParamSet,
    Result, SetId,
};
use netcdf::types::{FloatType, IntType, NcTypeDescriptor, NcVariableType};
use netcdf::{AttributeValue, Dimension, Options};
use tracing::{debug, warn};

/// Value of the `Conventions` global attribute.
pub const CONVENTIONS: &str = "CF-1.0";
/// Suffix of attributes holding revised header parameters.
pub const REVISED_SUFFIX: &str = "_REVISED";

const FLAG_KIND: StorageKind = StorageKind::Int;

/// One byte of an `NC_CHAR` variable.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct NcChar(u8);

// SAFETY: `NcChar` is a transparent `u8`, the size of `NC_CHAR`.
#[allow(unsafe_code)]
unsafe impl NcTypeDescriptor for NcChar {
    fn type_descriptor() -> NcVariableType {
        NcVariableType::Char
    }
}

/// Options applied while decoding column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fold `corr_factor`/`corr_offset` into the decoding.
    pub use_corrections: bool,
    /// Blank values whose flag bit is set.
    pub use_flags: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            use_corrections: true,
            use_flags: true,
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn container_error(err: netcdf::Error) -> Mgd77Error {
    Mgd77Error::invalid_container(err.to_string())
}

fn variable_type(kind: StorageKind) -> NcVariableType {
    match kind {
        StorageKind::Char => NcVariableType::Char,
        StorageKind::Byte => NcVariableType::Int(IntType::I8),
        StorageKind::Short => NcVariableType::Int(IntType::I16),
        StorageKind::Int => NcVariableType::Int(IntType::I32),
        StorageKind::Float => NcVariableType::Float(FloatType::F32),
        StorageKind::Double => NcVariableType::Float(FloatType::F64),
    }
}

fn storage_kind(vartype: &NcVariableType) -> Option<StorageKind> {
    match vartype {
        NcVariableType::Char => Some(StorageKind::Char),
        NcVariableType::Int(IntType::I8 | IntType::U8) => Some(StorageKind::Byte),
        NcVariableType::Int(IntType::I16) => Some(StorageKind::Short),
        NcVariableType::Int(IntType::I32) => Some(StorageKind::Int),
        NcVariableType::Float(FloatType::F32) => Some(StorageKind::Float),
        NcVariableType::Float(FloatType::F64) => Some(StorageKind::Double),
        _ => None,
    }
}

/// Single attribute value of numeric type `kind`.
fn number_attr(kind: StorageKind, value: f64) -> AttributeValue {
    match kind {
        StorageKind::Byte | StorageKind::Char => AttributeValue::Schar(value as i8),
        StorageKind::Short => AttributeValue::Short(value as i16),
        StorageKind::Int => AttributeValue::Int(value as i32),
        StorageKind::Float => AttributeValue::Float(value as f32),
        StorageKind::Double => AttributeValue::Double(value),
    }
}

fn attr_numbers(value: &AttributeValue) -> Vec<f64> {
    match value {
        AttributeValue::Uchar(x) => vec![f64::from(*x)],
        AttributeValue::Uchars(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Schar(x) => vec![f64::from(*x)],
        AttributeValue::Schars(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Ushort(x) => vec![f64::from(*x)],
        AttributeValue::Ushorts(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Short(x) => vec![f64::from(*x)],
        AttributeValue::Shorts(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Uint(x) => vec![f64::from(*x)],
        AttributeValue::Uints(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Int(x) => vec![f64::from(*x)],
        AttributeValue::Ints(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Ulonglong(x) => vec![*x as f64],
        AttributeValue::Ulonglongs(v) => v.iter().map(|&x| x as f64).collect(),
        AttributeValue::Longlong(x) => vec![*x as f64],
        AttributeValue::Longlongs(v) => v.iter().map(|&x| x as f64).collect(),
        AttributeValue::Float(x) => vec![f64::from(*x)],
        AttributeValue::Floats(v) => v.iter().copied().map(f64::from).collect(),
        AttributeValue::Double(x) => vec![*x],
        AttributeValue::Doubles(v) => v.clone(),
        AttributeValue::Str(_) | AttributeValue::Strs(_) => Vec::new(),
    }
}

/// Attributes of the file or of one variable, read once.
#[derive(Debug, Default)]
struct AttrMap(HashMap<String, AttributeValue>);

impl AttrMap {
    fn collect<'a>(attrs: impl Iterator<Item = netcdf::Attribute<'a>>) -> Result<Self> {
        attrs
            .map(|a| Ok((a.name().to_string(), a.value().map_err(container_error)?)))
            .collect::<Result<HashMap<_, _>>>()
            .map(Self)
    }

    fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(AttributeValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn numbers(&self, name: &str) -> Option<Vec<f64>> {
        self.0.get(name).map(attr_numbers).filter(|v| !v.is_empty())
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.numbers(name).map(|v| v[0])
    }
}

/// Bit of a column in its set's flag word: the canonical field index for
/// legacy columns, the item number otherwise.
fn flag_bit(set: SetId, item: usize, column: &ColumnInfo) -> Option<u32> {
    let index = match (set, column.field) {
        (SetId::Legacy, Some(field)) => field,
        _ => item,
    };
    (index < 32).then(|| 1u32 << index)
}

fn effective_scale_offset(column: &ColumnInfo, use_corrections: bool) -> (f64, f64) {
    if use_corrections {
        codec::corrected_scale_offset(
            column.scale,
            column.offset,
            column.corr_factor,
            column.corr_offset,
        )
    } else {
        (column.scale, column.offset)
    }
}

fn padded_chars(text: &str, width: usize) -> Vec<NcChar> {
    let mut chars: Vec<NcChar> = text.bytes().take(width).map(NcChar).collect();
    chars.resize(width, NcChar(0));
    chars
}

type Attrs = Vec<(String, AttributeValue)>;

fn column_attrs(set: SetId, column: &ColumnInfo, kind: StorageKind) -> Attrs {
    let mut attrs: Attrs = Vec::new();
    let mut push = |name: &str, value: AttributeValue| attrs.push((name.to_string(), value));
    if !column.name.is_empty() && column.name != column.abbrev {
        push("long_name", column.name.as_str().into());
    }
    if !column.units.is_empty() {
        push("units", column.units.as_str().into());
    }
    if let (false, Some((lo, hi))) = (column.constant, column.limits) {
        push("actual_range", vec![lo, hi].into());
    }
    if !column.comment.is_empty() {
        push("comment", column.comment.as_str().into());
    }
    let legacy = set == SetId::Legacy;
    if legacy && matches!(column.abbrev.as_str(), "depth" | "msd") {
        push("positive", "down".into());
    }
    if !column.is_text() && !(legacy && column.abbrev == "time") {
        let sentinel = kind.limits().sentinel;
        push("_FillValue", number_attr(kind, sentinel));
        push("missing_value", number_attr(kind, sentinel));
    }
    if column.scale != 1.0 {
        push("scale_factor", column.scale.into());
    }
    if column.offset != 0.0 {
        push("add_offset", column.offset.into());
    }
    if column.corr_factor != 1.0 {
        push("corr_factor", column.corr_factor.into());
    }
    if column.corr_offset != 0.0 {
        push("corr_offset", column.corr_offset.into());
    }
    if column.adjust != Adjust::None {
        push("adjust", column.adjust.code().into());
    }
    attrs
}

fn global_attrs(header: &Header, ngdc_id: &str) -> Attrs {
    let original = header.params(ParamSet::Original);
    let revised = header.params(ParamSet::Revised);
    let survey = revised.get(mgd77_core::params::item::SURVEY_IDENTIFIER);
    let history = if header.history.is_empty() {
        format!(
            "{} [{}] Conversion from MGD77 ASCII to MGD77+ netCDF format\n",
            chrono::Utc::now().format("%a %b %e %H:%M:%S %Y"),
            header.author
        )
    } else {
        header.history.clone()
    };

    let mut attrs: Attrs = vec![
        ("Conventions".into(), CONVENTIONS.into()),
        ("Version".into(), env!("CARGO_PKG_VERSION").into()),
        ("Author".into(), header.author.as_str().into()),
        (
            "title".into(),
            format!("Cruise {survey} (NGDC ID {ngdc_id})").into(),
        ),
        ("history".into(), history.into()),
    ];
    if let Some(e77) = header.e77.as_deref().filter(|e| !e.is_empty()) {
        attrs.push(("E77".into(), e77.into()));
    }
    if header.pdr_wrap > 0.0 {
        attrs.push(("PDR_wrap".into(), header.pdr_wrap.into()));
    }
    for ((name, value), (_, changed)) in original.iter().zip(revised.iter()) {
        if !value.is_empty() {
            attrs.push((name.to_string(), value.into()));
        }
        if changed != value {
            attrs.push((format!("{name}{REVISED_SUFFIX}"), changed.into()));
        }
    }
    attrs
}

#[derive(Debug)]
enum Payload {
    Numbers(Vec<f64>),
    Chars(Vec<NcChar>),
}

/// A variable ready to be defined and filled.
#[derive(Debug)]
struct PlannedVar {
    name: String,
    kind: StorageKind,
    dims: Vec<String>,
    attrs: Attrs,
    payload: Payload,
}

impl PlannedVar {
    fn is_record(&self, record_dim: &str) -> bool {
        self.dims.first().is_some_and(|d| d == record_dim)
    }
}

/// Everything an MGD77+ file holds, laid out before any byte is written.
#[derive(Debug)]
struct Layout {
    record_dim: &'static str,
    n_records: usize,
    text_dims: Vec<(String, usize)>,
    attrs: Attrs,
    vars: Vec<PlannedVar>,
}

impl Layout {
    /// Lay out a prepared dataset. Values that do not fit their storage
    /// type are stored as missing and reported once per column.
    fn of(dataset: &Dataset, ngdc_id: &str, use_corrections: bool) -> Self {
        let header = &dataset.header;
        let record_dim = if header.no_time { "record_no" } else { "time" };
        let mut layout = Self {
            record_dim,
            n_records: dataset.n_records(),
            text_dims: Vec::new(),
            attrs: global_attrs(header, ngdc_id),
            vars: Vec::new(),
        };

        for (pos, r) in dataset.order.iter().enumerate() {
            let Some(column) = header.catalog.get(*r) else {
                continue;
            };
            let (dims, kind, payload) = match &dataset.values[pos] {
                ColumnValues::Text(values) => {
                    let width = column.text_len.max(1);
                    let text_dim = format!("{}_dim", column.abbrev);
                    layout.text_dims.push((text_dim.clone(), width));
                    if column.constant {
                        let first = values.first().map_or("", String::as_str);
                        (vec![text_dim], StorageKind::Char, Payload::Chars(padded_chars(first, width)))
                    } else {
                        let chars = values.iter().flat_map(|v| padded_chars(v, width)).collect();
                        (vec![record_dim.to_string(), text_dim], StorageKind::Char, Payload::Chars(chars))
                    }
                }
                ColumnValues::Numeric(values) => {
                    let (scale, offset) = effective_scale_offset(column, use_corrections);
                    let source = if column.constant {
                        &values[..values.len().min(1)]
                    } else {
                        &values[..]
                    };
                    let mut encoded = codec::encode(source, scale, offset, column.storage);
                    if encoded.n_overflow > 0 {
                        let limits = column.storage.limits();
                        warn!(
                            column = %column.abbrev,
                            count = encoded.n_overflow,
                            low = limits.low,
                            high = limits.high,
                            "values outside valid range for storage type, set to missing"
                        );
                    }
                    if column.constant && encoded.values.is_empty() {
                        encoded.values.push(column.storage.limits().sentinel);
                    }
                    let dims = if column.constant {
                        Vec::new()
                    } else {
                        vec![record_dim.to_string()]
                    };
                    (dims, column.storage, Payload::Numbers(encoded.values))
                }
            };
            layout.vars.push(PlannedVar {
                name: column.abbrev.clone(),
                dims,
                attrs: column_attrs(r.set, column, kind),
                kind,
                payload,
            });
        }

        for set in SetId::ALL {
            if let Some(flags) = &dataset.flags[set.index()] {
                layout.vars.push(PlannedVar {
                    name: set.flag_variable().to_string(),
                    dims: vec![record_dim.to_string()],
                    attrs: Vec::new(),
                    kind: FLAG_KIND,
                    payload: Payload::Numbers(flags.iter().map(|&f| f64::from(f as i32)).collect()),
                });
            }
        }
        layout
    }

    /// Define every dimension, variable and attribute, then fill the data.
    fn create(&self, path: &Path) -> std::result::Result<(), netcdf::Error> {
        let mut file = netcdf::create_with(path, Options::empty())?;
        for (name, value) in &self.attrs {
            file.add_attribute(name, value.clone())?;
        }
        file.add_unlimited_dimension(self.record_dim)?;
        for (name, len) in &self.text_dims {
            file.add_dimension(name, *len)?;
        }
        for planned in &self.vars {
            let dims: Vec<&str> = planned.dims.iter().map(String::as_str).collect();
            let mut var =
                file.add_variable_with_type(&planned.name, &dims, &variable_type(planned.kind))?;
            for (name, value) in &planned.attrs {
                var.put_attribute(name, value.clone())?;
            }
        }
        file.enddef()?;

        let n = self.n_records;
        for planned in &self.vars {
            let record = planned.is_record(self.record_dim);
            if record && n == 0 {
                continue;
            }
            let mut var = file
                .variable_mut(&planned.name)
                .ok_or_else(|| netcdf::Error::NotFound(planned.name.clone()))?;
            match (&planned.payload, record) {
                (Payload::Numbers(values), true) => var.put_values(values, 0..n)?,
                (Payload::Numbers(values), false) => var.put_values(values, ..)?,
                (Payload::Chars(chars), true) => {
                    let width = chars.len() / n;
                    var.put_values(chars, [0..n, 0..width])?;
                }
                (Payload::Chars(chars), false) => var.put_values(chars, ..)?,
            }
        }
        file.close()
    }
}

/// Write a prepared dataset as MGD77+ to `path`.
///
/// `dataset` must have been through
/// [`prepare_container`](crate::prep::prepare_container) so that `no_time`
/// and every column's `constant` and `limits` are current. Values that do
/// not fit their storage type are stored as missing and reported once per
/// column.
///
/// # Errors
///
/// [`Mgd77Error::InvalidContainer`] when the netCDF library refuses the
/// layout or the file cannot be created.
pub fn write(path: &Path, dataset: &Dataset, ngdc_id: &str, use_corrections: bool) -> Result<()> {
    Layout::of(dataset, ngdc_id, use_corrections)
        .create(path)
        .map_err(|e| Mgd77Error::invalid_container(format!("{}: {e}", path.display())))
}

fn open(path: &Path) -> Result<netcdf::File> {
    if !path.exists() {
        return Err(Mgd77Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    netcdf::open(path)
        .map_err(|e| Mgd77Error::invalid_container(format!("{}: {e}", path.display())))
}

fn decode_params(globals: &AttrMap) -> [HeaderParams; 2] {
    let mut original = HeaderParams::default();
    let mut revised = HeaderParams::default();
    for (index, item) in HEADER_ITEMS.iter().enumerate() {
        let value = globals.text(item.name).unwrap_or("");
        original.set(index, value);
        let changed = globals
            .text(&format!("{}{REVISED_SUFFIX}", item.name))
            .unwrap_or(value);
        revised.set(index, changed);
    }
    [original, revised]
}

fn column_info(var: &netcdf::Variable) -> Result<ColumnInfo> {
    let name = var.name();
    let vartype = var.vartype();
    let kind = storage_kind(&vartype).ok_or_else(|| {
        Mgd77Error::invalid_container(format!("variable {name} has unsupported type {vartype:?}"))
    })?;
    let attrs = AttrMap::collect(var.attributes())?;

    let mut info = ColumnInfo::new(&name, kind);
    if let Some(def) = info.field.map(|f| &FIELDS[f]) {
        info.name = def.name.to_string();
    }
    if let Some(long_name) = attrs.text("long_name") {
        info.name = long_name.to_string();
    }
    info.units = attrs.text("units").unwrap_or_default().to_string();
    info.comment = attrs.text("comment").unwrap_or_default().to_string();
    info.scale = attrs.number("scale_factor").unwrap_or(1.0);
    info.offset = attrs.number("add_offset").unwrap_or(0.0);
    info.corr_factor = attrs.number("corr_factor").unwrap_or(1.0);
    info.corr_offset = attrs.number("corr_offset").unwrap_or(0.0);
    info.adjust = Adjust::from_code(attrs.number("adjust").map_or(0, |a| a as i32));
    info.limits = attrs
        .numbers("actual_range")
        .filter(|r| r.len() == 2)
        .map(|r| (r[0], r[1]));

    let dims = var.dimensions();
    let record = dims.first().is_some_and(Dimension::is_unlimited);
    let text_dim = match dims {
        [_, d] => Some(d),
        [d] if !record => Some(d),
        _ => None,
    };
    info.text_len = text_dim.map_or(0, Dimension::len);
    info.constant = dims.is_empty() || (dims.len() == 1 && info.is_text());
    Ok(info)
}

fn header_from(file: &netcdf::File, path: &Path) -> Result<Header> {
    let (n_records, no_time) = file
        .dimensions()
        .find(Dimension::is_unlimited)
        .map(|d| (d.len(), d.name() != "time"))
        .ok_or_else(|| Mgd77Error::not_mgd77plus(path, "no record dimension"))?;
    let globals = AttrMap::collect(file.attributes())?;
    let mut header = Header {
        params: decode_params(&globals),
        author: globals.text("Author").unwrap_or_default().to_string(),
        history: globals.text("history").unwrap_or_default().to_string(),
        e77: globals.text("E77").map(str::to_string),
        n_records,
        no_time,
        pdr_wrap: globals.number("PDR_wrap").unwrap_or(0.0),
        ..Header::default()
    };

    if header.no_time {
        header
            .catalog
            .set_mut(SetId::Legacy)
            .push(ColumnInfo::from_field(fields::TIME))?;
    }
    for var in file.variables() {
        let name = var.name();
        if SetId::ALL.iter().any(|s| s.flag_variable() == name) {
            continue;
        }
        let set = SetId::of(&name);
        header.catalog.set_mut(set).push(column_info(&var)?)?;
    }
    debug!(
        path = %path.display(),
        n_records = header.n_records,
        n_fields = header.catalog.n_fields(),
        no_time = header.no_time,
        "read MGD77+ header"
    );
    Ok(header)
}

/// Header of the MGD77+ file at `path`.
///
/// # Errors
///
/// [`Mgd77Error::FileNotFound`] for a missing file,
/// [`Mgd77Error::InvalidContainer`] for a damaged one and
/// [`Mgd77Error::NotMgd77Plus`] for a container without a record dimension.
pub fn read_header(path: &Path) -> Result<Header> {
    header_from(&open(path)?, path)
}

fn decode_variable(
    var: &netcdf::Variable,
    column: &ColumnInfo,
    n: usize,
    use_corrections: bool,
) -> Result<ColumnValues> {
    let mut values = if column.is_text() {
        let chars = var.get_values::<NcChar, _>(..).map_err(container_error)?;
        let bytes: Vec<u8> = chars.into_iter().map(|c| c.0).collect();
        let width = column.text_len.max(1);
        ColumnValues::Text(
            bytes
                .chunks(width)
                .map(|c| {
                    String::from_utf8_lossy(c)
                        .trim_end_matches(['\0', ' '])
                        .to_string()
                })
                .collect(),
        )
    } else {
        let mut v = var.get_values::<f64, _>(..).map_err(container_error)?;
        let (scale, offset) = effective_scale_offset(column, use_corrections);
        let sentinel = var
            .attribute_value("_FillValue")
            .and_then(std::result::Result::ok)
            .and_then(|a| attr_numbers(&a).first().copied())
            .unwrap_or(column.storage.limits().sentinel);
        codec::decode(&mut v, scale, offset, sentinel);
        ColumnValues::Numeric(v)
    };
    if column.constant {
        values.broadcast(n);
    }
    Ok(values)
}

fn apply_flags(dataset: &mut Dataset) {
    for pos in 0..dataset.order.len() {
        let r = dataset.order[pos];
        let Some(flags) = &dataset.flags[r.set.index()] else {
            continue;
        };
        let Some(bit) = dataset
            .header
            .catalog
            .get(r)
            .and_then(|c| flag_bit(r.set, r.item, c))
        else {
            continue;
        };
        match &mut dataset.values[pos] {
            ColumnValues::Numeric(v) => {
                for (x, f) in v.iter_mut().zip(flags) {
                    if f & bit != 0 {
                        *x = f64::NAN;
                    }
                }
            }
            ColumnValues::Text(v) => {
                for (x, f) in v.iter_mut().zip(flags) {
                    if f & bit != 0 {
                        x.clear();
                    }
                }
            }
        }
    }

    let position = fields::bit(fields::LATITUDE) | fields::bit(fields::LONGITUDE);
    let keep: Option<Vec<bool>> = dataset.flags[SetId::Legacy.index()]
        .as_ref()
        .map(|flags| flags.iter().map(|f| f & position == 0).collect());
    if let Some(keep) = keep {
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            debug!(dropped, "dropping records with flagged navigation");
            dataset.retain(&keep);
        }
    }
}

/// Read a whole MGD77+ file.
///
/// # Errors
///
/// As for [`read_header`], plus [`Mgd77Error::InvalidContainer`] when a
/// variable's data cannot be read.
pub fn read(path: &Path, options: DecodeOptions) -> Result<Dataset> {
    let file = open(path)?;
    let header = header_from(&file, path)?;
    let n = header.n_records;
    let order = header.catalog.select_all();
    let mut dataset = Dataset::new(header, order);

    for pos in 0..dataset.order.len() {
        let r = dataset.order[pos];
        let Some(column) = dataset.header.catalog.get(r) else {
            continue;
        };
        dataset.values[pos] = match file.variable(&column.abbrev) {
            Some(var) => decode_variable(&var, column, n, options.use_corrections)?,
            None => ColumnValues::Numeric(vec![f64::NAN; n]),
        };
    }
    for set in SetId::ALL {
        if let Some(var) = file.variable(set.flag_variable()) {
            let words = var.get_values::<i32, _>(..).map_err(container_error)?;
            dataset.flags[set.index()] = Some(words.into_iter().map(|x| x as u32).collect());
        }
    }
    if options.use_flags {
        apply_flags(&mut dataset);
    }
    dataset.header.n_records = dataset.n_records();
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::prepare_container;
    use mgd77_core::params::item;
    use tempfile::TempDir;

    fn sample() -> Dataset {
        let mut params = HeaderParams::default();
        params.set(item::SURVEY_IDENTIFIER, "TEST0001");
        let mut header = Header::plain(params, 3, false);
        header.author = "tester".into();
        header
            .params_mut(ParamSet::Revised)
            .set(item::SURVEY_IDENTIFIER, "TEST0002");
        let order = header
            .catalog
            .order_columns(&["time", "lat", "lon", "depth", "drt", "id"])
            .unwrap();
        let mut ds = Dataset::new(header, order);
        ds.values = vec![
            ColumnValues::Numeric(vec![0.0, 60.0, 120.0]),
            ColumnValues::Numeric(vec![45.0, 45.5, f64::NAN]),
            ColumnValues::Numeric(vec![179.0, -179.0, 178.0]),
            ColumnValues::Numeric(vec![1234.5, f64::NAN, 99_999_999.0]),
            ColumnValues::Numeric(vec![5.0; 3]),
            ColumnValues::Text(vec!["TEST0001".into(); 3]),
        ];
        ds
    }

    fn written(ds: &mut Dataset, use_corrections: bool) -> (TempDir, std::path::PathBuf) {
        prepare_container(ds).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("01010047.nc");
        write(&path, ds, "01010047", use_corrections).unwrap();
        (dir, path)
    }

    #[test]
    fn test_layout_of_written_container() {
        let (_dir, path) = written(&mut sample(), true);
        let file = netcdf::open(&path).unwrap();
        let time_dim = file.dimension("time").unwrap();
        assert!(time_dim.is_unlimited());
        assert_eq!(time_dim.len(), 3);

        let globals = AttrMap::collect(file.attributes()).unwrap();
        assert_eq!(globals.text("Conventions"), Some(CONVENTIONS));
        assert_eq!(globals.text("title"), Some("Cruise TEST0002 (NGDC ID 01010047)"));
        assert_eq!(globals.text("Survey_Identifier"), Some("TEST0001"));
        assert_eq!(globals.text("Survey_Identifier_REVISED"), Some("TEST0002"));

        let attrs_of = |name: &str| AttrMap::collect(file.variable(name).unwrap().attributes()).unwrap();
        assert!(attrs_of("time").numbers("_FillValue").is_none());
        let depth = attrs_of("depth");
        assert_eq!(depth.text("positive"), Some("down"));
        assert!(depth.number("missing_value").is_some());
        let drt = file.variable("drt").unwrap();
        assert!(drt.dimensions().is_empty());
        assert!(attrs_of("drt").numbers("actual_range").is_none());
        let id = file.variable("id").unwrap();
        assert_eq!(id.vartype(), NcVariableType::Char);
        assert_eq!(id.dimensions().len(), 1);
        assert_eq!(id.dimensions()[0].name(), "id_dim");
    }

    #[test]
    fn test_container_roundtrip() {
        let (_dir, path) = written(&mut sample(), true);
        let back = read(&path, DecodeOptions::default()).unwrap();
        assert_eq!(back.n_records(), 3);
        assert!(!back.header.no_time);
        assert_eq!(back.header.author, "tester");
        assert_eq!(
            back.header.params(ParamSet::Revised).get(item::SURVEY_IDENTIFIER),
            "TEST0002"
        );
        assert_eq!(back.numeric("time").unwrap(), [0.0, 60.0, 120.0]);
        let lon = back.numeric("lon").unwrap();
        assert!((lon[1] - 181.0).abs() < 1e-6);
        let lat = back.numeric("lat").unwrap();
        assert!((lat[1] - 45.5).abs() < 1e-6);
        assert!(lat[2].is_nan());
        let depth = back.numeric("depth").unwrap();
        assert!((depth[0] - 1234.5).abs() < 1e-6);
        assert!(depth[1].is_nan());
        assert!(depth[2].is_nan());
        assert_eq!(back.numeric("drt").unwrap(), [5.0, 5.0, 5.0]);
        assert_eq!(back.text("id").unwrap(), ["TEST0001", "TEST0001", "TEST0001"]);
        let drt = back.info(back.position("drt").unwrap()).unwrap();
        assert!(drt.constant);
    }

    #[test]
    fn test_single_timed_record_keeps_time_dimension() {
        let mut header = Header::plain(HeaderParams::default(), 1, false);
        let order = header.catalog.order_columns(&["time", "lon"]).unwrap();
        let mut ds = Dataset::new(header, order);
        ds.values = vec![
            ColumnValues::Numeric(vec![1e8]),
            ColumnValues::Numeric(vec![10.0]),
        ];
        let (_dir, path) = written(&mut ds, true);
        let file = netcdf::open(&path).unwrap();
        assert!(file.dimension("time").is_some_and(|d| d.is_unlimited()));
        assert_eq!(file.variable("time").unwrap().dimensions().len(), 1);

        let back = read(&path, DecodeOptions::default()).unwrap();
        assert!(!back.header.no_time);
        assert_eq!(back.numeric("time").unwrap(), [1e8]);
        assert_eq!(back.numeric("lon").unwrap(), [10.0]);
    }

    #[test]
    fn test_no_time_uses_record_dimension() {
        let mut ds = sample();
        if let ColumnValues::Numeric(t) = &mut ds.values[0] {
            t.fill(f64::NAN);
        }
        let (_dir, path) = written(&mut ds, true);
        let header = read_header(&path).unwrap();
        assert!(header.no_time);
        let set = header.catalog.set(SetId::Legacy);
        assert_eq!(set.get(0).unwrap().abbrev, "time");
        let back = read(&path, DecodeOptions::default()).unwrap();
        assert!(back.numeric("time").unwrap().iter().all(|t| t.is_nan()));
    }

    #[test]
    fn test_corrections_and_flags() {
        let mut ds = sample();
        prepare_container(&mut ds).unwrap();
        let depth = ds.order[ds.position("depth").unwrap()];
        ds.header.catalog.get_mut(depth).unwrap().corr_factor = 2.0;
        ds.flags[SetId::Legacy.index()] = Some(vec![
            0,
            fields::bit(fields::LATITUDE),
            fields::bit(fields::DEPTH),
        ]);
        let (_dir, path) = written(&mut ds, false);

        let raw = read(
            &path,
            DecodeOptions {
                use_corrections: false,
                use_flags: false,
            },
        )
        .unwrap();
        assert_eq!(raw.n_records(), 3);
        assert!((raw.numeric("depth").unwrap()[0] - 1234.5).abs() < 1e-6);
        assert_eq!(raw.flags[0].as_deref(), Some(&[0, 128, 2048][..]));

        let corrected = read(&path, DecodeOptions::default()).unwrap();
        assert_eq!(corrected.n_records(), 2);
        let depth = corrected.numeric("depth").unwrap();
        assert!((depth[0] - 2469.0).abs() < 1e-6);
        assert!(depth[1].is_nan());
    }

    #[test]
    fn test_missing_record_dimension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.nc");
        let mut file = netcdf::create_with(&path, Options::empty()).unwrap();
        file.add_dimension("x", 2).unwrap();
        file.add_variable::<f64>("x", &["x"]).unwrap();
        file.close().unwrap();
        assert!(matches!(
            read_header(&path),
            Err(Mgd77Error::NotMgd77Plus { .. })
        ));
    }

    #[test]
    fn test_damaged_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.nc");
        std::fs::write(&path, b"CDF\x01\x00\x00").unwrap();
        assert!(matches!(
            read_header(&path),
            Err(Mgd77Error::InvalidContainer { .. })
        ));
        assert!(matches!(
            read_header(&dir.path().join("absent.nc")),
            Err(Mgd77Error::FileNotFound { .. })
        ));
    }
}
