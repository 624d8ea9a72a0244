//! Variable names and their value slots.
//!
//! A [`VariableTable`] keeps an ordered list of unique names and one `f64`
//! slot per name. AST nodes refer to slots by index, so the table only ever
//! grows while trees built against it are alive. Replacing the whole name set
//! with [`VariableTable::reset`] bumps the table's generation; holders of
//! trees compare generations to know when they must re-parse.

/// How a parse treats identifiers missing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Unknown identifiers are errors.
    #[default]
    Fixed,
    /// Unknown identifiers get a fresh zero-initialised slot, up to
    /// [`AUTO_ADD_CAPACITY`] new names per expression.
    AutoAdd,
}

/// New variables one expression parse may create in auto-add mode.
pub const AUTO_ADD_CAPACITY: usize = 50;

/// Why a lookup with auto-add failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Missing {
    Unknown,
    CapacityExceeded,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    names: Vec<String>,
    values: Vec<f64>,
    /// Table length beyond which auto-add refuses new names
    limit: usize,
    generation: u64,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the given names, all set to zero. Duplicates are ignored.
    pub fn with_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut table = VariableTable::new();
        for name in names {
            table.push(name.as_ref());
        }
        table
    }

    /// Adds a name (zero-initialised) if not present and returns its slot.
    pub fn push(&mut self, name: &str) -> usize {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        self.names.push(name.to_string());
        self.values.push(0.0);
        self.names.len() - 1
    }

    /// Replaces the name set. Values are reset to zero and the generation
    /// changes, invalidating every tree parsed against the old set.
    pub fn reset<S: AsRef<str>>(&mut self, names: &[S]) {
        let generation = self.generation + 1;
        *self = VariableTable::with_names(names);
        self.generation = generation;
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|i| self.values[i])
    }

    /// Sets an existing variable. Returns false if the name is unknown.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.index_of(name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Copies values in from a caller slice, slot by slot.
    pub fn load(&mut self, values: &[f64]) {
        for (slot, value) in self.values.iter_mut().zip(values) {
            *slot = *value;
        }
    }

    /// Copies values out to a caller slice, slot by slot.
    pub fn store(&self, values: &mut [f64]) {
        for (out, value) in values.iter_mut().zip(&self.values) {
            *out = *value;
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Name/value pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Opens a fresh auto-add allowance for one expression parse.
    pub(crate) fn begin_auto_add(&mut self) {
        self.limit = self.names.len() + AUTO_ADD_CAPACITY;
    }

    /// Resolves a name, creating it when `mode` allows.
    pub(crate) fn resolve(&mut self, name: &str, mode: ParseMode) -> Result<usize, Missing> {
        if let Some(index) = self.index_of(name) {
            return Ok(index);
        }
        match mode {
            ParseMode::Fixed => Err(Missing::Unknown),
            ParseMode::AutoAdd if self.names.len() < self.limit => Ok(self.push(name)),
            ParseMode::AutoAdd => Err(Missing::CapacityExceeded),
        }
    }
}
