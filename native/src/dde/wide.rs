use std::fmt;

/// NUL-terminated UTF-16 text handed to DDEML.
///
/// The buffer always ends with exactly one NUL unit. Input is cut at the first
/// embedded NUL, since that is where the OS stops reading the string.
#[derive(Clone, PartialEq, Eq)]
pub struct WideText {
    units: Vec<u16>,
}

impl WideText {
    pub fn new(text: &str) -> Self {
        Self::collect(text.encode_utf16())
    }

    pub fn from_units(units: &[u16]) -> Self {
        Self::collect(units.iter().copied())
    }

    /// Copy a NUL-terminated UTF-16 string owned by the caller.
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    /// `ptr` must be null or point to a readable, NUL-terminated UTF-16 string.
    pub unsafe fn from_ptr(ptr: *const u16) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }

        let mut len = 0usize;
        while *ptr.add(len) != 0 {
            len += 1;
        }

        Some(Self::from_units(std::slice::from_raw_parts(ptr, len)))
    }

    fn collect<I: Iterator<Item = u16>>(units: I) -> Self {
        let mut units: Vec<u16> = units.take_while(|&unit| unit != 0).collect();
        units.push(0);
        Self { units }
    }

    /// Pointer to the first unit, valid while `self` is alive.
    pub fn as_ptr(&self) -> *const u16 {
        self.units.as_ptr()
    }

    /// Units without the terminating NUL.
    pub fn as_units(&self) -> &[u16] {
        &self.units[..self.units.len() - 1]
    }

    pub fn as_units_with_nul(&self) -> &[u16] {
        &self.units
    }

    /// Length in UTF-16 units, terminator excluded.
    pub fn len(&self) -> usize {
        self.units.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// CF_UNICODETEXT payload: every unit including the terminator, native byte order.
    pub fn payload(&self) -> Vec<u8> {
        self.units
            .iter()
            .flat_map(|unit| unit.to_ne_bytes())
            .collect()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_units())
    }
}

impl Default for WideText {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for WideText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for WideText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideText({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for WideText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
