//! One module per keyword family, mirroring the teacher crate's layout.
//! Each `check` function appends zero or more `ValidationError`s for its
//! family to the caller's accumulator; the fixed calling order lives in
//! `validator::evaluate`.
pub(crate) mod array_;
pub(crate) mod composition;
pub(crate) mod const_;
pub(crate) mod enum_;
pub(crate) mod format_;
pub(crate) mod numeric;
pub(crate) mod object_;
pub(crate) mod string_;
pub(crate) mod type_;
