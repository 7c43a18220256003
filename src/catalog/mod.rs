//! Input discovery: turns a directory listing into an ordered list of work units.

/// Directory scan, file-name parsing and sibling pairing.
pub mod scan;
