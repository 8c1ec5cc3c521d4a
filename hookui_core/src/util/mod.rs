pub(crate) mod format_helpers;
