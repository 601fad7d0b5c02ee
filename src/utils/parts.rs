//! Utility functions for working with A2A Part objects.

use crate::types::Part;
use serde_json::Value;

/// Extracts text content from all text Parts in a list.
///
/// ```
/// use a2a_rpc_client::types::Part;
/// use a2a_rpc_client::utils::get_text_parts;
///
/// let parts = vec![Part::text("Hello"), Part::text("World")];
/// assert_eq!(get_text_parts(&parts), vec!["Hello", "World"]);
/// ```
pub fn get_text_parts(parts: &[Part]) -> Vec<String> {
    parts
        .iter()
        .filter_map(|part| part.as_text().map(str::to_string))
        .collect()
}

/// Extracts the payload of every data Part in a list.
pub fn get_data_parts(parts: &[Part]) -> Vec<Value> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Data { data, .. } => Some(data.clone()),
            _ => None,
        })
        .collect()
}

/// Extracts the raw file descriptor of every file Part in a list.
pub fn get_file_parts(parts: &[Part]) -> Vec<Value> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::File { file, .. } => Some(file.clone()),
            _ => None,
        })
        .collect()
}
