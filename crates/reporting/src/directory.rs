//! Tool category lookup for reports.

use std::collections::HashMap;

use toolfleet_core::ToolId;
use toolfleet_invoicing::Tool;

/// Category reported for tools the directory cannot resolve.
pub const UNCATEGORIZED: &str = "General";

/// Resolves a tool id to its category.
///
/// Invoices only carry tool ids and names, so category breakdowns need the
/// caller's fleet data injected through this trait.
pub trait ToolDirectory {
    fn category_of(&self, tool_id: &ToolId) -> Option<&str>;
}

/// Directory that knows no tools; every line reports as [`UNCATEGORIZED`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoToolDirectory;

impl ToolDirectory for NoToolDirectory {
    fn category_of(&self, _tool_id: &ToolId) -> Option<&str> {
        None
    }
}

impl ToolDirectory for [Tool] {
    fn category_of(&self, tool_id: &ToolId) -> Option<&str> {
        self.iter()
            .find(|t| &t.id == tool_id)
            .map(|t| t.category.as_str())
    }
}

impl ToolDirectory for Vec<Tool> {
    fn category_of(&self, tool_id: &ToolId) -> Option<&str> {
        self.as_slice().category_of(tool_id)
    }
}

impl ToolDirectory for HashMap<ToolId, Tool> {
    fn category_of(&self, tool_id: &ToolId) -> Option<&str> {
        self.get(tool_id).map(|t| t.category.as_str())
    }
}

impl ToolDirectory for HashMap<ToolId, String> {
    fn category_of(&self, tool_id: &ToolId) -> Option<&str> {
        self.get(tool_id).map(String::as_str)
    }
}
