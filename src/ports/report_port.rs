//! Report output port trait.

use std::path::Path;

use crate::domain::error::DrillError;
use crate::domain::summary::Summary;

pub trait ReportPort {
    fn write_summary(&self, summary: &Summary, output: &Path) -> Result<(), DrillError>;
}
