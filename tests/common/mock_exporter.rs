/*!
 * Mock exporter for testing
 *
 * Records every export call instead of rendering anything, and can be told
 * to fail to exercise error propagation.
 */

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use signgloss::errors::ExportError;
use signgloss::export::ClipExporter;
use signgloss::gloss::Asset;

/// One recorded export call
#[derive(Debug, Clone)]
pub struct ExportCall {
    pub assets: Vec<Asset>,
    pub destination: PathBuf,
}

/// Exporter that records calls
#[derive(Debug, Default)]
pub struct MockExporter {
    calls: Mutex<Vec<ExportCall>>,
    should_fail: bool,
}

impl MockExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exporter whose every call fails with `ExportError::ToolFailed`
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    pub fn calls(&self) -> Vec<ExportCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ClipExporter for MockExporter {
    async fn export(&self, assets: &[Asset], destination: &Path) -> Result<PathBuf, ExportError> {
        self.calls.lock().unwrap().push(ExportCall {
            assets: assets.to_vec(),
            destination: destination.to_path_buf(),
        });

        if self.should_fail {
            return Err(ExportError::ToolFailed {
                tool: "mock".to_string(),
                status: 1,
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(destination.to_path_buf())
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn extension(&self) -> &str {
        "mock"
    }
}
